use biomech::algebra::{
    deviatoric, deviatoric_projector, double_contraction, fourth_order_identity, left_cauchy_green,
    mul_left_and_transpose_right, nearest_rotation, polar_decomposition, push_forward_tangent, right_cauchy_green,
    rotate_tangent, strain_to_voigt, stress_transformation, stretch_from_green_strain, symmetric_to_voigt,
    voigt_outer, voigt_to_strain, voigt_to_symmetric,
};
use biomech::nalgebra::{Matrix3, Matrix6, Rotation3, Vector3, Vector6};
use biomech::proptest::{deformation_gradient, green_strain, rotation};
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;
use util::{assert_approx_matrix_eq, is_symmetric};

fn symmetric_sample() -> Matrix3<f64> {
    Matrix3::new(2.0, 0.5, -1.0, 0.5, 3.0, 0.25, -1.0, 0.25, -4.0)
}

/// The isotropic linear elastic tangent $\lambda \vec I \otimes \vec I + 2 \mu \mathbb{I}$.
fn isotropic_tangent(lambda: f64, mu: f64) -> Matrix6<f64> {
    let i = Matrix3::identity();
    voigt_outer(&i, &i) * lambda + fourth_order_identity() * (2.0 * mu)
}

#[test]
fn voigt_conversions_use_engineering_shear_for_strain() {
    let a = symmetric_sample();
    assert_eq!(symmetric_to_voigt(&a), Vector6::new(2.0, 3.0, -4.0, 0.5, 0.25, -1.0));
    assert_eq!(strain_to_voigt(&a), Vector6::new(2.0, 3.0, -4.0, 1.0, 0.5, -2.0));
    assert_eq!(voigt_to_symmetric(&symmetric_to_voigt(&a)), a);
    assert_eq!(voigt_to_strain(&strain_to_voigt(&a)), a);
}

#[test]
fn fourth_order_identity_maps_strain_to_tensor_components() {
    let e = symmetric_sample();
    let mapped = fourth_order_identity() * strain_to_voigt(&e);
    assert_approx_matrix_eq!(mapped, symmetric_to_voigt(&e), reltol = 1e-15);
}

#[test]
fn deviatoric_projector_removes_trace() {
    let e = symmetric_sample();
    let projected = deviatoric_projector() * strain_to_voigt(&e);
    assert_approx_matrix_eq!(projected, symmetric_to_voigt(&deviatoric(&e)), reltol = 1e-14);
    assert_scalar_eq!(deviatoric(&e).trace(), 0.0, comp = abs, tol = 1e-14);
}

#[test]
fn projectors_are_idempotent_under_double_contraction() {
    let p = deviatoric_projector::<f64>();
    assert_approx_matrix_eq!(double_contraction(&p, &p), p, reltol = 1e-14);
    let i = fourth_order_identity::<f64>();
    assert_approx_matrix_eq!(double_contraction(&i, &i), i, reltol = 1e-14);
}

#[test]
fn isotropic_tangent_is_invariant_under_rotation() {
    let d = isotropic_tangent(576.9, 384.6);
    let r = Rotation3::from_scaled_axis(Vector3::new(0.3, -1.2, 0.7));
    assert_approx_matrix_eq!(rotate_tangent(&d, &r), d, reltol = 1e-12);
    assert_approx_matrix_eq!(push_forward_tangent(&d, &Matrix3::identity()), d, reltol = 1e-15);
}

#[test]
fn cauchy_green_tensors() {
    let f = Matrix3::new(1.1, 0.2, 0.0, 0.0, 0.9, 0.1, 0.05, 0.0, 1.0);
    assert_eq!(right_cauchy_green(&f), f.transpose() * f);
    assert_eq!(left_cauchy_green(&f), f * f.transpose());
    assert_eq!(mul_left_and_transpose_right(&Matrix3::identity(), &f), left_cauchy_green(&f));
}

#[test]
fn nearest_rotation_of_reflected_matrix_is_proper() {
    let m = Matrix3::from_diagonal(&Vector3::new(1.0, 2.0, -0.5));
    let r = nearest_rotation(&m);
    assert_scalar_eq!(r.matrix().determinant(), 1.0, comp = abs, tol = 1e-14);
    assert_approx_matrix_eq!(r.matrix() * r.matrix().transpose(), Matrix3::<f64>::identity(), reltol = 1e-14);
}

proptest! {
    #[test]
    fn stress_transformation_matches_tensor_product(f in deformation_gradient()) {
        let a = symmetric_sample();
        let expected = symmetric_to_voigt(&(f * a * f.transpose()));
        assert_approx_matrix_eq!(stress_transformation(&f) * symmetric_to_voigt(&a), expected, reltol = 1e-13);
    }

    #[test]
    fn pushed_forward_tangents_stay_symmetric(f in deformation_gradient()) {
        let d = isotropic_tangent(100.0, 50.0);
        prop_assert!(is_symmetric(&push_forward_tangent(&d, &f), 1e-13));
    }

    #[test]
    fn polar_decomposition_recovers_rotation(r in rotation(), e in green_strain(0.1)) {
        let u = stretch_from_green_strain(&e);
        let f = r.matrix() * u;
        let (r_polar, u_polar) = polar_decomposition(&f);
        assert_approx_matrix_eq!(*r_polar.matrix(), *r.matrix(), reltol = 1e-10);
        assert_approx_matrix_eq!(u_polar, u, reltol = 1e-10);
        prop_assert!(is_symmetric(&u_polar, 1e-14));
    }

    #[test]
    fn stretch_reproduces_green_strain(e in green_strain(0.1)) {
        let u = stretch_from_green_strain(&e);
        let e_recovered = (u.transpose() * u - Matrix3::identity()) * 0.5;
        assert_approx_matrix_eq!(e_recovered, e, reltol = 1e-10);
    }
}
