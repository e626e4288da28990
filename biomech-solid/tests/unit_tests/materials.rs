use crate::unit_tests::{
    all_materials, hyperelastic_materials, linear_materials, linear_tangent_and_fd_approximation, mooney_rivlin,
    orthotropic_fung, recording_observer, simple_shear, tangent_and_fd_approximation,
};
use biomech::algebra::strain_to_voigt;
use biomech::error::InvalidDeformation;
use biomech::nalgebra;
use biomech::nalgebra::{matrix, Matrix3, Rotation3, Vector3};
use biomech::property::{find_property, PropertyEvent};
use biomech::proptest::{deformation_gradient, green_strain, rotation};
use biomech::DeformedPoint;
use biomech_solid::kinematics::{cauchy_to_second_pk, second_pk_to_cauchy};
use biomech_solid::{
    BulkParameters, FemMaterial, IncompNeoHookeanMaterial, LameParameters, LinearMaterial, MaterialKind,
    NeoHookeanMaterial, NullMaterial, OgdenMaterial, StVenantKirchhoffMaterial, YoungPoisson,
};
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use proptest::prelude::*;
use util::{assert_approx_matrix_eq, is_symmetric};

#[test]
fn lame_from_young_poisson() {
    let young_poisson = YoungPoisson {
        young: 1e3,
        poisson: 0.3,
    };
    let lame = LameParameters::from(young_poisson);

    assert_scalar_eq!(lame.mu, 384.6153846153846, comp = float);
    assert_scalar_eq!(lame.lambda, 576.9230769230769, comp = float);
}

#[test]
fn young_poisson_from_shear_and_bulk() {
    let young_poisson = YoungPoisson::from_shear_and_bulk(500.0, 1000.0);
    let lame = LameParameters::from(young_poisson);
    assert_scalar_eq!(lame.mu, 500.0, comp = abs, tol = 1e-9);
    // K = lambda + 2 mu / 3
    assert_scalar_eq!(lame.lambda + 2.0 * lame.mu / 3.0, 1000.0, comp = abs, tol = 1e-9);
}

#[test]
fn linear_material_at_identity() {
    let material = LinearMaterial::<f64>::new(1000.0, 0.3, true).unwrap();
    let point = DeformedPoint::new();
    let q = Matrix3::identity();

    let mut sigma = Matrix3::repeat(1.0);
    let mut d = nalgebra::Matrix6::zeros();
    material.compute_stress_and_tangent(&mut sigma, Some(&mut d), &point, &q, 0.0);

    assert_matrix_eq!(sigma, Matrix3::<f64>::zeros(), comp = abs, tol = 1e-12);
    assert_matrix_eq!(d, d.transpose(), comp = float);
    assert_scalar_eq!(d[(0, 0)], 1346.1538461538462, comp = abs, tol = 1e-6);
    assert_scalar_eq!(d[(0, 1)], 576.9230769230769, comp = abs, tol = 1e-6);
    assert_scalar_eq!(d[(3, 3)], 384.6153846153846, comp = abs, tol = 1e-6);
}

#[test]
fn corotated_linear_material_ignores_rigid_rotation() {
    let material = LinearMaterial::<f64>::new(1000.0, 0.3, true).unwrap();
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), 0.7);
    let stretch: Matrix3<f64> = matrix![1.01, 0.0, 0.0;
                          0.0, 1.0, 0.0;
                          0.0, 0.0, 1.0];
    let q = Matrix3::identity();

    let unrotated = material.compute_stress(&DeformedPoint::from_deformation_gradient(stretch), &q, None);
    let rotated = material.compute_stress(
        &DeformedPoint::from_deformation_gradient(rotation.matrix() * stretch),
        &q,
        None,
    );
    let expected = rotation.matrix() * unrotated * rotation.matrix().transpose();
    assert_approx_matrix_eq!(rotated, expected, reltol = 1e-10);
}

#[test]
fn corotated_linear_material_prefers_rotation_of_point() {
    let material = LinearMaterial::<f64>::new(1000.0, 0.3, true).unwrap();
    let q = Matrix3::identity();
    let mut point = DeformedPoint::from_deformation_gradient(simple_shear(0.01));
    let with_polar = material.compute_stress(&point, &q, None);
    point.set_r(Some(&Matrix3::identity()));
    let with_identity = material.compute_stress(&point, &q, None);
    let without_rotation = LinearMaterial::<f64>::new(1000.0, 0.3, false)
        .unwrap()
        .compute_stress(&point, &q, None);

    assert_matrix_eq!(with_identity, without_rotation, comp = float);
    assert!((with_polar - with_identity).abs().max() > 1e-6);
}

#[test]
fn neo_hookean_uniaxial_stretch() {
    let material = NeoHookeanMaterial::<f64>::from_shear_and_bulk(500.0, 1000.0).unwrap();
    let f = Matrix3::<f64>::from_diagonal(&Vector3::new(1.1, 1.0, 1.0));
    let point = DeformedPoint::from_deformation_gradient(f);
    let sigma = material.compute_stress(&point, &Matrix3::identity(), None);

    assert!(sigma[(0, 0)] > 0.0);
    assert_scalar_eq!(sigma[(1, 1)], sigma[(2, 2)], comp = float);
    for (i, j) in [(0, 1), (0, 2), (1, 2), (1, 0), (2, 0), (2, 1)] {
        assert_eq!(sigma[(i, j)], 0.0);
    }
}

#[test]
fn mooney_rivlin_volume_preserving_shear() {
    let material = mooney_rivlin();
    let point = DeformedPoint::from_deformation_gradient(simple_shear(0.2));
    assert_eq!(point.det_f(), 1.0);

    let sigma = material.compute_stress(&point, &Matrix3::identity(), None);
    assert_matrix_eq!(sigma, sigma.transpose(), comp = float);
    assert!(sigma[(0, 1)] > 0.0);
    assert!((sigma[(1, 1)] - sigma[(2, 2)]).abs() < 0.05 * sigma[(0, 1)].abs());
}

#[test]
fn incompressible_materials_use_average_pressure() {
    let material = IncompNeoHookeanMaterial::<f64>::new(500.0, 1000.0).unwrap();
    let q = Matrix3::identity();
    let mut point = DeformedPoint::from_deformation_gradient(simple_shear(0.1));
    let sigma_without_pressure = material.compute_stress(&point, &q, None);
    point.set_average_pressure(-40.0);
    let sigma_with_pressure = material.compute_stress(&point, &q, None);

    assert_approx_matrix_eq!(
        sigma_with_pressure - sigma_without_pressure,
        Matrix3::identity() * -40.0,
        reltol = 1e-12
    );
    let expected_bulk = BulkParameters {
        bulk_modulus: 1000.0,
        ..BulkParameters::default()
    };
    assert_eq!(material.bulk_parameters(), Some(&expected_bulk));
    assert!(material.is_incompressible());
}

#[test]
fn null_material_has_no_response() {
    let material = NullMaterial::<f64>::new();
    let point = DeformedPoint::from_deformation_gradient(simple_shear(0.3));
    let q = Matrix3::identity();
    let sigma = material.compute_stress(&point, &q, None);
    assert_eq!(sigma, Matrix3::zeros());
    assert_eq!(material.compute_tangent(&sigma, &point, &q, None), nalgebra::Matrix6::zeros());
}

#[test]
fn non_invertible_materials_return_zero_response_when_inverted() {
    let f = Matrix3::<f64>::from_diagonal(&Vector3::new(-1.0, 1.0, 1.0));
    let point = DeformedPoint::from_deformation_gradient(f);
    let q = Matrix3::identity();
    for material in hyperelastic_materials()
        .into_iter()
        .filter(|material| !material.is_invertible())
    {
        let sigma = material.compute_stress(&point, &q, None);
        let d = material.compute_tangent(&sigma, &point, &q, None);
        assert_eq!(sigma, Matrix3::zeros(), "{}", material.kind());
        assert_eq!(d, nalgebra::Matrix6::zeros(), "{}", material.kind());
        assert_eq!(
            material.validate_deformation(&point),
            Err(InvalidDeformation { det_f: -1.0 })
        );
    }
}

#[test]
fn invertible_materials_accept_inverted_points() {
    let f = Matrix3::<f64>::from_diagonal(&Vector3::new(-1.0, 1.0, 1.0));
    let inverted = DeformedPoint::from_deformation_gradient(f);
    let degenerate = DeformedPoint::from_deformation_gradient(Matrix3::zeros());

    let linear = LinearMaterial::<f64>::new(1000.0, 0.3, false).unwrap();
    assert!(linear.validate_deformation(&inverted).is_ok());
    assert!(linear.validate_deformation(&degenerate).is_err());

    let stvk = StVenantKirchhoffMaterial::<f64>::new(1000.0, 0.3).unwrap();
    assert!(stvk.is_invertible());
    let sigma = stvk.compute_stress(&inverted, &Matrix3::identity(), None);
    assert!(sigma.iter().all(|x| x.is_finite()));
}

#[test]
fn material_flags() {
    let linear = LinearMaterial::<f64>::new(1000.0, 0.3, true).unwrap();
    assert!(linear.is_linear() && linear.is_corotated() && linear.is_invertible());
    assert!(!linear.is_viscoelastic() && !linear.has_state());

    let neo_hookean = NeoHookeanMaterial::<f64>::default();
    assert!(!neo_hookean.is_linear() && !neo_hookean.is_incompressible());
    assert_eq!(neo_hookean.kind(), MaterialKind::NeoHookean);
    assert_eq!(neo_hookean.kind().to_string(), "neo_hookean");
}

#[test]
fn second_pk_and_cauchy_conversion_are_inverse() {
    let f: Matrix3<f64> = matrix![1.1, 0.2, 0.0;
                    -0.1, 0.9, 0.05;
                    0.0, 0.1, 1.2];
    let point = DeformedPoint::from_deformation_gradient(f);
    let sigma: Matrix3<f64> = matrix![10.0, 2.0, -1.0;
                        2.0, 5.0, 0.5;
                        -1.0, 0.5, -3.0];
    let s = cauchy_to_second_pk(&sigma, &point);
    assert_approx_matrix_eq!(second_pk_to_cauchy(&s, &point), sigma, reltol = 1e-12);

    let singular = DeformedPoint::from_deformation_gradient(Matrix3::zeros());
    assert_eq!(cauchy_to_second_pk(&sigma, &singular), Matrix3::zeros());
    assert_eq!(second_pk_to_cauchy(&sigma, &singular), Matrix3::zeros());
}

#[test]
fn rejected_parameters_keep_previous_value_and_notify_host() {
    let (observer, log) = recording_observer();
    let mut material = NeoHookeanMaterial::<f64>::new(1000.0, 0.3).unwrap();
    material.set_host_observer(Some(observer));

    let err = material.set_poissons_ratio(0.5).unwrap_err();
    assert_eq!(err.property(), "PoissonsRatio");
    assert_eq!(material.parameters().poisson, 0.3);

    material.set_youngs_modulus(2000.0).unwrap();
    assert_eq!(material.parameters().young, 2000.0);
    assert!(material.set_youngs_modulus(-1.0).is_err());
    assert_eq!(material.parameters().young, 2000.0);

    let log = log.lock().unwrap();
    assert_eq!(
        *log,
        vec![
            ("PoissonsRatio".to_string(), PropertyEvent::Rejected),
            ("YoungsModulus".to_string(), PropertyEvent::Changed),
            ("YoungsModulus".to_string(), PropertyEvent::Rejected),
        ]
    );
}

#[test]
fn constructors_reject_invalid_parameters() {
    assert!(LinearMaterial::<f64>::new(1000.0, 0.7, false).is_err());
    assert!(NeoHookeanMaterial::<f64>::new(-5.0, 0.3).is_err());
    assert!(IncompNeoHookeanMaterial::<f64>::new(500.0, -1.0).is_err());

    let mut ogden = OgdenMaterial::<f64>::default();
    let err = ogden.set_term(2, 100.0, 0.0).unwrap_err();
    assert_eq!(err.property(), "Alpha");
    assert_eq!(ogden.parameters().mu[2], 0.0);
    ogden.set_term(2, 100.0, 4.0).unwrap();
    assert_eq!(ogden.parameters().alpha[2], 4.0);

    let before = *ogden.parameters();
    let err = ogden.set_term(6, 100.0, 2.0).unwrap_err();
    assert_eq!(err.property(), "terms");
    assert_eq!(*ogden.parameters(), before);
}

#[test]
fn property_lists_describe_parameters() {
    let material = LinearMaterial::<f64>::default();
    let names: Vec<_> = material.properties().iter().map(|info| info.name).collect();
    assert_eq!(names, ["viscoBehavior", "YoungsModulus", "PoissonsRatio", "corotated"]);

    let ogden = OgdenMaterial::<f64>::default();
    let mu6 = find_property(ogden.properties(), "Mu6").unwrap();
    assert_eq!(mu6.default_value, "0");
    assert!(find_property(ogden.properties(), "Mu7").is_none());

    for material in all_materials() {
        assert_eq!(material.properties()[0].name, "viscoBehavior", "{}", material.kind());
    }
}

#[test]
fn cloned_materials_are_equal_and_detached() {
    let (observer, log) = recording_observer();
    let mut material = NeoHookeanMaterial::<f64>::new(1000.0, 0.3).unwrap();
    material.set_host_observer(Some(observer));

    let boxed: Box<dyn FemMaterial<f64>> = Box::new(material.clone());
    let mut copy = boxed.clone();
    assert!(boxed.equals(copy.as_ref()));
    assert!(!boxed.equals(&LinearMaterial::<f64>::default()));

    copy.set_visco_behavior(None);
    let mut cloned = material.clone();
    cloned.set_youngs_modulus(5.0).unwrap();
    assert_ne!(cloned, material);
    assert!(log.lock().unwrap().is_empty());
}

proptest! {
    #[test]
    fn stress_and_tangent_are_symmetric(f in deformation_gradient()) {
        let point = DeformedPoint::from_deformation_gradient(f);
        let q = Matrix3::identity();
        for material in all_materials() {
            let sigma = material.compute_stress(&point, &q, None);
            let d = material.compute_tangent(&sigma, &point, &q, None);
            prop_assert!(is_symmetric(&sigma, 1e-10), "{}: {}", material.kind(), sigma);
            prop_assert!(is_symmetric(&d, 1e-8), "{}: {}", material.kind(), d);
        }
    }

    #[test]
    fn tangent_is_consistent_with_stress(e in green_strain(0.1)) {
        let q = Matrix3::identity();
        for material in hyperelastic_materials() {
            let (d, d_fd) = tangent_and_fd_approximation(material.as_ref(), &e, &q);
            let scale = d_fd.abs().max().max(1.0);
            let max_diff = (d - d_fd).abs().max();
            prop_assert!(max_diff <= 1e-5 * scale, "{}: {} vs {}", material.kind(), d, d_fd);
        }
    }

    #[test]
    fn fung_tangent_is_consistent_with_stress_in_rotated_axes(e in green_strain(0.1), r in rotation()) {
        let material = orthotropic_fung();
        let (d, d_fd) = tangent_and_fd_approximation(&material, &e, r.matrix());
        let scale = d_fd.abs().max().max(1.0);
        let max_diff = (d - d_fd).abs().max();
        prop_assert!(max_diff <= 1e-5 * scale, "{} vs {}", d, d_fd);
    }

    #[test]
    fn linear_tangent_is_derivative_of_stress(e in green_strain(0.01)) {
        let eps = strain_to_voigt(&e);
        for material in linear_materials() {
            let (d, d_fd) = linear_tangent_and_fd_approximation(material.as_ref(), &eps);
            let scale = d_fd.abs().max().max(1.0);
            let max_diff = (d - d_fd).abs().max();
            prop_assert!(max_diff <= 1e-5 * scale, "{}: {} vs {}", material.kind(), d, d_fd);
        }
    }
}
