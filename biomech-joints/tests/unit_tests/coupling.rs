use crate::unit_tests::{rotation_about_z, tilted_planar_transform};
use biomech::algebra::RigidTransform3;
use biomech::nalgebra::{Translation3, Vector3};
use biomech::proptest::rigid_transform;
use biomech_joints::{LimitBound, PlanarCoordinate, PlanarCoupling};
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;
use std::f64::consts::PI;
use util::assert_approx_matrix_eq;

#[test]
fn planar_projection_of_tilted_transform() {
    let coupling = PlanarCoupling::new();
    let tcd = tilted_planar_transform();

    let tgd = coupling.project_to_constraints(&tcd);
    assert_eq!(tgd.translation.vector, Vector3::new(1.0, 2.0, 0.0));
    assert_scalar_eq!(tgd.rotation.angle(), 0.5, comp = abs, tol = 1e-12);

    assert_scalar_eq!(coupling.coordinate(PlanarCoordinate::X, Some(&tcd)), 1.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(coupling.coordinate(PlanarCoordinate::Y, Some(&tcd)), 2.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(coupling.coordinate(PlanarCoordinate::Theta, Some(&tcd)), 0.5, comp = abs, tol = 1e-12);
}

#[test]
fn detached_coordinates_return_last_set_values() {
    let mut coupling = PlanarCoupling::new();
    assert_eq!(coupling.coordinate(PlanarCoordinate::Y, None), 0.0);
    coupling.set_coordinate(PlanarCoordinate::Y, None, -4.5);
    assert_eq!(coupling.coordinate(PlanarCoordinate::Y, None), -4.5);
    assert_eq!(coupling.coordinate(PlanarCoordinate::X, None), 0.0);
}

#[test]
fn theta_is_unwrapped_near_last_value() {
    let mut coupling = PlanarCoupling::new();
    let tcd = RigidTransform3::from_parts(Translation3::identity(), rotation_about_z(3.5));
    // Without history the principal branch is used
    assert_scalar_eq!(
        coupling.coordinate(PlanarCoordinate::Theta, Some(&tcd)),
        3.5 - 2.0 * PI,
        comp = abs,
        tol = 1e-12
    );

    coupling.set_coordinate(PlanarCoordinate::Theta, None, 3.0);
    assert_scalar_eq!(coupling.coordinate(PlanarCoordinate::Theta, Some(&tcd)), 3.5, comp = abs, tol = 1e-12);

    coupling.set_coordinate(PlanarCoordinate::Theta, None, 7.0);
    let tcd = RigidTransform3::from_parts(Translation3::identity(), rotation_about_z(7.2));
    assert_scalar_eq!(coupling.coordinate(PlanarCoordinate::Theta, Some(&tcd)), 7.2, comp = abs, tol = 1e-12);
}

#[test]
fn set_coordinate_clamps_and_writes_into_transform() {
    let mut coupling = PlanarCoupling::new();
    coupling.set_minimum(PlanarCoordinate::X, -1.0);
    coupling.set_maximum(PlanarCoordinate::X, 2.0);
    assert_eq!(coupling.minimum(PlanarCoordinate::X), -1.0);
    assert_eq!(coupling.maximum(PlanarCoordinate::X), 2.0);

    let mut tgd = tilted_planar_transform();
    coupling.set_coordinate(PlanarCoordinate::X, Some(&mut tgd), 5.0);
    assert_eq!(coupling.coordinate(PlanarCoordinate::X, None), 2.0);
    assert_eq!(tgd.translation.vector.x, 2.0);
    assert_eq!(tgd.translation.vector.y, 2.0);
    assert_eq!(tgd.translation.vector.z, 0.0);

    coupling.set_coordinate(PlanarCoordinate::Theta, Some(&mut tgd), -0.25);
    let expected = RigidTransform3::from_parts(Translation3::new(2.0, 2.0, 0.0), rotation_about_z(-0.25));
    assert_approx_matrix_eq!(tgd.to_homogeneous(), expected.to_homogeneous(), reltol = 1e-14);
}

#[test]
fn constraint_errors_report_bilateral_residuals() {
    let coupling = PlanarCoupling::new();
    assert_eq!(coupling.tolerances().contact_distance, 1e-8);

    let errors = coupling.constraint_errors(&tilted_planar_transform());
    assert_approx_matrix_eq!(errors.bilateral, Vector3::new(3.0, 0.1, 0.0), reltol = 1e-12);
    assert!(errors.limits.is_empty());

    let planar = RigidTransform3::from_parts(Translation3::new(-1.0, 0.5, 0.0), rotation_about_z(1.2));
    let errors = coupling.constraint_errors(&planar);
    assert_approx_matrix_eq!(errors.bilateral, Vector3::<f64>::zeros(), reltol = 1e-12);
}

#[test]
fn constraint_errors_report_engaged_limits() {
    let mut coupling = PlanarCoupling::new();
    coupling.set_minimum(PlanarCoordinate::X, 0.0);
    coupling.set_maximum(PlanarCoordinate::X, 1.0);
    coupling.set_maximum(PlanarCoordinate::Theta, 0.4);
    coupling.set_minimum(PlanarCoordinate::Y, -10.0);

    let errors = coupling.constraint_errors(&tilted_planar_transform());
    assert_eq!(errors.limits.len(), 2);

    let x_limit = &errors.limits[0];
    assert_eq!(x_limit.coordinate, PlanarCoordinate::X);
    assert_eq!(x_limit.bound, LimitBound::Upper);
    assert_scalar_eq!(x_limit.distance, 0.0, comp = abs, tol = 1e-12);

    let theta_limit = &errors.limits[1];
    assert_eq!(theta_limit.coordinate, PlanarCoordinate::Theta);
    assert_eq!(theta_limit.bound, LimitBound::Upper);
    assert_scalar_eq!(theta_limit.distance, -0.1, comp = abs, tol = 1e-12);
}

proptest! {
    #[test]
    fn projection_is_idempotent(tcd in rigid_transform()) {
        let coupling = PlanarCoupling::new();
        let tgd = coupling.project_to_constraints(&tcd);
        let projected_twice = coupling.project_to_constraints(&tgd);
        assert_approx_matrix_eq!(projected_twice.to_homogeneous(), tgd.to_homogeneous(), reltol = 1e-12);
        prop_assert_eq!(tgd.translation.vector.z, 0.0);
    }

    #[test]
    fn set_coordinate_stores_clipped_value(value in -10.0 .. 10.0) {
        let mut coupling = PlanarCoupling::new();
        coupling.set_minimum(PlanarCoordinate::Y, -2.0);
        coupling.set_maximum(PlanarCoordinate::Y, 3.0);
        let mut tgd = RigidTransform3::identity();
        coupling.set_coordinate(PlanarCoordinate::Y, Some(&mut tgd), value);
        let expected = value.max(-2.0).min(3.0);
        prop_assert_eq!(coupling.coordinate(PlanarCoordinate::Y, None), expected);
        prop_assert_eq!(coupling.coordinate(PlanarCoordinate::Y, Some(&tgd)), expected);
    }
}
