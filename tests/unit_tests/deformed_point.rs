use biomech::error::ProvenanceError;
use biomech::nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use biomech::proptest::deformation_gradient;
use biomech::DeformedPoint;
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;
use util::assert_approx_matrix_eq;

#[test]
fn new_point_is_undeformed() {
    let point = DeformedPoint::<f64>::new();
    assert_eq!(point.f(), &Matrix3::identity());
    assert_eq!(point.det_f(), 1.0);
    assert_eq!(point.average_pressure(), 0.0);
    assert!(point.r().is_none());
    assert!(point.element_number().is_none());
    assert!(point.point_index().is_none());
    assert!(point.node_numbers().is_empty());
    assert_eq!(point, DeformedPoint::default());
}

#[test]
fn inverted_deformation_is_stored() {
    let f = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -0.5));
    let point = DeformedPoint::from_deformation_gradient(f);
    assert_eq!(point.f(), &f);
    assert_eq!(point.det_f(), -0.5);
}

#[test]
fn corotation_is_orthonormalized() {
    let mut point = DeformedPoint::<f64>::new();
    let r = Rotation3::from_scaled_axis(Vector3::new(0.2, 0.4, -0.1));
    let perturbed = r.matrix() * Matrix3::from_diagonal(&Vector3::new(1.01, 0.99, 1.0));
    point.set_r(Some(&perturbed));
    let stored = point.r().unwrap();
    assert_approx_matrix_eq!(*stored.matrix(), *r.matrix(), reltol = 1e-12);

    point.set_r(None);
    assert!(point.r().is_none());
}

#[test]
fn node_provenance() {
    let mut point = DeformedPoint::<f64>::new();
    point.set_nodes(&[3, 8, 11], &[0.25, 0.25, 0.5]).unwrap();
    let nodes: Vec<_> = point.nodes().collect();
    assert_eq!(nodes, vec![(3, 0.25), (8, 0.25), (11, 0.5)]);

    assert_eq!(
        point.set_nodes(&[1, 2], &[1.0]),
        Err(ProvenanceError::LengthMismatch {
            num_numbers: 2,
            num_weights: 1
        })
    );
    assert_eq!(
        point.set_nodes(&[1, 2], &[0.5, 0.6]),
        Err(ProvenanceError::WeightsNotNormalized)
    );
    // Rejected provenance leaves the previous nodes in place
    assert_eq!(point.node_numbers(), &[3, 8, 11]);
    assert_eq!(point.node_weights(), &[0.25, 0.25, 0.5]);

    point.set_nodes(&[], &[]).unwrap();
    assert!(point.node_numbers().is_empty());
}

#[test]
fn reset_restores_undeformed_state() {
    let mut point = DeformedPoint::from_deformation_gradient(Matrix3::new(1.2, 0.1, 0.0, 0.0, 0.9, 0.0, 0.0, 0.3, 1.1));
    point.set_average_pressure(12.0);
    point.set_r(Some(&Matrix3::identity()));
    point.set_positions(Point3::new(1.0, 2.0, 3.0), Point3::new(1.5, 2.0, 3.0));
    point.set_provenance(Some(4), Some(1));
    point.set_nodes(&[0, 1], &[0.5, 0.5]).unwrap();
    assert_eq!(point.element_number(), Some(4));
    assert_eq!(point.spatial_position(), &Point3::new(1.5, 2.0, 3.0));

    point.reset();
    assert_eq!(point, DeformedPoint::new());
}

proptest! {
    #[test]
    fn determinant_follows_deformation_gradient(f in deformation_gradient()) {
        let mut point = DeformedPoint::new();
        point.set_f(&f);
        assert_scalar_eq!(point.det_f(), f.determinant(), comp = float);
        prop_assert!(point.det_f() > 0.0);
        assert_approx_matrix_eq!(*point.f(), f, reltol = 1e-14);
    }
}
