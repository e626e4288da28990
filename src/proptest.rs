//! Strategies for property-based testing of materials and joints.
use crate::algebra::symmetrize;
use ::proptest::prelude::*;
use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};

pub fn point3() -> impl Strategy<Value = Point3<f64>> {
    // Keep coordinates moderate so that composed transforms stay well conditioned
    let range = -10.0..10.0;
    [range.clone(), range.clone(), range].prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Deformation gradients $\vec I + \vec H$ with $|H_{ij}| \leq 0.3$.
///
/// The Frobenius norm of $\vec H$ stays below one, so the determinant is always positive.
pub fn deformation_gradient() -> impl Strategy<Value = Matrix3<f64>> {
    let range = -0.3..0.3;
    [
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range,
    ]
    .prop_map(|h| Matrix3::identity() + Matrix3::from_row_slice(&h))
}

/// Symmetric Green strains with every component in `[-max_component, max_component]`.
pub fn green_strain(max_component: f64) -> impl Strategy<Value = Matrix3<f64>> {
    let range = -max_component..=max_component;
    [
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range.clone(),
        range,
    ]
    .prop_map(|[e00, e11, e22, e01, e12, e02]| {
        symmetrize(&Matrix3::new(e00, e01, e02, e01, e11, e12, e02, e12, e22))
    })
}

pub fn rotation() -> impl Strategy<Value = Rotation3<f64>> {
    let range = -3.0..3.0;
    [range.clone(), range.clone(), range].prop_map(|[x, y, z]| Rotation3::new(Vector3::new(x, y, z)))
}

pub fn rigid_transform() -> impl Strategy<Value = Isometry3<f64>> {
    (point3(), rotation()).prop_map(|(p, r)| {
        Isometry3::from_parts(Translation3::from(p.coords), UnitQuaternion::from_rotation_matrix(&r))
    })
}
