//! Evaluation of a material over many integration points.
use crate::{FemMaterial, MaterialStateObject};
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::{DeformedPoint, Real};
use itertools::izip;
use rayon::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointResponse<T: Real> {
    pub stress: Matrix3<T>,
    pub tangent: Matrix6<T>,
}

fn evaluate_point<T: Real>(
    material: &dyn FemMaterial<T>,
    point: &DeformedPoint<T>,
    state: Option<&mut MaterialStateObject>,
    q: &Matrix3<T>,
    excitation: T,
) -> PointResponse<T> {
    let mut stress = Matrix3::zeros();
    let mut tangent = Matrix6::zeros();
    material.compute_response(&mut stress, Some(&mut tangent), point, q, excitation, state);
    PointResponse { stress, tangent }
}

/// Computes stress and tangent at every point.
///
/// Each point is paired with the state object at the same index, which only that point reads
/// and updates.
///
/// # Panics
///
/// Panics if `points` and `states` have different lengths.
pub fn evaluate_points<T: Real>(
    material: &dyn FemMaterial<T>,
    points: &[DeformedPoint<T>],
    states: &mut [Option<MaterialStateObject>],
    q: &Matrix3<T>,
    excitation: T,
) -> Vec<PointResponse<T>> {
    assert_eq!(points.len(), states.len(), "Need exactly one state slot per point");
    izip!(points, states)
        .map(|(point, state)| evaluate_point(material, point, state.as_mut(), q, excitation))
        .collect()
}

/// Parallel version of [`evaluate_points`].
///
/// # Panics
///
/// Panics if `points` and `states` have different lengths.
pub fn evaluate_points_par<T: Real>(
    material: &dyn FemMaterial<T>,
    points: &[DeformedPoint<T>],
    states: &mut [Option<MaterialStateObject>],
    q: &Matrix3<T>,
    excitation: T,
) -> Vec<PointResponse<T>> {
    assert_eq!(points.len(), states.len(), "Need exactly one state slot per point");
    points
        .par_iter()
        .zip(states.par_iter_mut())
        .map(|(point, state)| evaluate_point(material, point, state.as_mut(), q, excitation))
        .collect()
}

/// Creates one state slot per point.
pub fn create_states<T: Real>(material: &dyn FemMaterial<T>, num_points: usize) -> Vec<Option<MaterialStateObject>> {
    (0..num_points)
        .map(|_| material.create_state_object())
        .collect()
}

/// Commits the history of every state at the start of the step `[t0, t1]`.
pub fn advance_states<T: Real>(material: &dyn FemMaterial<T>, states: &mut [Option<MaterialStateObject>], t0: T, t1: T) {
    for state in states.iter_mut().flatten() {
        material.advance_state(state, t0, t1);
    }
}
