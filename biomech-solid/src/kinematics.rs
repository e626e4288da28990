//! Kinematic quantities and stress conversions used by the material models.
use biomech::algebra::mul_left_and_transpose_right;
use biomech::nalgebra::Matrix3;
use biomech::{DeformedPoint, Real};
use log::trace;
use numeric_literals::replace_float_literals;

pub use biomech::algebra::{left_cauchy_green, right_cauchy_green};

/// The Green strain $\vec E = \frac{1}{2} (\vec F^T \vec F - \vec I)$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn green_strain<T: Real>(f: &Matrix3<T>) -> Matrix3<T> {
    (right_cauchy_green(f) - Matrix3::identity()) * 0.5
}

/// $J^{-1/3}$, the scaling that removes the volumetric part of a deformation gradient.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn isochoric_scale<T: Real>(j: T) -> T {
    j.powf(-1.0 / 3.0)
}

/// $\tilde{\vec C} = J^{-2/3} \vec C$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn dev_right_cauchy_green<T: Real>(def: &DeformedPoint<T>) -> Matrix3<T> {
    right_cauchy_green(def.f()) * def.det_f().powf(-2.0 / 3.0)
}

/// $\tilde{\vec B} = J^{-2/3} \vec B$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn dev_left_cauchy_green<T: Real>(def: &DeformedPoint<T>) -> Matrix3<T> {
    left_cauchy_green(def.f()) * def.det_f().powf(-2.0 / 3.0)
}

/// Converts Cauchy stress to second Piola-Kirchhoff stress, $\vec S = J \vec F^{-1} \vec \sigma \vec F^{-T}$.
///
/// Returns zero if the deformation gradient is singular.
pub fn cauchy_to_second_pk<T: Real>(sigma: &Matrix3<T>, def: &DeformedPoint<T>) -> Matrix3<T> {
    match def.f().try_inverse() {
        Some(f_inv) => mul_left_and_transpose_right(sigma, &f_inv) * def.det_f(),
        None => {
            trace!("Singular deformation gradient in stress conversion");
            Matrix3::zeros()
        }
    }
}

/// Converts second Piola-Kirchhoff stress to Cauchy stress, $\vec \sigma = J^{-1} \vec F \vec S \vec F^T$.
///
/// Returns zero if $J = 0$.
pub fn second_pk_to_cauchy<T: Real>(s: &Matrix3<T>, def: &DeformedPoint<T>) -> Matrix3<T> {
    let j = def.det_f();
    if j == T::zero() {
        trace!("Zero volume in stress conversion");
        return Matrix3::zeros();
    }
    mul_left_and_transpose_right(s, def.f()) / j
}

/// Whether a non-invertible material must fall back to the zero response.
pub(crate) fn is_inverted<T: Real>(def: &DeformedPoint<T>) -> bool {
    if def.det_f() > T::zero() {
        false
    } else {
        trace!("Inverted deformation (J = {}), returning zero response", def.det_f());
        true
    }
}
