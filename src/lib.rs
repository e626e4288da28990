//! Core types for biomechanical finite element simulation.
//!
//! This crate holds the pieces shared by the constitutive material layer (`biomech-solid`) and the
//! joint coupling layer (`biomech-joints`): tensor algebra in Voigt form, the deformed material
//! point handed from elements to materials, host property notification and the common error types.
use nalgebra::RealField;

pub mod algebra;
pub mod deformed_point;
pub mod error;
pub mod property;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

pub use deformed_point::DeformedPoint;

/// Scalar type used by the generic numeric routines in `biomech`.
///
/// Used as a trait alias for `RealField + Copy`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
