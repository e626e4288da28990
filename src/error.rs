//! Error types shared across the workspace.
use std::error::Error;
use std::fmt;

/// A material or joint parameter was rejected by validation.
///
/// The rejected value is never stored: the owner keeps its previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterError {
    property: &'static str,
    reason: String,
}

impl ParameterError {
    pub fn new(property: &'static str, reason: impl Into<String>) -> Self {
        Self {
            property,
            reason: reason.into(),
        }
    }

    /// The name of the offending property, e.g. `"PoissonsRatio"`.
    pub fn property(&self) -> &'static str {
        self.property
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid value for property '{}': {}", self.property, self.reason)
    }
}

impl Error for ParameterError {}

/// The deformation gradient of a material point is not admissible for a material
/// that does not support inverted elements.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InvalidDeformation<T> {
    pub det_f: T,
}

impl<T: fmt::Display> fmt::Display for InvalidDeformation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Non-positive deformation gradient determinant ({}) for a non-invertible material",
            self.det_f
        )
    }
}

impl<T: fmt::Debug + fmt::Display> Error for InvalidDeformation<T> {}

/// Node numbers and shape-function weights of a material point do not agree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProvenanceError {
    /// The two sequences have different lengths.
    LengthMismatch { num_numbers: usize, num_weights: usize },
    /// The weights do not sum to one.
    WeightsNotNormalized,
}

impl fmt::Display for ProvenanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                num_numbers,
                num_weights,
            } => write!(
                f,
                "Got {} node numbers but {} node weights",
                num_numbers, num_weights
            ),
            Self::WeightsNotNormalized => write!(f, "Node weights do not sum to one"),
        }
    }
}

impl Error for ProvenanceError {}
