use crate::algebra::nearest_rotation;
use crate::error::ProvenanceError;
use crate::Real;
use itertools::izip;
use nalgebra::{Matrix3, Point3, Rotation3};
use numeric_literals::replace_float_literals;

/// The deformation state of a single material (integration) point.
///
/// Produced by an element for each of its integration points and consumed by a material to
/// compute stress and tangent. The deformation gradient and its determinant are only ever
/// updated together.
#[derive(Debug, Clone, PartialEq)]
pub struct DeformedPoint<T: Real> {
    f: Matrix3<T>,
    det_f: T,
    average_pressure: T,
    r: Option<Rotation3<T>>,
    rest_position: Point3<T>,
    spatial_position: Point3<T>,
    element_number: Option<usize>,
    point_index: Option<usize>,
    node_numbers: Vec<usize>,
    node_weights: Vec<T>,
}

impl<T: Real> Default for DeformedPoint<T> {
    fn default() -> Self {
        Self {
            f: Matrix3::identity(),
            det_f: T::one(),
            average_pressure: T::zero(),
            r: None,
            rest_position: Point3::origin(),
            spatial_position: Point3::origin(),
            element_number: None,
            point_index: None,
            node_numbers: Vec::new(),
            node_weights: Vec::new(),
        }
    }
}

impl<T: Real> DeformedPoint<T> {
    /// An undeformed point with no provenance.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_deformation_gradient(f: Matrix3<T>) -> Self {
        let mut point = Self::default();
        point.set_f(&f);
        point
    }

    pub fn f(&self) -> &Matrix3<T> {
        &self.f
    }

    /// $J = \det \vec F$.
    pub fn det_f(&self) -> T {
        self.det_f
    }

    pub fn average_pressure(&self) -> T {
        self.average_pressure
    }

    /// The corotation, present only when the point is evaluated by a corotated material.
    pub fn r(&self) -> Option<&Rotation3<T>> {
        self.r.as_ref()
    }

    pub fn rest_position(&self) -> &Point3<T> {
        &self.rest_position
    }

    pub fn spatial_position(&self) -> &Point3<T> {
        &self.spatial_position
    }

    pub fn element_number(&self) -> Option<usize> {
        self.element_number
    }

    pub fn point_index(&self) -> Option<usize> {
        self.point_index
    }

    pub fn node_numbers(&self) -> &[usize] {
        &self.node_numbers
    }

    pub fn node_weights(&self) -> &[T] {
        &self.node_weights
    }

    /// Iterates over `(node number, weight)` pairs.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        izip!(&self.node_numbers, &self.node_weights).map(|(&n, &w)| (n, w))
    }

    /// Sets the deformation gradient and recomputes its determinant.
    ///
    /// A non-positive determinant is stored as-is. Materials that cannot handle inverted
    /// elements report it through their deformation validation.
    pub fn set_f(&mut self, f: &Matrix3<T>) {
        self.f = *f;
        self.det_f = f.determinant();
    }

    /// Sets or clears the corotation. The stored value is the rotation nearest to `r`.
    pub fn set_r(&mut self, r: Option<&Matrix3<T>>) {
        self.r = r.map(nearest_rotation);
    }

    pub fn set_average_pressure(&mut self, p: T) {
        self.average_pressure = p;
    }

    pub fn set_positions(&mut self, rest_position: Point3<T>, spatial_position: Point3<T>) {
        self.rest_position = rest_position;
        self.spatial_position = spatial_position;
    }

    pub fn set_provenance(&mut self, element_number: Option<usize>, point_index: Option<usize>) {
        self.element_number = element_number;
        self.point_index = point_index;
    }

    /// Sets the nodes contributing to this point together with their shape-function weights.
    ///
    /// The previous nodes are retained if the sequences differ in length or the weights do not
    /// sum to one.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn set_nodes(&mut self, numbers: &[usize], weights: &[T]) -> Result<(), ProvenanceError> {
        if numbers.len() != weights.len() {
            return Err(ProvenanceError::LengthMismatch {
                num_numbers: numbers.len(),
                num_weights: weights.len(),
            });
        }
        if !weights.is_empty() {
            let sum = weights.iter().fold(T::zero(), |acc, &w| acc + w);
            if (sum - 1.0).abs() > 1e-8 {
                return Err(ProvenanceError::WeightsNotNormalized);
            }
        }
        self.node_numbers = numbers.to_vec();
        self.node_weights = weights.to_vec();
        Ok(())
    }

    /// Returns the point to the undeformed state without provenance, keeping allocations.
    pub fn reset(&mut self) {
        self.set_f(&Matrix3::identity());
        self.average_pressure = T::zero();
        self.r = None;
        self.rest_position = Point3::origin();
        self.spatial_position = Point3::origin();
        self.element_number = None;
        self.point_index = None;
        self.node_numbers.clear();
        self.node_weights.clear();
    }
}
