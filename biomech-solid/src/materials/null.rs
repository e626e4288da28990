use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};

/// A material without any stress response.
#[derive(Clone, Debug, PartialEq)]
pub struct NullMaterial<T: Real> {
    base: MaterialBase<T>,
}

impl<T: Real> Default for NullMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
        }
    }
}

impl<T: Real> NullMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] =
        &[PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null")];

    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Real> FemMaterial<T> for NullMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::Null
    }

    fn properties(&self) -> &'static [PropertyInfo] {
        Self::PROPERTIES
    }

    fn compute_stress(
        &self,
        _def: &DeformedPoint<T>,
        _q: &Matrix3<T>,
        _base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix3<T> {
        Matrix3::zeros()
    }

    fn compute_tangent(
        &self,
        _stress: &Matrix3<T>,
        _def: &DeformedPoint<T>,
        _q: &Matrix3<T>,
        _base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix6<T> {
        Matrix6::zeros()
    }

    fn is_invertible(&self) -> bool {
        true
    }

    fn is_linear(&self) -> bool {
        true
    }
}
