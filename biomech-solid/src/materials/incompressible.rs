//! Decoupled isochoric/volumetric response shared by the incompressible material families.
//!
//! An incompressible material splits its response into an isochoric part, computed from the
//! isochoric deformation gradient $\bar{\vec F} = J^{-1/3} \vec F$, and a volumetric part
//! $\vec \sigma_{vol} = p \vec I$, where $p$ is the averaged pressure supplied with the deformed
//! point. Each model provides the fictitious Kirchhoff stress $\bar{\vec \tau}$ and the fictitious
//! spatial elasticity $\bar{\vec c}$, both obtained by pushing the fictitious material quantities
//! forward with $\bar{\vec F}$. Then
//! $$
//! \vec \sigma_{iso} = J^{-1} \operatorname{dev} \bar{\vec \tau}, \quad
//! J \vec c_{iso} = \mathbb{P} : \bar{\vec c} : \mathbb{P}
//!     + \tfrac{2}{3} \operatorname{tr}(\bar{\vec \tau}) \mathbb{P}
//!     - \tfrac{2}{3} (\vec I \otimes \vec \tau_{iso} + \vec \tau_{iso} \otimes \vec I),
//! $$
//! with $\vec \tau_{iso} = \operatorname{dev} \bar{\vec \tau}$ and
//! $\vec c_{vol} = p (\vec I \otimes \vec I - 2 \mathbb{I})$.
use crate::kinematics::{is_inverted, isochoric_scale};
use crate::parameters::{BulkParameters, ValidateParameters};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{
    deviatoric, deviatoric_projector, double_contraction, fourth_order_identity, voigt_outer,
};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};
use numeric_literals::replace_float_literals;

/// The isochoric part of an incompressible material.
pub(crate) trait IsochoricModel<T: Real> {
    /// The fictitious Kirchhoff stress $\bar{\vec \tau}$ at the isochoric deformation gradient.
    fn fictitious_stress(&self, f_bar: &Matrix3<T>, q: &Matrix3<T>) -> Matrix3<T>;

    /// The fictitious spatial elasticity $\bar{\vec c}$ at the isochoric deformation gradient.
    fn fictitious_tangent(&self, f_bar: &Matrix3<T>, q: &Matrix3<T>) -> Matrix6<T>;
}

pub(crate) fn volumetric_stress<T: Real>(p: T) -> Matrix3<T> {
    Matrix3::identity() * p
}

#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub(crate) fn volumetric_tangent<T: Real>(p: T) -> Matrix6<T> {
    let i = Matrix3::identity();
    (voigt_outer(&i, &i) - fourth_order_identity() * 2.0) * p
}

#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub(crate) fn isochoric_tangent<T: Real>(tau_bar: &Matrix3<T>, c_bar: &Matrix6<T>, j: T) -> Matrix6<T> {
    let i = Matrix3::identity();
    let projector = deviatoric_projector();
    let tau_iso = deviatoric(tau_bar);
    let projected = double_contraction(&double_contraction(&projector, c_bar), &projector);
    let c = projected + projector * (tau_bar.trace() * 2.0 / 3.0)
        - (voigt_outer(&i, &tau_iso) + voigt_outer(&tau_iso, &i)) * (2.0 / 3.0);
    c / j
}

pub(crate) fn decoupled_stress<T: Real>(
    model: &impl IsochoricModel<T>,
    def: &DeformedPoint<T>,
    q: &Matrix3<T>,
) -> Matrix3<T> {
    if is_inverted(def) {
        return Matrix3::zeros();
    }
    let j = def.det_f();
    let f_bar = def.f() * isochoric_scale(j);
    let tau_bar = model.fictitious_stress(&f_bar, q);
    deviatoric(&tau_bar) / j + volumetric_stress(def.average_pressure())
}

pub(crate) fn decoupled_tangent<T: Real>(
    model: &impl IsochoricModel<T>,
    def: &DeformedPoint<T>,
    q: &Matrix3<T>,
) -> Matrix6<T> {
    if is_inverted(def) {
        return Matrix6::zeros();
    }
    let j = def.det_f();
    let f_bar = def.f() * isochoric_scale(j);
    let tau_bar = model.fictitious_stress(&f_bar, q);
    let c_bar = model.fictitious_tangent(&f_bar, q);
    isochoric_tangent(&tau_bar, &c_bar, j) + volumetric_tangent(def.average_pressure())
}

/// A purely volumetric material: $\vec \sigma = p \vec I$.
///
/// Typically combined with another material that provides the deviatoric response.
#[derive(Clone, Debug, PartialEq)]
pub struct IncompressibleMaterial<T: Real> {
    base: MaterialBase<T>,
    bulk: BulkParameters<T>,
}

impl<T: Real> Default for IncompressibleMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            bulk: BulkParameters::default(),
        }
    }
}

impl<T: Real> IncompressibleMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("bulkModulus", "bulk modulus for incompressibility", "100000"),
        PropertyInfo::new("bulkPotential", "incompressibility potential function", "QUADRATIC"),
    ];

    pub fn from_parameters(bulk: BulkParameters<T>) -> Result<Self, ParameterError> {
        bulk.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            bulk,
        })
    }

    pub fn set_bulk_parameters(&mut self, bulk: BulkParameters<T>) -> Result<(), ParameterError> {
        self.base.update("bulkModulus", &mut self.bulk, bulk)
    }
}

impl<T: Real> FemMaterial<T> for IncompressibleMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::Incompressible
    }

    fn properties(&self) -> &'static [PropertyInfo] {
        Self::PROPERTIES
    }

    fn compute_stress(
        &self,
        def: &DeformedPoint<T>,
        _q: &Matrix3<T>,
        _base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix3<T> {
        if is_inverted(def) {
            return Matrix3::zeros();
        }
        volumetric_stress(def.average_pressure())
    }

    fn compute_tangent(
        &self,
        _stress: &Matrix3<T>,
        def: &DeformedPoint<T>,
        _q: &Matrix3<T>,
        _base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix6<T> {
        if is_inverted(def) {
            return Matrix6::zeros();
        }
        volumetric_tangent(def.average_pressure())
    }

    fn is_incompressible(&self) -> bool {
        true
    }

    fn bulk_parameters(&self) -> Option<&BulkParameters<T>> {
        Some(&self.bulk)
    }
}
