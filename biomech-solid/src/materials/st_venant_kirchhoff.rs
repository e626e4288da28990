use crate::kinematics::{green_strain, second_pk_to_cauchy};
use crate::parameters::{LameParameters, ValidateParameters, YoungPoisson};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{fourth_order_identity, push_forward_tangent, voigt_outer};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};
use log::trace;

/// The Saint Venant-Kirchhoff material model.
///
/// The second Piola-Kirchhoff stress is
/// $$
/// \vec S = \lambda \operatorname{tr}(\vec E) \vec I + 2 \mu \vec E
/// $$
/// with the Green strain $\vec E = \frac{1}{2} (\vec F^T \vec F - \vec I)$, so that the material
/// tangent $\lambda \vec I \otimes \vec I + 2 \mu \mathbb{I}$ is constant and the spatial tangent is
/// $J^{-1} (\lambda \vec B \otimes \vec B + 2 \mu \vec B \odot \vec B)$.
#[derive(Clone, Debug, PartialEq)]
pub struct StVenantKirchhoffMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: YoungPoisson<T>,
}

impl<T: Real> Default for StVenantKirchhoffMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: YoungPoisson::default(),
        }
    }
}

impl<T: Real> StVenantKirchhoffMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("YoungsModulus", "Young's modulus", "500000"),
        PropertyInfo::new("PoissonsRatio", "Poisson's ratio", "0.33"),
    ];

    pub fn new(young: T, poisson: T) -> Result<Self, ParameterError> {
        Self::from_parameters(YoungPoisson { young, poisson })
    }

    pub fn from_parameters(parameters: YoungPoisson<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &YoungPoisson<T> {
        &self.parameters
    }

    pub fn set_youngs_modulus(&mut self, young: T) -> Result<(), ParameterError> {
        let candidate = YoungPoisson { young, ..self.parameters };
        self.base.update("YoungsModulus", &mut self.parameters, candidate)
    }

    pub fn set_poissons_ratio(&mut self, poisson: T) -> Result<(), ParameterError> {
        let candidate = YoungPoisson { poisson, ..self.parameters };
        self.base.update("PoissonsRatio", &mut self.parameters, candidate)
    }
}

#[allow(non_snake_case)]
impl<T: Real> FemMaterial<T> for StVenantKirchhoffMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::StVenantKirchhoff
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
        let LameParameters { mu, lambda } = LameParameters::from(self.parameters);
        let E = green_strain(def.f());
        let S = E * (mu + mu) + Matrix3::identity() * (lambda * E.trace());
        second_pk_to_cauchy(&S, def)
    }

    fn compute_tangent(
        &self,
        _stress: &Matrix3<T>,
        def: &DeformedPoint<T>,
        _q: &Matrix3<T>,
        _base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix6<T> {
        let J = def.det_f();
        if J == T::zero() {
            trace!("Zero volume, returning zero tangent");
            return Matrix6::zeros();
        }
        let LameParameters { mu, lambda } = LameParameters::from(self.parameters);
        let I = Matrix3::identity();
        let C = voigt_outer(&I, &I) * lambda + fourth_order_identity() * (mu + mu);
        push_forward_tangent(&C, def.f()) / J
    }

    fn is_invertible(&self) -> bool {
        true
    }
}
