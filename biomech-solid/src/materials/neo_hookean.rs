use crate::kinematics::{is_inverted, left_cauchy_green};
use crate::parameters::{LameParameters, ValidateParameters, YoungPoisson};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{fourth_order_identity, voigt_outer};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};

/// The compressible Neo-Hookean material model.
///
/// The strain energy density is given by
/// $$
/// \psi(\vec F) = \frac{\mu}{2}(I_C - 3) - \mu \ln J + \frac{\lambda}{2}(\ln J)^2,
/// $$
/// which yields the Cauchy stress
/// $$
/// \vec \sigma = \frac{\mu}{J} (\vec B - \vec I) + \frac{\lambda \ln J}{J} \vec I
/// $$
/// and the spatial tangent
/// $\frac{\lambda}{J} \vec I \otimes \vec I + \frac{2 (\mu - \lambda \ln J)}{J} \mathbb{I}$.
#[derive(Clone, Debug, PartialEq)]
pub struct NeoHookeanMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: YoungPoisson<T>,
}

impl<T: Real> Default for NeoHookeanMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: YoungPoisson::default(),
        }
    }
}

impl<T: Real> NeoHookeanMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("YoungsModulus", "Young's modulus", "500000"),
        PropertyInfo::new("PoissonsRatio", "Poisson's ratio", "0.33"),
    ];

    pub fn new(young: T, poisson: T) -> Result<Self, ParameterError> {
        Self::from_parameters(YoungPoisson { young, poisson })
    }

    /// Creates the material from a shear modulus and a bulk modulus.
    pub fn from_shear_and_bulk(mu: T, bulk: T) -> Result<Self, ParameterError> {
        Self::from_parameters(YoungPoisson::from_shear_and_bulk(mu, bulk))
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
impl<T: Real> FemMaterial<T> for NeoHookeanMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::NeoHookean
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
        let LameParameters { mu, lambda } = LameParameters::from(self.parameters);
        let J = def.det_f();
        let I = Matrix3::identity();
        let B = left_cauchy_green(def.f());
        (B - I) * (mu / J) + I * (lambda * J.ln() / J)
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
        let LameParameters { mu, lambda } = LameParameters::from(self.parameters);
        let J = def.det_f();
        let I = Matrix3::identity();
        let shear = (mu - lambda * J.ln()) / J;
        voigt_outer(&I, &I) * (lambda / J) + fourth_order_identity() * (shear + shear)
    }
}
