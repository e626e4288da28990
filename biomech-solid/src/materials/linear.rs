use crate::parameters::{LameParameters, ValidateParameters, YoungPoisson};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{
    fourth_order_identity, polar_decomposition, rotate_tangent, symmetrize, voigt_outer,
};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6, Rotation3};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct LinearParameters<T> {
    pub elastic: YoungPoisson<T>,
    pub corotated: bool,
}

impl<T: Real> Default for LinearParameters<T> {
    fn default() -> Self {
        Self {
            elastic: YoungPoisson::default(),
            corotated: true,
        }
    }
}

impl<T: Real> ValidateParameters for LinearParameters<T> {
    fn validate(&self) -> Result<(), ParameterError> {
        self.elastic.validate()
    }
}

/// The small-strain linear elastic material, optionally corotated.
///
/// With corotation $\vec R$ the strain is measured in the rotated frame,
/// $$
/// \vec \epsilon = \operatorname{sym}(\vec R^T \vec F) - \vec I,
/// $$
/// and the stress $\vec \sigma = \vec R (\lambda \operatorname{tr}(\vec \epsilon) \vec I + 2 \mu \vec \epsilon) \vec R^T$
/// is rotated back. The rotation is taken from the deformed point when present and from the
/// polar decomposition of $\vec F$ otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: LinearParameters<T>,
}

impl<T: Real> Default for LinearMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: LinearParameters::default(),
        }
    }
}

impl<T: Real> LinearMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("YoungsModulus", "Young's modulus", "500000"),
        PropertyInfo::new("PoissonsRatio", "Poisson's ratio", "0.33"),
        PropertyInfo::new("corotated", "apply corotation", "true"),
    ];

    pub fn new(young: T, poisson: T, corotated: bool) -> Result<Self, ParameterError> {
        Self::from_parameters(LinearParameters {
            elastic: YoungPoisson { young, poisson },
            corotated,
        })
    }

    pub fn from_parameters(parameters: LinearParameters<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &LinearParameters<T> {
        &self.parameters
    }

    pub fn youngs_modulus(&self) -> T {
        self.parameters.elastic.young
    }

    pub fn poissons_ratio(&self) -> T {
        self.parameters.elastic.poisson
    }

    pub fn set_youngs_modulus(&mut self, young: T) -> Result<(), ParameterError> {
        let mut candidate = self.parameters;
        candidate.elastic.young = young;
        self.base.update("YoungsModulus", &mut self.parameters, candidate)
    }

    pub fn set_poissons_ratio(&mut self, poisson: T) -> Result<(), ParameterError> {
        let mut candidate = self.parameters;
        candidate.elastic.poisson = poisson;
        self.base.update("PoissonsRatio", &mut self.parameters, candidate)
    }

    pub fn set_corotated(&mut self, corotated: bool) {
        self.parameters.corotated = corotated;
        self.base.host().notify_changed("corotated");
    }

    fn rotation(&self, def: &DeformedPoint<T>) -> Option<Rotation3<T>> {
        if self.parameters.corotated {
            Some(
                def.r()
                    .copied()
                    .unwrap_or_else(|| polar_decomposition(def.f()).0),
            )
        } else {
            None
        }
    }
}

#[allow(non_snake_case)]
impl<T: Real> FemMaterial<T> for LinearMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::Linear
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
        let LameParameters { mu, lambda } = LameParameters::from(self.parameters.elastic);
        let I = Matrix3::identity();
        let R = self.rotation(def);
        let F_local = match &R {
            Some(R) => R.matrix().transpose() * def.f(),
            None => *def.f(),
        };
        let eps = symmetrize(&F_local) - I;
        let sigma = eps * (mu + mu) + I * (lambda * eps.trace());
        match &R {
            Some(R) => R.matrix() * sigma * R.matrix().transpose(),
            None => sigma,
        }
    }

    fn compute_tangent(
        &self,
        _stress: &Matrix3<T>,
        def: &DeformedPoint<T>,
        _q: &Matrix3<T>,
        _base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix6<T> {
        let LameParameters { mu, lambda } = LameParameters::from(self.parameters.elastic);
        let I = Matrix3::identity();
        let d = voigt_outer(&I, &I) * lambda + fourth_order_identity() * (mu + mu);
        match self.rotation(def) {
            Some(R) => rotate_tangent(&d, &R),
            None => d,
        }
    }

    fn is_invertible(&self) -> bool {
        true
    }

    fn is_linear(&self) -> bool {
        true
    }

    fn is_corotated(&self) -> bool {
        self.parameters.corotated
    }
}
