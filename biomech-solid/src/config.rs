//! Serializable material descriptions.
//!
//! A [`MaterialConfig`] is the declarative counterpart of a material instance: the model family
//! with its parameter record and an optional viscoelastic behavior. Parameters that are left
//! out take their default values.
use crate::parameters::{BulkParameters, ValidateParameters, YoungPoisson};
use crate::viscoelastic::{QlvBehavior, ViscoelasticBehavior};
use crate::{
    CubicHyperelasticMaterial, CubicHyperelasticParameters, FemMaterial, FungMaterial, FungParameters,
    IncompNeoHookeanMaterial, IncompNeoHookeanParameters, IncompressibleMaterial, LinearMaterial, LinearParameters,
    MaterialKind, MooneyRivlinMaterial, MooneyRivlinParameters, NeoHookeanMaterial, NullMaterial, OgdenMaterial,
    OgdenParameters, StVenantKirchhoffMaterial,
};
use biomech::Real;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", bound(deserialize = "T: Real + Deserialize<'de>"))]
pub enum ModelConfig<T> {
    Linear(LinearParameters<T>),
    StVenantKirchhoff(YoungPoisson<T>),
    NeoHookean(YoungPoisson<T>),
    IncompNeoHookean(IncompNeoHookeanParameters<T>),
    MooneyRivlin(MooneyRivlinParameters<T>),
    Ogden(OgdenParameters<T>),
    Fung(FungParameters<T>),
    CubicHyperelastic(CubicHyperelasticParameters<T>),
    Incompressible(BulkParameters<T>),
    Null,
}

impl<T: Real> ModelConfig<T> {
    pub fn kind(&self) -> MaterialKind {
        match self {
            Self::Linear(_) => MaterialKind::Linear,
            Self::StVenantKirchhoff(_) => MaterialKind::StVenantKirchhoff,
            Self::NeoHookean(_) => MaterialKind::NeoHookean,
            Self::IncompNeoHookean(_) => MaterialKind::IncompNeoHookean,
            Self::MooneyRivlin(_) => MaterialKind::MooneyRivlin,
            Self::Ogden(_) => MaterialKind::Ogden,
            Self::Fung(_) => MaterialKind::Fung,
            Self::CubicHyperelastic(_) => MaterialKind::CubicHyperelastic,
            Self::Incompressible(_) => MaterialKind::Incompressible,
            Self::Null => MaterialKind::Null,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct MaterialConfig<T> {
    pub model: ModelConfig<T>,
    #[serde(default)]
    pub visco_behavior: Option<QlvBehavior<T>>,
}

impl<T: Real> MaterialConfig<T> {
    pub fn new(model: ModelConfig<T>) -> Self {
        Self {
            model,
            visco_behavior: None,
        }
    }

    pub fn with_visco_behavior(self, visco_behavior: QlvBehavior<T>) -> Self {
        Self {
            visco_behavior: Some(visco_behavior),
            ..self
        }
    }

    /// Validates the configuration and creates the material it describes.
    pub fn build(&self) -> eyre::Result<Box<dyn FemMaterial<T>>> {
        let kind = self.model.kind();
        let mut material: Box<dyn FemMaterial<T>> = match &self.model {
            ModelConfig::Linear(p) => Box::new(LinearMaterial::from_parameters(*p)?),
            ModelConfig::StVenantKirchhoff(p) => Box::new(StVenantKirchhoffMaterial::from_parameters(*p)?),
            ModelConfig::NeoHookean(p) => Box::new(NeoHookeanMaterial::from_parameters(*p)?),
            ModelConfig::IncompNeoHookean(p) => Box::new(IncompNeoHookeanMaterial::from_parameters(*p)?),
            ModelConfig::MooneyRivlin(p) => Box::new(MooneyRivlinMaterial::from_parameters(*p)?),
            ModelConfig::Ogden(p) => Box::new(OgdenMaterial::from_parameters(*p)?),
            ModelConfig::Fung(p) => Box::new(FungMaterial::from_parameters(*p)?),
            ModelConfig::CubicHyperelastic(p) => Box::new(CubicHyperelasticMaterial::from_parameters(*p)?),
            ModelConfig::Incompressible(p) => Box::new(IncompressibleMaterial::from_parameters(*p)?),
            ModelConfig::Null => Box::new(NullMaterial::new()),
        };
        if let Some(visco_behavior) = &self.visco_behavior {
            visco_behavior
                .validate()
                .wrap_err_with(|| format!("Invalid viscoelastic behavior for {} material", kind))?;
            material.set_visco_behavior(Some(visco_behavior as &dyn ViscoelasticBehavior<T>));
        }
        Ok(material)
    }
}
