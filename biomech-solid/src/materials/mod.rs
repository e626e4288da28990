//! The built-in material families.
mod fung;
mod incompressible;
mod invariant;
mod linear;
mod neo_hookean;
mod null;
mod ogden;
mod st_venant_kirchhoff;

pub use fung::{FungMaterial, FungParameters};
pub use incompressible::IncompressibleMaterial;
pub use invariant::{
    CubicHyperelasticMaterial, CubicHyperelasticParameters, IncompNeoHookeanMaterial, IncompNeoHookeanParameters,
    MooneyRivlinMaterial, MooneyRivlinParameters,
};
pub use linear::{LinearMaterial, LinearParameters};
pub use neo_hookean::NeoHookeanMaterial;
pub use null::NullMaterial;
pub use ogden::{OgdenMaterial, OgdenParameters, OGDEN_TERMS};
pub use st_venant_kirchhoff::StVenantKirchhoffMaterial;
