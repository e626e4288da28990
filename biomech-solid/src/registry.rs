use crate::{
    CubicHyperelasticMaterial, FemMaterial, FungMaterial, IncompNeoHookeanMaterial, IncompressibleMaterial,
    LinearMaterial, MaterialKind, MooneyRivlinMaterial, NeoHookeanMaterial, NullMaterial, OgdenMaterial,
    StVenantKirchhoffMaterial,
};
use biomech::Real;
use eyre::eyre;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use std::fmt;

type MaterialFactory<T> = Box<dyn Fn() -> Box<dyn FemMaterial<T>> + Send + Sync>;

/// Named factories for creating materials with default parameters.
///
/// Families are kept in registration order, which is the order in which a host should offer
/// them for selection.
pub struct MaterialRegistry<T: Real> {
    factories: FxHashMap<String, MaterialFactory<T>>,
    names: Vec<String>,
}

impl<T: Real> Default for MaterialRegistry<T> {
    fn default() -> Self {
        Self {
            factories: FxHashMap::default(),
            names: Vec::new(),
        }
    }
}

impl<T: Real> fmt::Debug for MaterialRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialRegistry")
            .field("names", &self.names)
            .finish()
    }
}

impl<T: Real> MaterialRegistry<T> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry containing all built-in material families.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(MaterialKind::Linear.name(), || Box::new(LinearMaterial::<T>::default()));
        registry.register(MaterialKind::StVenantKirchhoff.name(), || {
            Box::new(StVenantKirchhoffMaterial::<T>::default())
        });
        registry.register(MaterialKind::NeoHookean.name(), || Box::new(NeoHookeanMaterial::<T>::default()));
        registry.register(MaterialKind::IncompNeoHookean.name(), || {
            Box::new(IncompNeoHookeanMaterial::<T>::default())
        });
        registry.register(MaterialKind::MooneyRivlin.name(), || Box::new(MooneyRivlinMaterial::<T>::default()));
        registry.register(MaterialKind::Ogden.name(), || Box::new(OgdenMaterial::<T>::default()));
        registry.register(MaterialKind::Fung.name(), || Box::new(FungMaterial::<T>::default()));
        registry.register(MaterialKind::CubicHyperelastic.name(), || {
            Box::new(CubicHyperelasticMaterial::<T>::default())
        });
        registry.register(MaterialKind::Incompressible.name(), || {
            Box::new(IncompressibleMaterial::<T>::default())
        });
        registry.register(MaterialKind::Null.name(), || Box::new(NullMaterial::<T>::default()));
        registry
    }

    /// Registers a factory under `name`.
    ///
    /// Returns `false` and leaves the registry unchanged if the name is already taken.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> bool
    where
        F: Fn() -> Box<dyn FemMaterial<T>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            warn!("Material '{}' is already registered, keeping the existing factory", name);
            return false;
        }
        debug!("Registering material '{}'", name);
        self.factories.insert(name.clone(), Box::new(factory));
        self.names.push(name);
        true
    }

    /// Creates a material with default parameters.
    pub fn create(&self, name: &str) -> eyre::Result<Box<dyn FemMaterial<T>>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| eyre!("Unknown material type '{}'", name))?;
        Ok(factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
