//! Constitutive material models for `biomech`.
//!
//! A material turns the deformation state of a single integration point, a [`DeformedPoint`],
//! into the Cauchy stress $\vec \sigma$ and the spatial tangent stiffness $\vec D$ (in Voigt form,
//! see [`biomech::algebra`]) consumed by an implicit finite element solver.
use biomech::error::{InvalidDeformation, ParameterError};
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::{HostLink, PropertyInfo, PropertyObserver};
use biomech::{DeformedPoint, Real};
use log::warn;
use std::any::Any;
use std::fmt;
use std::fmt::Debug;

pub mod batch;
pub mod config;
pub mod kinematics;
pub mod materials;
pub mod parameters;
pub mod registry;
pub mod viscoelastic;

pub use materials::*;
pub use parameters::{BulkParameters, BulkPotential, LameParameters, ValidateParameters, YoungPoisson};
pub use viscoelastic::{PronyTerm, QlvBehavior, QlvState, ViscoelasticBehavior};

/// Family tag of a material.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Linear,
    StVenantKirchhoff,
    NeoHookean,
    IncompNeoHookean,
    MooneyRivlin,
    Ogden,
    Fung,
    CubicHyperelastic,
    Incompressible,
    Null,
    /// A material defined outside this crate, identified by its registry name.
    Custom(&'static str),
}

impl MaterialKind {
    /// The name under which the family is registered.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::StVenantKirchhoff => "st_venant_kirchhoff",
            Self::NeoHookean => "neo_hookean",
            Self::IncompNeoHookean => "incomp_neo_hookean",
            Self::MooneyRivlin => "mooney_rivlin",
            Self::Ogden => "ogden",
            Self::Fung => "fung",
            Self::CubicHyperelastic => "cubic_hyperelastic",
            Self::Incompressible => "incompressible",
            Self::Null => "null",
            Self::Custom(name) => *name,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Opaque per-point state of a history-dependent material.
///
/// Created by [`FemMaterial::create_state_object`] and exclusively owned by a single
/// integration point.
pub struct MaterialStateObject {
    inner: Box<dyn Any + Send>,
}

impl MaterialStateObject {
    pub fn new<S: Any + Send>(state: S) -> Self {
        Self { inner: Box::new(state) }
    }

    pub fn downcast_ref<S: Any>(&self) -> Option<&S> {
        self.inner.downcast_ref()
    }

    pub fn downcast_mut<S: Any>(&mut self) -> Option<&mut S> {
        self.inner.downcast_mut()
    }
}

impl Debug for MaterialStateObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialStateObject").finish_non_exhaustive()
    }
}

/// Data shared by all materials: the optional viscoelastic behavior and the host link.
///
/// Cloning deep-copies the behavior and detaches the clone from the host. Equality only
/// considers the behavior.
#[derive(Debug)]
pub struct MaterialBase<T: Real> {
    visco_behavior: Option<Box<dyn ViscoelasticBehavior<T>>>,
    host: HostLink,
}

impl<T: Real> Default for MaterialBase<T> {
    fn default() -> Self {
        Self {
            visco_behavior: None,
            host: HostLink::default(),
        }
    }
}

impl<T: Real> Clone for MaterialBase<T> {
    fn clone(&self) -> Self {
        Self {
            visco_behavior: self.visco_behavior.clone(),
            host: HostLink::default(),
        }
    }
}

impl<T: Real> PartialEq for MaterialBase<T> {
    fn eq(&self, other: &Self) -> bool {
        self.visco_behavior == other.visco_behavior
    }
}

impl<T: Real> MaterialBase<T> {
    pub fn visco_behavior(&self) -> Option<&dyn ViscoelasticBehavior<T>> {
        self.visco_behavior.as_deref()
    }

    pub fn visco_behavior_mut(&mut self) -> Option<&mut dyn ViscoelasticBehavior<T>> {
        match &mut self.visco_behavior {
            Some(behavior) => Some(behavior.as_mut()),
            None => None,
        }
    }

    /// Stores a deep copy of `behavior`, or removes the current one.
    pub fn set_visco_behavior(&mut self, behavior: Option<&dyn ViscoelasticBehavior<T>>) {
        self.visco_behavior = behavior.map(|behavior| behavior.clone_behavior());
        self.host.notify_changed("viscoBehavior");
    }

    pub fn host(&self) -> &HostLink {
        &self.host
    }

    pub fn set_host_observer(&mut self, observer: Option<PropertyObserver>) {
        self.host.set_observer(observer);
    }

    /// Replaces `current` by `candidate` if the candidate passes validation.
    ///
    /// Either way the host is told about the outcome. A rejected candidate is logged and
    /// `current` keeps its value.
    pub fn update<P: ValidateParameters>(
        &self,
        property: &'static str,
        current: &mut P,
        candidate: P,
    ) -> Result<(), ParameterError> {
        match candidate.validate() {
            Ok(()) => {
                *current = candidate;
                self.host.notify_changed(property);
                Ok(())
            }
            Err(err) => {
                warn!("Rejected new value for '{}': {}", property, err);
                self.host.notify_rejected(property);
                Err(err)
            }
        }
    }
}

/// A constitutive model for finite element integration points.
///
/// Stress is always the symmetric Cauchy stress. The tangent is the spatial elasticity tensor
/// $\vec c = J^{-1} \chi_* \left( \pd{\vec S}{\vec E} \right)$ for nonlinear materials and the
/// small-strain modulus $\pd{\vec \sigma}{\vec \epsilon}$ for linear ones.
///
/// Evaluation never fails. A material that does not support inverted elements returns zero
/// stress and tangent when $J \leq 0$, and reports the problem through
/// [`validate_deformation`](Self::validate_deformation).
pub trait FemMaterial<T: Real>: Debug + Send + Sync + 'static {
    fn kind(&self) -> MaterialKind;

    fn base(&self) -> &MaterialBase<T>;

    fn base_mut(&mut self) -> &mut MaterialBase<T>;

    /// Properties exposed to a host, in display order.
    fn properties(&self) -> &'static [PropertyInfo];

    /// Computes the Cauchy stress at the given point.
    ///
    /// `q` is the anisotropy basis, whose columns are the material axes. `base` is an optional
    /// underlying material for materials that augment another one.
    fn compute_stress(
        &self,
        def: &DeformedPoint<T>,
        q: &Matrix3<T>,
        base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix3<T>;

    /// Computes the tangent at the state for which `stress` was computed.
    fn compute_tangent(
        &self,
        stress: &Matrix3<T>,
        def: &DeformedPoint<T>,
        q: &Matrix3<T>,
        base: Option<&dyn FemMaterial<T>>,
    ) -> Matrix6<T>;

    /// Computes the stress and, if requested, the tangent.
    ///
    /// Passive materials ignore `excitation`.
    fn compute_stress_and_tangent(
        &self,
        sigma: &mut Matrix3<T>,
        d: Option<&mut Matrix6<T>>,
        def: &DeformedPoint<T>,
        q: &Matrix3<T>,
        excitation: T,
    ) {
        let _ = excitation;
        *sigma = self.compute_stress(def, q, None);
        if let Some(d) = d {
            *d = self.compute_tangent(sigma, def, q, None);
        }
    }

    /// Computes the effective response: the elastic response followed by the viscoelastic
    /// behavior, if any.
    ///
    /// `state` is only used by materials that [have state](Self::has_state).
    fn compute_response(
        &self,
        sigma: &mut Matrix3<T>,
        d: Option<&mut Matrix6<T>>,
        def: &DeformedPoint<T>,
        q: &Matrix3<T>,
        excitation: T,
        state: Option<&mut MaterialStateObject>,
    ) {
        let mut d = d;
        self.compute_stress_and_tangent(sigma, d.as_deref_mut(), def, q, excitation);
        if let Some(behavior) = self.visco_behavior() {
            let state = if self.has_state() { state } else { None };
            behavior.compute_response(sigma, d, state);
        }
    }

    fn is_invertible(&self) -> bool {
        false
    }

    fn is_incompressible(&self) -> bool {
        false
    }

    fn is_linear(&self) -> bool {
        false
    }

    fn is_corotated(&self) -> bool {
        false
    }

    fn is_viscoelastic(&self) -> bool {
        self.visco_behavior().is_some()
    }

    /// Whether each integration point needs a [`MaterialStateObject`].
    fn has_state(&self) -> bool {
        self.is_viscoelastic() && !self.is_linear()
    }

    fn create_state_object(&self) -> Option<MaterialStateObject> {
        if self.has_state() {
            self.visco_behavior().map(|behavior| behavior.create_state())
        } else {
            None
        }
    }

    /// Commits the history of `state` at the start of the time step `[t0, t1]`.
    fn advance_state(&self, state: &mut MaterialStateObject, t0: T, t1: T) {
        if let Some(behavior) = self.visco_behavior() {
            behavior.advance_state(state, t0, t1);
        }
    }

    fn validate_deformation(&self, def: &DeformedPoint<T>) -> Result<(), InvalidDeformation<T>> {
        let det_f = def.det_f();
        let admissible = if self.is_invertible() {
            det_f != T::zero() && det_f.is_finite()
        } else {
            det_f > T::zero()
        };
        if admissible {
            Ok(())
        } else {
            Err(InvalidDeformation { det_f })
        }
    }

    /// The bulk response of incompressible materials, used by elements to compute the average
    /// pressure.
    fn bulk_parameters(&self) -> Option<&BulkParameters<T>> {
        None
    }

    fn visco_behavior(&self) -> Option<&dyn ViscoelasticBehavior<T>> {
        self.base().visco_behavior()
    }

    fn visco_behavior_mut(&mut self) -> Option<&mut dyn ViscoelasticBehavior<T>> {
        self.base_mut().visco_behavior_mut()
    }

    fn set_visco_behavior(&mut self, behavior: Option<&dyn ViscoelasticBehavior<T>>) {
        self.base_mut().set_visco_behavior(behavior)
    }

    fn set_host_observer(&mut self, observer: Option<PropertyObserver>) {
        self.base_mut().set_host_observer(observer)
    }

    fn clone_material(&self) -> Box<dyn FemMaterial<T>>;

    /// Compares parameters and viscoelastic behavior.
    fn equals(&self, other: &dyn FemMaterial<T>) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<T: Real> Clone for Box<dyn FemMaterial<T>> {
    fn clone(&self) -> Self {
        self.clone_material()
    }
}

impl<T: Real> PartialEq for dyn FemMaterial<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Implements the [`FemMaterial`] methods that only depend on the material type being
/// `Clone + PartialEq` with a `base: MaterialBase<T>` field.
#[macro_export]
macro_rules! material_boilerplate {
    () => {
        fn base(&self) -> &$crate::MaterialBase<T> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::MaterialBase<T> {
            &mut self.base
        }

        fn clone_material(&self) -> Box<dyn $crate::FemMaterial<T>> {
            Box::new(self.clone())
        }

        fn equals(&self, other: &dyn $crate::FemMaterial<T>) -> bool {
            other
                .as_any()
                .downcast_ref::<Self>()
                .map_or(false, |other| self == other)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}
