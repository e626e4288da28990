//! Viscoelastic behaviors composed onto an elastic material response.
use crate::parameters::ValidateParameters;
use crate::MaterialStateObject;
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::Real;
use itertools::izip;
use log::warn;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Debug;

/// A history-dependent modification of the elastic stress and tangent.
///
/// The behavior itself is immutable during evaluation; everything that evolves over time lives
/// in the per-point state created by [`create_state`](Self::create_state).
pub trait ViscoelasticBehavior<T: Real>: Debug + Send + Sync + 'static {
    fn clone_behavior(&self) -> Box<dyn ViscoelasticBehavior<T>>;

    fn equals(&self, other: &dyn ViscoelasticBehavior<T>) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn create_state(&self) -> MaterialStateObject;

    /// Turns the elastic stress in `sigma` into the viscoelastic stress.
    fn compute_stress(&self, sigma: &mut Matrix3<T>, state: Option<&mut MaterialStateObject>);

    /// Turns the elastic tangent in `d` into the viscoelastic tangent.
    fn compute_tangent(&self, d: &mut Matrix6<T>, state: Option<&MaterialStateObject>);

    fn compute_response(
        &self,
        sigma: &mut Matrix3<T>,
        d: Option<&mut Matrix6<T>>,
        state: Option<&mut MaterialStateObject>,
    ) {
        let mut state = state;
        self.compute_stress(sigma, state.as_deref_mut());
        if let Some(d) = d {
            self.compute_tangent(d, state.as_deref());
        }
    }

    /// Commits the history computed during the previous step and prepares the step `[t0, t1]`.
    fn advance_state(&self, state: &mut MaterialStateObject, t0: T, t1: T);
}

impl<T: Real> Clone for Box<dyn ViscoelasticBehavior<T>> {
    fn clone(&self) -> Self {
        self.clone_behavior()
    }
}

impl<T: Real> PartialEq for dyn ViscoelasticBehavior<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// One term $\gamma_i e^{-t / \tau_i}$ of a Prony series.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PronyTerm<T> {
    pub gamma: T,
    pub tau: T,
}

impl<T: Real> PronyTerm<T> {
    /// Decay $g = e^{-h/\tau}$ and increment weight $k = (1 - g) \tau / h$ for a step of length $h$.
    ///
    /// The weight tends to one as the step vanishes.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn step_coefficients(&self, h: T) -> (T, T) {
        let g = (-h / self.tau).exp();
        let k = if h == 0.0 { 1.0 } else { (1.0 - g) * self.tau / h };
        (g, k)
    }
}

/// Quasi-linear viscoelasticity with the reduced relaxation function
/// $$
/// G(t) = \gamma_\infty + \sum_{i} \gamma_i e^{-t / \tau_i}
/// $$
/// applied to the elastic stress response. At most [`QlvBehavior::MAX_TERMS`] terms are supported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct QlvBehavior<T> {
    gamma_inf: T,
    #[serde(default)]
    terms: Vec<PronyTerm<T>>,
}

impl<T: Real> Default for QlvBehavior<T> {
    fn default() -> Self {
        Self {
            gamma_inf: T::one(),
            terms: Vec::new(),
        }
    }
}

impl<T: Real> ValidateParameters for QlvBehavior<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn validate(&self) -> Result<(), ParameterError> {
        if self.terms.len() > Self::MAX_TERMS {
            return Err(ParameterError::new(
                "terms",
                format!("at most {} terms are supported, got {}", Self::MAX_TERMS, self.terms.len()),
            ));
        }
        if !(self.gamma_inf >= 0.0) {
            return Err(ParameterError::new(
                "gammaInf",
                format!("must be non-negative, got {}", self.gamma_inf),
            ));
        }
        for term in &self.terms {
            if !(term.tau > 0.0) {
                return Err(ParameterError::new("tau", format!("must be positive, got {}", term.tau)));
            }
            if !(term.gamma >= 0.0) {
                return Err(ParameterError::new(
                    "gamma",
                    format!("must be non-negative, got {}", term.gamma),
                ));
            }
        }
        Ok(())
    }
}

impl<T: Real> QlvBehavior<T> {
    pub const MAX_TERMS: usize = 6;

    pub fn new(gamma_inf: T, terms: Vec<PronyTerm<T>>) -> Result<Self, ParameterError> {
        let behavior = Self { gamma_inf, terms };
        behavior.validate()?;
        Ok(behavior)
    }

    pub fn single_term(gamma_inf: T, gamma: T, tau: T) -> Result<Self, ParameterError> {
        Self::new(gamma_inf, vec![PronyTerm { gamma, tau }])
    }

    pub fn gamma_inf(&self) -> T {
        self.gamma_inf
    }

    pub fn terms(&self) -> &[PronyTerm<T>] {
        &self.terms
    }

    /// The relaxation time $\tau_i$ of term `i`.
    pub fn relaxation_time(&self, i: usize) -> Option<T> {
        self.terms.get(i).map(|term| term.tau)
    }

    pub fn set_gamma_inf(&mut self, gamma_inf: T) -> Result<(), ParameterError> {
        let candidate = Self {
            gamma_inf,
            terms: self.terms.clone(),
        };
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn set_tau(&mut self, i: usize, tau: T) -> Result<(), ParameterError> {
        self.update_term(i, |term| term.tau = tau)
    }

    pub fn set_gamma(&mut self, i: usize, gamma: T) -> Result<(), ParameterError> {
        self.update_term(i, |term| term.gamma = gamma)
    }

    fn update_term(&mut self, i: usize, update: impl FnOnce(&mut PronyTerm<T>)) -> Result<(), ParameterError> {
        let mut candidate = self.clone();
        let num_terms = candidate.terms.len();
        let term = candidate
            .terms
            .get_mut(i)
            .ok_or_else(|| ParameterError::new("terms", format!("no term {} among {}", i, num_terms)))?;
        update(term);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// The factor $\gamma_\infty + \sum_i \gamma_i k_i$ relating the elastic and the viscoelastic
    /// tangent for a step of length `h`.
    fn tangent_factor(&self, h: T) -> T {
        self.terms.iter().fold(self.gamma_inf, |factor, term| {
            let (_, k) = term.step_coefficients(h);
            factor + term.gamma * k
        })
    }

    /// The instantaneous response $\gamma_\infty + \sum_i \gamma_i$, used without history.
    pub fn instantaneous_factor(&self) -> T {
        self.tangent_factor(T::zero())
    }

    fn qlv_state_mut<'a>(&self, state: &'a mut MaterialStateObject) -> Option<&'a mut QlvState<T>> {
        let qlv_state = state.downcast_mut::<QlvState<T>>();
        if qlv_state.is_none() {
            warn!("State object does not belong to a QLV behavior, using the instantaneous response");
        }
        qlv_state
    }
}

/// Relaxation history of a single integration point.
#[derive(Clone, Debug, PartialEq)]
pub struct QlvState<T: Real> {
    step: T,
    sigma_prev: Matrix3<T>,
    sigma_cur: Matrix3<T>,
    history: Vec<Matrix3<T>>,
    history_cur: Vec<Matrix3<T>>,
}

impl<T: Real> QlvState<T> {
    fn new(num_terms: usize) -> Self {
        Self {
            step: T::zero(),
            sigma_prev: Matrix3::zeros(),
            sigma_cur: Matrix3::zeros(),
            history: vec![Matrix3::zeros(); num_terms],
            history_cur: vec![Matrix3::zeros(); num_terms],
        }
    }

    /// Length of the current time step.
    pub fn step(&self) -> T {
        self.step
    }

    /// Committed hereditary stresses $\vec H_i$, one per Prony term.
    pub fn history(&self) -> &[Matrix3<T>] {
        &self.history
    }

    /// Keeps the history consistent with a behavior whose number of terms changed.
    fn resize(&mut self, num_terms: usize) {
        self.history.resize(num_terms, Matrix3::zeros());
        self.history_cur.resize(num_terms, Matrix3::zeros());
    }
}

impl<T: Real> ViscoelasticBehavior<T> for QlvBehavior<T> {
    fn clone_behavior(&self) -> Box<dyn ViscoelasticBehavior<T>> {
        Box::new(self.clone())
    }

    fn equals(&self, other: &dyn ViscoelasticBehavior<T>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .map_or(false, |other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn create_state(&self) -> MaterialStateObject {
        MaterialStateObject::new(QlvState::<T>::new(self.terms.len()))
    }

    fn compute_stress(&self, sigma: &mut Matrix3<T>, state: Option<&mut MaterialStateObject>) {
        let qlv_state = state.and_then(|state| self.qlv_state_mut(state));
        match qlv_state {
            Some(state) => {
                state.resize(self.terms.len());
                let sigma_e = *sigma;
                let delta = sigma_e - state.sigma_prev;
                let h = state.step;
                let mut result = sigma_e * self.gamma_inf;
                for (term, h_prev, h_cur) in izip!(&self.terms, &state.history, &mut state.history_cur) {
                    let (g, k) = term.step_coefficients(h);
                    *h_cur = h_prev * g + delta * (term.gamma * k);
                    result += *h_cur;
                }
                state.sigma_cur = sigma_e;
                *sigma = result;
            }
            None => *sigma *= self.instantaneous_factor(),
        }
    }

    fn compute_tangent(&self, d: &mut Matrix6<T>, state: Option<&MaterialStateObject>) {
        let h = state
            .and_then(|state| state.downcast_ref::<QlvState<T>>())
            .map_or(T::zero(), |state| state.step);
        *d *= self.tangent_factor(h);
    }

    fn advance_state(&self, state: &mut MaterialStateObject, t0: T, t1: T) {
        if let Some(state) = self.qlv_state_mut(state) {
            state.resize(self.terms.len());
            state.history.clone_from(&state.history_cur);
            state.sigma_prev = state.sigma_cur;
            state.step = t1 - t0;
        }
    }
}
