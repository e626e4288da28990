//! Elastic parameter records shared by several material families.
use biomech::error::ParameterError;
use biomech::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Validation of a parameter record before it is stored in a material.
pub trait ValidateParameters {
    fn validate(&self) -> Result<(), ParameterError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LameParameters<T> {
    pub mu: T,
    pub lambda: T,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct YoungPoisson<T> {
    pub young: T,
    pub poisson: T,
}

impl<T: Real> YoungPoisson<T> {
    /// Converts a shear modulus $\mu$ and bulk modulus $K$.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn from_shear_and_bulk(mu: T, bulk: T) -> Self {
        let young = 9.0 * bulk * mu / (3.0 * bulk + mu);
        let poisson = (3.0 * bulk - 2.0 * mu) / (2.0 * (3.0 * bulk + mu));
        Self { young, poisson }
    }
}

impl<T: Real> Default for YoungPoisson<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            young: 500000.0,
            poisson: 0.33,
        }
    }
}

impl<T: Real> ValidateParameters for YoungPoisson<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn validate(&self) -> Result<(), ParameterError> {
        if !(self.young >= 0.0) {
            return Err(ParameterError::new(
                "YoungsModulus",
                format!("must be non-negative, got {}", self.young),
            ));
        }
        if !(self.poisson > -1.0 && self.poisson < 0.5) {
            return Err(ParameterError::new(
                "PoissonsRatio",
                format!("must lie in (-1, 0.5), got {}", self.poisson),
            ));
        }
        Ok(())
    }
}

impl<T> From<YoungPoisson<T>> for LameParameters<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn from(params: YoungPoisson<T>) -> Self {
        let YoungPoisson { young, poisson } = params;
        let mu = 0.5 * young / (1.0 + poisson);
        let lambda = 2.0 * mu * poisson / (1.0 - 2.0 * poisson);
        Self { mu, lambda }
    }
}

/// The volumetric energy $U(J)$ of an incompressible material.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkPotential {
    /// $U = \frac{K}{2} (J - 1)^2$.
    #[default]
    Quadratic,
    /// $U = \frac{K}{2} (\ln J)^2$.
    Logarithmic,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct BulkParameters<T> {
    pub bulk_modulus: T,
    pub potential: BulkPotential,
}

impl<T: Real> Default for BulkParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            bulk_modulus: 100000.0,
            potential: BulkPotential::Quadratic,
        }
    }
}

#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
impl<T: Real> BulkParameters<T> {
    /// The volumetric energy density $U(J)$.
    pub fn energy(&self, j: T) -> T {
        let k = self.bulk_modulus;
        match self.potential {
            BulkPotential::Quadratic => 0.5 * k * (j - 1.0) * (j - 1.0),
            BulkPotential::Logarithmic => 0.5 * k * j.ln() * j.ln(),
        }
    }

    /// The pressure $p = U'(J)$.
    pub fn pressure(&self, j: T) -> T {
        let k = self.bulk_modulus;
        match self.potential {
            BulkPotential::Quadratic => k * (j - 1.0),
            BulkPotential::Logarithmic => k * j.ln() / j,
        }
    }

    /// $\od{p}{J}$.
    pub fn pressure_derivative(&self, j: T) -> T {
        let k = self.bulk_modulus;
        match self.potential {
            BulkPotential::Quadratic => k,
            BulkPotential::Logarithmic => k * (1.0 - j.ln()) / (j * j),
        }
    }
}

impl<T: Real> ValidateParameters for BulkParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn validate(&self) -> Result<(), ParameterError> {
        if self.bulk_modulus >= 0.0 {
            Ok(())
        } else {
            Err(ParameterError::new(
                "bulkModulus",
                format!("must be non-negative, got {}", self.bulk_modulus),
            ))
        }
    }
}
