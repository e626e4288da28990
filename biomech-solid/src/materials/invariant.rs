//! Incompressible materials whose isochoric energy is a function $W(\bar I_1, \bar I_2)$ of the
//! isochoric invariants.
use crate::materials::incompressible::{decoupled_stress, decoupled_tangent, IsochoricModel};
use crate::parameters::{BulkParameters, ValidateParameters};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{left_cauchy_green, voigt_outer, voigt_symmetric_product};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// First and second derivatives of $W$ with respect to $\bar I_1$ and $\bar I_2$.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct InvariantDerivatives<T> {
    pub w1: T,
    pub w2: T,
    pub w11: T,
    pub w12: T,
    pub w22: T,
}

impl<T: Real> InvariantDerivatives<T> {
    fn zero() -> Self {
        Self {
            w1: T::zero(),
            w2: T::zero(),
            w11: T::zero(),
            w12: T::zero(),
            w22: T::zero(),
        }
    }
}

/// $(\bar I_1, \bar I_2)$ of the isochoric left Cauchy-Green tensor.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub(crate) fn isochoric_invariants<T: Real>(b_bar: &Matrix3<T>) -> (T, T) {
    let i1 = b_bar.trace();
    let i2 = 0.5 * (i1 * i1 - (b_bar * b_bar).trace());
    (i1, i2)
}

/// An energy given in terms of the isochoric invariants.
pub(crate) trait InvariantModel<T: Real> {
    fn invariant_derivatives(&self, i1: T, i2: T) -> InvariantDerivatives<T>;
}

/// $\bar{\vec \tau} = 2 (W_1 + \bar I_1 W_2) \bar{\vec B} - 2 W_2 \bar{\vec B}^2$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
fn invariant_fictitious_stress<T: Real>(w: &InvariantDerivatives<T>, b_bar: &Matrix3<T>, i1: T) -> Matrix3<T> {
    let b_bar2 = b_bar * b_bar;
    b_bar * (2.0 * (w.w1 + i1 * w.w2)) - b_bar2 * (2.0 * w.w2)
}

#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
fn invariant_fictitious_tangent<T: Real>(w: &InvariantDerivatives<T>, b_bar: &Matrix3<T>, i1: T) -> Matrix6<T> {
    let b_bar2 = b_bar * b_bar;
    let a = w.w11 + 2.0 * i1 * w.w12 + i1 * i1 * w.w22 + w.w2;
    let b = w.w12 + i1 * w.w22;
    let c = voigt_outer(b_bar, b_bar) * a - (voigt_outer(b_bar, &b_bar2) + voigt_outer(&b_bar2, b_bar)) * b
        + voigt_outer(&b_bar2, &b_bar2) * w.w22
        - voigt_symmetric_product(b_bar, b_bar) * w.w2;
    c * 4.0
}

macro_rules! impl_isochoric_model_for_invariant_model {
    ($parameters:ident) => {
        impl<T: Real> IsochoricModel<T> for $parameters<T> {
            fn fictitious_stress(&self, f_bar: &Matrix3<T>, _q: &Matrix3<T>) -> Matrix3<T> {
                let b_bar = left_cauchy_green(f_bar);
                let (i1, i2) = isochoric_invariants(&b_bar);
                invariant_fictitious_stress(&self.invariant_derivatives(i1, i2), &b_bar, i1)
            }

            fn fictitious_tangent(&self, f_bar: &Matrix3<T>, _q: &Matrix3<T>) -> Matrix6<T> {
                let b_bar = left_cauchy_green(f_bar);
                let (i1, i2) = isochoric_invariants(&b_bar);
                invariant_fictitious_tangent(&self.invariant_derivatives(i1, i2), &b_bar, i1)
            }
        }
    };
}

impl_isochoric_model_for_invariant_model!(IncompNeoHookeanParameters);
impl_isochoric_model_for_invariant_model!(MooneyRivlinParameters);
impl_isochoric_model_for_invariant_model!(CubicHyperelasticParameters);

fn require_finite<T: Real>(property: &'static str, value: T) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::new(property, format!("must be finite, got {}", value)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct IncompNeoHookeanParameters<T> {
    pub shear_modulus: T,
    pub bulk: BulkParameters<T>,
}

impl<T: Real> Default for IncompNeoHookeanParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            shear_modulus: 150000.0,
            bulk: BulkParameters::default(),
        }
    }
}

impl<T: Real> ValidateParameters for IncompNeoHookeanParameters<T> {
    fn validate(&self) -> Result<(), ParameterError> {
        if !(self.shear_modulus >= T::zero()) {
            return Err(ParameterError::new(
                "shearModulus",
                format!("must be non-negative, got {}", self.shear_modulus),
            ));
        }
        self.bulk.validate()
    }
}

/// The incompressible Neo-Hookean material, $W = \frac{G}{2} (\bar I_1 - 3)$.
#[derive(Clone, Debug, PartialEq)]
pub struct IncompNeoHookeanMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: IncompNeoHookeanParameters<T>,
}

impl<T: Real> Default for IncompNeoHookeanMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: IncompNeoHookeanParameters::default(),
        }
    }
}

impl<T: Real> IncompNeoHookeanMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("bulkModulus", "bulk modulus for incompressibility", "100000"),
        PropertyInfo::new("bulkPotential", "incompressibility potential function", "QUADRATIC"),
        PropertyInfo::new("shearModulus", "shear modulus", "150000"),
    ];

    pub fn new(shear_modulus: T, bulk_modulus: T) -> Result<Self, ParameterError> {
        Self::from_parameters(IncompNeoHookeanParameters {
            shear_modulus,
            bulk: BulkParameters {
                bulk_modulus,
                ..BulkParameters::default()
            },
        })
    }

    pub fn from_parameters(parameters: IncompNeoHookeanParameters<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &IncompNeoHookeanParameters<T> {
        &self.parameters
    }

    pub fn set_shear_modulus(&mut self, shear_modulus: T) -> Result<(), ParameterError> {
        let candidate = IncompNeoHookeanParameters {
            shear_modulus,
            ..self.parameters
        };
        self.base.update("shearModulus", &mut self.parameters, candidate)
    }

    pub fn set_bulk_parameters(&mut self, bulk: BulkParameters<T>) -> Result<(), ParameterError> {
        let candidate = IncompNeoHookeanParameters { bulk, ..self.parameters };
        self.base.update("bulkModulus", &mut self.parameters, candidate)
    }
}

impl<T: Real> InvariantModel<T> for IncompNeoHookeanParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn invariant_derivatives(&self, _i1: T, _i2: T) -> InvariantDerivatives<T> {
        InvariantDerivatives {
            w1: 0.5 * self.shear_modulus,
            ..InvariantDerivatives::zero()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct MooneyRivlinParameters<T> {
    pub c10: T,
    pub c01: T,
    pub c11: T,
    pub c20: T,
    pub c02: T,
    pub bulk: BulkParameters<T>,
}

impl<T: Real> Default for MooneyRivlinParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            c10: 150000.0,
            c01: 0.0,
            c11: 0.0,
            c20: 0.0,
            c02: 0.0,
            bulk: BulkParameters::default(),
        }
    }
}

impl<T: Real> ValidateParameters for MooneyRivlinParameters<T> {
    fn validate(&self) -> Result<(), ParameterError> {
        require_finite("C10", self.c10)?;
        require_finite("C01", self.c01)?;
        require_finite("C11", self.c11)?;
        require_finite("C20", self.c20)?;
        require_finite("C02", self.c02)?;
        self.bulk.validate()
    }
}

impl<T: Real> InvariantModel<T> for MooneyRivlinParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn invariant_derivatives(&self, i1: T, i2: T) -> InvariantDerivatives<T> {
        let a = i1 - 3.0;
        let b = i2 - 3.0;
        InvariantDerivatives {
            w1: self.c10 + self.c11 * b + 2.0 * self.c20 * a,
            w2: self.c01 + self.c11 * a + 2.0 * self.c02 * b,
            w11: 2.0 * self.c20,
            w12: self.c11,
            w22: 2.0 * self.c02,
        }
    }
}

/// The incompressible five-parameter Mooney-Rivlin material,
/// $$
/// W = C_{10} (\bar I_1 - 3) + C_{01} (\bar I_2 - 3) + C_{11} (\bar I_1 - 3)(\bar I_2 - 3)
///   + C_{20} (\bar I_1 - 3)^2 + C_{02} (\bar I_2 - 3)^2.
/// $$
#[derive(Clone, Debug, PartialEq)]
pub struct MooneyRivlinMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: MooneyRivlinParameters<T>,
}

impl<T: Real> Default for MooneyRivlinMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: MooneyRivlinParameters::default(),
        }
    }
}

impl<T: Real> MooneyRivlinMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("bulkModulus", "bulk modulus for incompressibility", "100000"),
        PropertyInfo::new("bulkPotential", "incompressibility potential function", "QUADRATIC"),
        PropertyInfo::new("C10", "C10 Mooney-Rivlin parameter", "150000"),
        PropertyInfo::new("C01", "C01 Mooney-Rivlin parameter", "0"),
        PropertyInfo::new("C11", "C11 Mooney-Rivlin parameter", "0"),
        PropertyInfo::new("C20", "C20 Mooney-Rivlin parameter", "0"),
        PropertyInfo::new("C02", "C02 Mooney-Rivlin parameter", "0"),
    ];

    /// The two-parameter form with bulk modulus `bulk_modulus`.
    pub fn new(c10: T, c01: T, bulk_modulus: T) -> Result<Self, ParameterError> {
        Self::from_parameters(MooneyRivlinParameters {
            c10,
            c01,
            c11: T::zero(),
            c20: T::zero(),
            c02: T::zero(),
            bulk: BulkParameters {
                bulk_modulus,
                ..BulkParameters::default()
            },
        })
    }

    pub fn from_parameters(parameters: MooneyRivlinParameters<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &MooneyRivlinParameters<T> {
        &self.parameters
    }

    pub fn set_c10(&mut self, c10: T) -> Result<(), ParameterError> {
        let candidate = MooneyRivlinParameters { c10, ..self.parameters };
        self.base.update("C10", &mut self.parameters, candidate)
    }

    pub fn set_c01(&mut self, c01: T) -> Result<(), ParameterError> {
        let candidate = MooneyRivlinParameters { c01, ..self.parameters };
        self.base.update("C01", &mut self.parameters, candidate)
    }

    pub fn set_c11(&mut self, c11: T) -> Result<(), ParameterError> {
        let candidate = MooneyRivlinParameters { c11, ..self.parameters };
        self.base.update("C11", &mut self.parameters, candidate)
    }

    pub fn set_c20(&mut self, c20: T) -> Result<(), ParameterError> {
        let candidate = MooneyRivlinParameters { c20, ..self.parameters };
        self.base.update("C20", &mut self.parameters, candidate)
    }

    pub fn set_c02(&mut self, c02: T) -> Result<(), ParameterError> {
        let candidate = MooneyRivlinParameters { c02, ..self.parameters };
        self.base.update("C02", &mut self.parameters, candidate)
    }

    pub fn set_bulk_parameters(&mut self, bulk: BulkParameters<T>) -> Result<(), ParameterError> {
        let candidate = MooneyRivlinParameters { bulk, ..self.parameters };
        self.base.update("bulkModulus", &mut self.parameters, candidate)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct CubicHyperelasticParameters<T> {
    pub g10: T,
    pub g20: T,
    pub g30: T,
    pub bulk: BulkParameters<T>,
}

impl<T: Real> Default for CubicHyperelasticParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            g10: 150000.0,
            g20: 0.0,
            g30: 0.0,
            bulk: BulkParameters::default(),
        }
    }
}

impl<T: Real> ValidateParameters for CubicHyperelasticParameters<T> {
    fn validate(&self) -> Result<(), ParameterError> {
        require_finite("G10", self.g10)?;
        require_finite("G20", self.g20)?;
        require_finite("G30", self.g30)?;
        self.bulk.validate()
    }
}

impl<T: Real> InvariantModel<T> for CubicHyperelasticParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn invariant_derivatives(&self, i1: T, _i2: T) -> InvariantDerivatives<T> {
        let a = i1 - 3.0;
        InvariantDerivatives {
            w1: self.g10 + 2.0 * self.g20 * a + 3.0 * self.g30 * a * a,
            w11: 2.0 * self.g20 + 6.0 * self.g30 * a,
            ..InvariantDerivatives::zero()
        }
    }
}

/// The incompressible cubic hyperelastic (Yeoh) material,
/// $W = G_{10} (\bar I_1 - 3) + G_{20} (\bar I_1 - 3)^2 + G_{30} (\bar I_1 - 3)^3$.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicHyperelasticMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: CubicHyperelasticParameters<T>,
}

impl<T: Real> Default for CubicHyperelasticMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: CubicHyperelasticParameters::default(),
        }
    }
}

impl<T: Real> CubicHyperelasticMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("bulkModulus", "bulk modulus for incompressibility", "100000"),
        PropertyInfo::new("bulkPotential", "incompressibility potential function", "QUADRATIC"),
        PropertyInfo::new("G10", "G10 parameter", "150000"),
        PropertyInfo::new("G20", "G20 parameter", "0"),
        PropertyInfo::new("G30", "G30 parameter", "0"),
    ];

    pub fn from_parameters(parameters: CubicHyperelasticParameters<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &CubicHyperelasticParameters<T> {
        &self.parameters
    }

    pub fn set_g10(&mut self, g10: T) -> Result<(), ParameterError> {
        let candidate = CubicHyperelasticParameters { g10, ..self.parameters };
        self.base.update("G10", &mut self.parameters, candidate)
    }

    pub fn set_g20(&mut self, g20: T) -> Result<(), ParameterError> {
        let candidate = CubicHyperelasticParameters { g20, ..self.parameters };
        self.base.update("G20", &mut self.parameters, candidate)
    }

    pub fn set_g30(&mut self, g30: T) -> Result<(), ParameterError> {
        let candidate = CubicHyperelasticParameters { g30, ..self.parameters };
        self.base.update("G30", &mut self.parameters, candidate)
    }

    pub fn set_bulk_parameters(&mut self, bulk: BulkParameters<T>) -> Result<(), ParameterError> {
        let candidate = CubicHyperelasticParameters { bulk, ..self.parameters };
        self.base.update("bulkModulus", &mut self.parameters, candidate)
    }
}

macro_rules! impl_invariant_material {
    ($material:ident, $kind:expr) => {
        impl<T: Real> FemMaterial<T> for $material<T> {
            material_boilerplate!();

            fn kind(&self) -> MaterialKind {
                $kind
            }

            fn properties(&self) -> &'static [PropertyInfo] {
                Self::PROPERTIES
            }

            fn compute_stress(
                &self,
                def: &DeformedPoint<T>,
                q: &Matrix3<T>,
                _base: Option<&dyn FemMaterial<T>>,
            ) -> Matrix3<T> {
                decoupled_stress(&self.parameters, def, q)
            }

            fn compute_tangent(
                &self,
                _stress: &Matrix3<T>,
                def: &DeformedPoint<T>,
                q: &Matrix3<T>,
                _base: Option<&dyn FemMaterial<T>>,
            ) -> Matrix6<T> {
                decoupled_tangent(&self.parameters, def, q)
            }

            fn is_incompressible(&self) -> bool {
                true
            }

            fn bulk_parameters(&self) -> Option<&BulkParameters<T>> {
                Some(&self.parameters.bulk)
            }
        }
    };
}

impl_invariant_material!(IncompNeoHookeanMaterial, MaterialKind::IncompNeoHookean);
impl_invariant_material!(MooneyRivlinMaterial, MaterialKind::MooneyRivlin);
impl_invariant_material!(CubicHyperelasticMaterial, MaterialKind::CubicHyperelastic);
