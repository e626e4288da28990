use crate::materials::incompressible::{decoupled_stress, decoupled_tangent, IsochoricModel};
use crate::parameters::{BulkParameters, ValidateParameters};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{
    mul_left_and_transpose_right, push_forward_tangent, right_cauchy_green, symmetric_to_voigt, VOIGT_PAIRS,
};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};
use itertools::izip;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Maximum number of terms in the Ogden series.
pub const OGDEN_TERMS: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct OgdenParameters<T> {
    pub mu: [T; OGDEN_TERMS],
    pub alpha: [T; OGDEN_TERMS],
    pub bulk: BulkParameters<T>,
}

impl<T: Real> Default for OgdenParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            mu: [300000.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            alpha: [2.0; OGDEN_TERMS],
            bulk: BulkParameters::default(),
        }
    }
}

impl<T: Real> ValidateParameters for OgdenParameters<T> {
    fn validate(&self) -> Result<(), ParameterError> {
        for (i, &mu, &alpha) in izip!(0.., &self.mu, &self.alpha) {
            if !mu.is_finite() {
                return Err(ParameterError::new("Mu", format!("term {} must be finite, got {}", i + 1, mu)));
            }
            if mu != T::zero() && alpha == T::zero() {
                return Err(ParameterError::new(
                    "Alpha",
                    format!("term {} must be non-zero when its Mu is non-zero", i + 1),
                ));
            }
        }
        self.bulk.validate()
    }
}

impl<T: Real> OgdenParameters<T> {
    /// The fictitious second Piola-Kirchhoff stress $\bar{\vec S}$ for an arbitrary symmetric
    /// positive definite $\bar{\vec C}$.
    ///
    /// With the principal stretches $\bar \lambda_a$ and directions $\vec N_a$ of $\bar{\vec C}$,
    /// $\bar{\vec S} = \sum_a \bar \tau_a \bar \lambda_a^{-2} \vec N_a \otimes \vec N_a$ where
    /// $\bar \tau_a = \sum_i \frac{\mu_i}{\alpha_i} \bar \lambda_a^{\alpha_i}$.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn fictitious_second_pk(&self, c_bar: &Matrix3<T>) -> Matrix3<T> {
        let eigen = c_bar.symmetric_eigen();
        let mut s_bar = Matrix3::zeros();
        for (a, &stretch_squared) in eigen.eigenvalues.iter().enumerate() {
            let stretch_squared = stretch_squared.max(1e-12);
            let tau = izip!(&self.mu, &self.alpha)
                .filter(|&(&mu, _)| mu != 0.0)
                .fold(0.0, |tau, (&mu, &alpha)| tau + mu / alpha * stretch_squared.powf(alpha * 0.5));
            let n = eigen.eigenvectors.column(a);
            s_bar += n * n.transpose() * (tau / stretch_squared);
        }
        s_bar
    }

    /// $\bar{\mathbb{C}} = \partial \bar{\vec S} / \partial \bar{\vec E}$ by central differences
    /// in the fictitious Green strain.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn fictitious_material_tangent(&self, c_bar: &Matrix3<T>) -> Matrix6<T> {
        let h = 1e-6;
        let mut tangent = Matrix6::zeros();
        for (beta, &(k, l)) in VOIGT_PAIRS.iter().enumerate() {
            // A Voigt strain increment h changes the Green strain by h (normal) or h / 2 on both
            // symmetric entries (shear), i.e. C by 2h or h on both entries.
            let mut dc = Matrix3::zeros();
            if k == l {
                dc[(k, k)] = 2.0 * h;
            } else {
                dc[(k, l)] = h;
                dc[(l, k)] = h;
            }
            let s_plus = self.fictitious_second_pk(&(c_bar + dc));
            let s_minus = self.fictitious_second_pk(&(c_bar - dc));
            let column = symmetric_to_voigt(&((s_plus - s_minus) / (2.0 * h)));
            tangent.set_column(beta, &column);
        }
        (tangent + tangent.transpose()) * 0.5
    }
}

impl<T: Real> IsochoricModel<T> for OgdenParameters<T> {
    fn fictitious_stress(&self, f_bar: &Matrix3<T>, _q: &Matrix3<T>) -> Matrix3<T> {
        let s_bar = self.fictitious_second_pk(&right_cauchy_green(f_bar));
        mul_left_and_transpose_right(&s_bar, f_bar)
    }

    fn fictitious_tangent(&self, f_bar: &Matrix3<T>, _q: &Matrix3<T>) -> Matrix6<T> {
        let c_bar = self.fictitious_material_tangent(&right_cauchy_green(f_bar));
        push_forward_tangent(&c_bar, f_bar)
    }
}

/// The incompressible Ogden material,
/// $$
/// W = \sum_{i=1}^{6} \frac{\mu_i}{\alpha_i^2} \left( \bar \lambda_1^{\alpha_i} + \bar \lambda_2^{\alpha_i}
///     + \bar \lambda_3^{\alpha_i} - 3 \right),
/// $$
/// where terms with $\mu_i = 0$ are ignored.
///
/// The fictitious elasticity is computed numerically, which keeps it consistent with the stress
/// also when principal stretches coincide.
#[derive(Clone, Debug, PartialEq)]
pub struct OgdenMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: OgdenParameters<T>,
}

impl<T: Real> Default for OgdenMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: OgdenParameters::default(),
        }
    }
}

impl<T: Real> OgdenMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("bulkModulus", "bulk modulus for incompressibility", "100000"),
        PropertyInfo::new("bulkPotential", "incompressibility potential function", "QUADRATIC"),
        PropertyInfo::new("Mu1", "Mu1 parameter", "300000"),
        PropertyInfo::new("Mu2", "Mu2 parameter", "0"),
        PropertyInfo::new("Mu3", "Mu3 parameter", "0"),
        PropertyInfo::new("Mu4", "Mu4 parameter", "0"),
        PropertyInfo::new("Mu5", "Mu5 parameter", "0"),
        PropertyInfo::new("Mu6", "Mu6 parameter", "0"),
        PropertyInfo::new("Alpha1", "Alpha1 parameter", "2"),
        PropertyInfo::new("Alpha2", "Alpha2 parameter", "2"),
        PropertyInfo::new("Alpha3", "Alpha3 parameter", "2"),
        PropertyInfo::new("Alpha4", "Alpha4 parameter", "2"),
        PropertyInfo::new("Alpha5", "Alpha5 parameter", "2"),
        PropertyInfo::new("Alpha6", "Alpha6 parameter", "2"),
    ];

    pub fn from_parameters(parameters: OgdenParameters<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &OgdenParameters<T> {
        &self.parameters
    }

    /// Sets $\mu_i$ and $\alpha_i$ of term `i` (zero-based).
    ///
    /// Fails if `i` is not smaller than [`OGDEN_TERMS`].
    pub fn set_term(&mut self, i: usize, mu: T, alpha: T) -> Result<(), ParameterError> {
        let name = OGDEN_MU_NAMES
            .get(i)
            .copied()
            .ok_or_else(|| ParameterError::new("terms", format!("no term {} among {}", i, OGDEN_TERMS)))?;
        let mut candidate = self.parameters;
        candidate.mu[i] = mu;
        candidate.alpha[i] = alpha;
        self.base.update(name, &mut self.parameters, candidate)
    }

    pub fn set_bulk_parameters(&mut self, bulk: BulkParameters<T>) -> Result<(), ParameterError> {
        let candidate = OgdenParameters { bulk, ..self.parameters };
        self.base.update("bulkModulus", &mut self.parameters, candidate)
    }
}

const OGDEN_MU_NAMES: [&str; OGDEN_TERMS] = ["Mu1", "Mu2", "Mu3", "Mu4", "Mu5", "Mu6"];

impl<T: Real> FemMaterial<T> for OgdenMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::Ogden
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
