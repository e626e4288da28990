use crate::materials::incompressible::{decoupled_stress, decoupled_tangent, IsochoricModel};
use crate::parameters::{BulkParameters, ValidateParameters};
use crate::{material_boilerplate, FemMaterial, MaterialBase, MaterialKind};
use biomech::algebra::{
    mul_left_and_transpose_right, push_forward_tangent, right_cauchy_green, voigt_outer, voigt_symmetric_product,
};
use biomech::error::ParameterError;
use biomech::nalgebra::{Matrix3, Matrix6};
use biomech::property::PropertyInfo;
use biomech::{DeformedPoint, Real};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct FungParameters<T> {
    pub mu1: T,
    pub mu2: T,
    pub mu3: T,
    pub lambda11: T,
    pub lambda22: T,
    pub lambda33: T,
    pub lambda12: T,
    pub lambda23: T,
    pub lambda31: T,
    /// The exponential scaling $c$.
    pub c: T,
    pub bulk: BulkParameters<T>,
}

impl<T: Real> Default for FungParameters<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            mu1: 1000.0,
            mu2: 1000.0,
            mu3: 1000.0,
            lambda11: 2000.0,
            lambda22: 2000.0,
            lambda33: 2000.0,
            lambda12: 2000.0,
            lambda23: 2000.0,
            lambda31: 2000.0,
            c: 1500.0,
            bulk: BulkParameters::default(),
        }
    }
}

impl<T: Real> ValidateParameters for FungParameters<T> {
    fn validate(&self) -> Result<(), ParameterError> {
        if !(self.c > T::zero()) {
            return Err(ParameterError::new("CC", format!("must be positive, got {}", self.c)));
        }
        self.bulk.validate()
    }
}

impl<T: Real> FungParameters<T> {
    fn mu(&self) -> [T; 3] {
        [self.mu1, self.mu2, self.mu3]
    }

    fn lambda(&self) -> Matrix3<T> {
        Matrix3::new(
            self.lambda11,
            self.lambda12,
            self.lambda31,
            self.lambda12,
            self.lambda22,
            self.lambda23,
            self.lambda31,
            self.lambda23,
            self.lambda33,
        )
    }

    /// Structural tensors $\vec A_a = \vec a_a \otimes \vec a_a$ of the material axes.
    fn structural_tensors(q: &Matrix3<T>) -> [Matrix3<T>; 3] {
        let axis_tensor = |a: usize| {
            let axis = q.column(a);
            axis * axis.transpose()
        };
        [axis_tensor(0), axis_tensor(1), axis_tensor(2)]
    }

    /// Fictitious second Piola-Kirchhoff stress and material elasticity for the fictitious
    /// Green strain $\bar{\vec E} = \frac{1}{2} (\bar{\vec C} - \vec I)$.
    ///
    /// With $x_a = \vec a_a \cdot \bar{\vec E} \vec a_a$ the exponent is
    /// $$
    /// q = \frac{1}{c} \left[ \sum_a 2 \mu_a \vec a_a \cdot \bar{\vec E}^2 \vec a_a
    ///   + \sum_{a, b} \lambda_{ab} x_a x_b \right]
    /// $$
    /// and $\bar{\vec S} = e^q \vec G$ with
    /// $\vec G = \sum_a \mu_a (\vec A_a \bar{\vec E} + \bar{\vec E} \vec A_a) + \sum_{a, b} \lambda_{ab} x_b \vec A_a$.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn fictitious_response(&self, c_bar: &Matrix3<T>, q: &Matrix3<T>) -> (Matrix3<T>, Matrix6<T>) {
        let e_bar = (c_bar - Matrix3::identity()) * 0.5;
        let mu = self.mu();
        let lambda = self.lambda();
        let a = Self::structural_tensors(q);
        let i = Matrix3::identity();

        let x: [T; 3] = [0, 1, 2].map(|k| {
            let axis = q.column(k);
            axis.dot(&(e_bar * axis))
        });

        let mut exponent = 0.0;
        let mut g = Matrix3::zeros();
        let mut c_mat = Matrix6::zeros();
        for k in 0..3 {
            let axis = q.column(k);
            let e_axis = e_bar * axis;
            exponent += 2.0 * mu[k] * e_axis.dot(&e_axis);
            g += (a[k] * e_bar + e_bar * a[k]) * mu[k];
            c_mat += (voigt_symmetric_product(&a[k], &i) + voigt_symmetric_product(&i, &a[k])) * mu[k];
            for l in 0..3 {
                exponent += lambda[(k, l)] * x[k] * x[l];
                g += a[k] * (lambda[(k, l)] * x[l]);
                c_mat += voigt_outer(&a[k], &a[l]) * lambda[(k, l)];
            }
        }
        let eq = (exponent / self.c).exp();
        let s_bar = g * eq;
        let tangent = (voigt_outer(&g, &g) * (2.0 / self.c) + c_mat) * eq;
        (s_bar, tangent)
    }
}

impl<T: Real> IsochoricModel<T> for FungParameters<T> {
    fn fictitious_stress(&self, f_bar: &Matrix3<T>, q: &Matrix3<T>) -> Matrix3<T> {
        let (s_bar, _) = self.fictitious_response(&right_cauchy_green(f_bar), q);
        mul_left_and_transpose_right(&s_bar, f_bar)
    }

    fn fictitious_tangent(&self, f_bar: &Matrix3<T>, q: &Matrix3<T>) -> Matrix6<T> {
        let (_, c_bar) = self.fictitious_response(&right_cauchy_green(f_bar), q);
        push_forward_tangent(&c_bar, f_bar)
    }
}

/// The incompressible orthotropic Fung material,
/// $W = \frac{c}{2} (e^q - 1)$, with material axes given by the columns of the anisotropy
/// basis $\vec Q$.
#[derive(Clone, Debug, PartialEq)]
pub struct FungMaterial<T: Real> {
    base: MaterialBase<T>,
    parameters: FungParameters<T>,
}

impl<T: Real> Default for FungMaterial<T> {
    fn default() -> Self {
        Self {
            base: MaterialBase::default(),
            parameters: FungParameters::default(),
        }
    }
}

impl<T: Real> FungMaterial<T> {
    pub const PROPERTIES: &'static [PropertyInfo] = &[
        PropertyInfo::new("viscoBehavior", "viscoelastic behavior", "null"),
        PropertyInfo::new("bulkModulus", "bulk modulus for incompressibility", "100000"),
        PropertyInfo::new("bulkPotential", "incompressibility potential function", "QUADRATIC"),
        PropertyInfo::new("mu1", "mu1 parameter", "1000"),
        PropertyInfo::new("mu2", "mu2 parameter", "1000"),
        PropertyInfo::new("mu3", "mu3 parameter", "1000"),
        PropertyInfo::new("lambda11", "lambda11 parameter", "2000"),
        PropertyInfo::new("lambda22", "lambda22 parameter", "2000"),
        PropertyInfo::new("lambda33", "lambda33 parameter", "2000"),
        PropertyInfo::new("lambda12", "lambda12 parameter", "2000"),
        PropertyInfo::new("lambda23", "lambda23 parameter", "2000"),
        PropertyInfo::new("lambda31", "lambda31 parameter", "2000"),
        PropertyInfo::new("CC", "C parameter", "1500"),
    ];

    pub fn from_parameters(parameters: FungParameters<T>) -> Result<Self, ParameterError> {
        parameters.validate()?;
        Ok(Self {
            base: MaterialBase::default(),
            parameters,
        })
    }

    pub fn parameters(&self) -> &FungParameters<T> {
        &self.parameters
    }

    /// Replaces all parameters at once, reported as a change of `property`.
    pub fn set_parameters(&mut self, property: &'static str, parameters: FungParameters<T>) -> Result<(), ParameterError> {
        self.base.update(property, &mut self.parameters, parameters)
    }

    pub fn set_c(&mut self, c: T) -> Result<(), ParameterError> {
        self.set_parameters("CC", FungParameters { c, ..self.parameters })
    }

    pub fn set_bulk_parameters(&mut self, bulk: BulkParameters<T>) -> Result<(), ParameterError> {
        self.set_parameters("bulkModulus", FungParameters { bulk, ..self.parameters })
    }
}

impl<T: Real> FemMaterial<T> for FungMaterial<T> {
    material_boilerplate!();

    fn kind(&self) -> MaterialKind {
        MaterialKind::Fung
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
