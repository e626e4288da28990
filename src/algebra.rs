//! Tensor algebra shared by the material and joint layers.
//!
//! Fourth-order tensors with minor symmetries are stored as $6 \times 6$ matrices in the Voigt-pair
//! order $(11, 22, 33, 12, 23, 13)$. Entry $(\alpha, \beta)$ holds the tensor component
//! $c_{ijkl}$ with $\alpha \leftrightarrow (i, j)$ and $\beta \leftrightarrow (k, l)$.
//! Symmetric stress-like tensors map their components directly, while strain-like tensors use
//! engineering shear components, so that a tangent $\vec D$ satisfies
//! $\vec \sigma_v = \vec D \vec \epsilon_v$.
use crate::Real;
use nalgebra::{Isometry3, Matrix3, Matrix6, Rotation3, Vector6};
use numeric_literals::replace_float_literals;

/// Rigid transform between two frames.
pub type RigidTransform3<T> = Isometry3<T>;

/// Tensor index pairs in Voigt order.
pub const VOIGT_PAIRS: [(usize, usize); 6] = [(0, 0), (1, 1), (2, 2), (0, 1), (1, 2), (0, 2)];

/// Maps the components of a symmetric stress-like tensor to a Voigt vector.
pub fn symmetric_to_voigt<T: Real>(a: &Matrix3<T>) -> Vector6<T> {
    Vector6::from_fn(|r, _| {
        let (i, j) = VOIGT_PAIRS[r];
        a[(i, j)]
    })
}

/// Inverse of [`symmetric_to_voigt`].
pub fn voigt_to_symmetric<T: Real>(v: &Vector6<T>) -> Matrix3<T> {
    Matrix3::new(v[0], v[3], v[5], v[3], v[1], v[4], v[5], v[4], v[2])
}

/// Maps a symmetric strain tensor to a Voigt vector with engineering shear components.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn strain_to_voigt<T: Real>(e: &Matrix3<T>) -> Vector6<T> {
    Vector6::new(
        e[(0, 0)],
        e[(1, 1)],
        e[(2, 2)],
        2.0 * e[(0, 1)],
        2.0 * e[(1, 2)],
        2.0 * e[(0, 2)],
    )
}

/// Inverse of [`strain_to_voigt`].
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn voigt_to_strain<T: Real>(v: &Vector6<T>) -> Matrix3<T> {
    let (e01, e12, e02) = (0.5 * v[3], 0.5 * v[4], 0.5 * v[5]);
    Matrix3::new(v[0], e01, e02, e01, v[1], e12, e02, e12, v[2])
}

/// The dyadic product $\vec A \otimes \vec B$ with components $A_{ij} B_{kl}$.
pub fn voigt_outer<T: Real>(a: &Matrix3<T>, b: &Matrix3<T>) -> Matrix6<T> {
    Matrix6::from_fn(|r, c| {
        let (i, j) = VOIGT_PAIRS[r];
        let (k, l) = VOIGT_PAIRS[c];
        a[(i, j)] * b[(k, l)]
    })
}

/// The symmetrized product $\vec A \odot \vec B$ with components
/// $\frac{1}{2} (A_{ik} B_{jl} + A_{il} B_{jk})$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn voigt_symmetric_product<T: Real>(a: &Matrix3<T>, b: &Matrix3<T>) -> Matrix6<T> {
    Matrix6::from_fn(|r, c| {
        let (i, j) = VOIGT_PAIRS[r];
        let (k, l) = VOIGT_PAIRS[c];
        0.5 * (a[(i, k)] * b[(j, l)] + a[(i, l)] * b[(j, k)])
    })
}

/// The symmetric fourth-order identity $\mathbb{I} = \vec I \odot \vec I$.
pub fn fourth_order_identity<T: Real>() -> Matrix6<T> {
    let i = Matrix3::identity();
    voigt_symmetric_product(&i, &i)
}

/// The spatial deviatoric projector $\mathbb{P} = \mathbb{I} - \frac{1}{3} \vec I \otimes \vec I$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn deviatoric_projector<T: Real>() -> Matrix6<T> {
    let i = Matrix3::identity();
    fourth_order_identity() - voigt_outer(&i, &i) / 3.0
}

/// The double contraction $\mathbb{A} : \mathbb{B}$ of two fourth-order tensors in Voigt form.
///
/// Each off-diagonal Voigt pair stands for two tensor index pairs, which is accounted for by
/// weighting the contracted shear components by two.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn double_contraction<T: Real>(a: &Matrix6<T>, b: &Matrix6<T>) -> Matrix6<T> {
    let weights = Matrix6::from_diagonal(&Vector6::new(1.0, 1.0, 1.0, 2.0, 2.0, 2.0));
    a * weights * b
}

/// The $6 \times 6$ matrix $\vec T$ such that $\operatorname{voigt}(\vec F \vec A \vec F^T) = \vec T
/// \operatorname{voigt}(\vec A)$ for every symmetric stress-like $\vec A$.
pub fn stress_transformation<T: Real>(f: &Matrix3<T>) -> Matrix6<T> {
    Matrix6::from_fn(|r, c| {
        let (i, j) = VOIGT_PAIRS[r];
        let (k, l) = VOIGT_PAIRS[c];
        if k == l {
            f[(i, k)] * f[(j, k)]
        } else {
            f[(i, k)] * f[(j, l)] + f[(i, l)] * f[(j, k)]
        }
    })
}

/// Pushes a fourth-order tensor forward, $c_{ijkl} = F_{iI} F_{jJ} F_{kK} F_{lL} C_{IJKL}$.
pub fn push_forward_tangent<T: Real>(c: &Matrix6<T>, f: &Matrix3<T>) -> Matrix6<T> {
    let t = stress_transformation(f);
    &t * c * t.transpose()
}

/// Rotates a tangent into the frame given by `r`.
pub fn rotate_tangent<T: Real>(d: &Matrix6<T>, r: &Rotation3<T>) -> Matrix6<T> {
    push_forward_tangent(d, r.matrix())
}

/// $\vec C = \vec F^T \vec F$.
pub fn right_cauchy_green<T: Real>(f: &Matrix3<T>) -> Matrix3<T> {
    f.transpose() * f
}

/// $\vec B = \vec F \vec F^T$.
pub fn left_cauchy_green<T: Real>(f: &Matrix3<T>) -> Matrix3<T> {
    f * f.transpose()
}

/// The deviatoric part $\vec A - \frac{1}{3} \operatorname{tr}(\vec A) \vec I$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn deviatoric<T: Real>(a: &Matrix3<T>) -> Matrix3<T> {
    a - Matrix3::identity() * (a.trace() / 3.0)
}

#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn symmetrize<T: Real>(a: &Matrix3<T>) -> Matrix3<T> {
    (a + a.transpose()) * 0.5
}

/// Computes $\vec M \vec A \vec M^T$.
pub fn mul_left_and_transpose_right<T: Real>(a: &Matrix3<T>, m: &Matrix3<T>) -> Matrix3<T> {
    m * a * m.transpose()
}

/// Returns the rotation closest to `m` in the Frobenius norm.
///
/// Degenerate input for which no decomposition is available maps to the identity.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn nearest_rotation<T: Real>(m: &Matrix3<T>) -> Rotation3<T> {
    let svd = m.svd(true, true);
    let smallest = svd.singular_values.imin();
    match (svd.u, svd.v_t) {
        (Some(mut u), Some(v_t)) => {
            if (u * v_t).determinant() < 0.0 {
                let mut column = u.column_mut(smallest);
                column *= -1.0;
            }
            Rotation3::from_matrix_unchecked(u * v_t)
        }
        _ => Rotation3::identity(),
    }
}

/// Splits $\vec F = \vec R \vec U$ into a rotation and a symmetric stretch.
pub fn polar_decomposition<T: Real>(f: &Matrix3<T>) -> (Rotation3<T>, Matrix3<T>) {
    let r = nearest_rotation(f);
    let u = symmetrize(&(r.matrix().transpose() * f));
    (r, u)
}

/// The symmetric stretch $\vec U = (\vec I + 2 \vec E)^{1/2}$ whose Green strain is `e`.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
pub fn stretch_from_green_strain<T: Real>(e: &Matrix3<T>) -> Matrix3<T> {
    let c = Matrix3::identity() + symmetrize(e) * 2.0;
    let mut eigen = c.symmetric_eigen();
    eigen.eigenvalues.apply(|lambda| {
        let value = *lambda;
        *lambda = value.max(0.0).sqrt();
    });
    eigen.recompose()
}
