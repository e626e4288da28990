use nalgebra::{Matrix6, Vector6};

/// Poor man's approx assertion for matrices, with the tolerance relative to the largest
/// absolute entry of the right-hand side
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, reltol = $tol:expr) => {{
        let (x, y) = (&$x, &$y);
        let diff = x - y;

        let scale = y.abs().max().max(1.0);
        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol * scale;

        if !approx_eq {
            println!("reltol: {:e}", $tol);
            println!("left: {}", x);
            println!("right: {}", y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

/// Approximates the Jacobian of $f: \mathbb{R}^6 \rightarrow \mathbb{R}^6$ at `x` with central
/// differences of step `h`.
pub fn approximate_jacobian6_fd(mut f: impl FnMut(&Vector6<f64>) -> Vector6<f64>, x: &Vector6<f64>, h: f64) -> Matrix6<f64> {
    let mut jacobian = Matrix6::zeros();
    let mut x = *x;
    for i in 0..6 {
        let xi = x[i];
        x[i] = xi + h;
        let f_plus = f(&x);
        x[i] = xi - h;
        let f_minus = f(&x);
        x[i] = xi;
        jacobian.set_column(i, &((f_plus - f_minus) / (2.0 * h)));
    }
    jacobian
}

/// Whether `a` is symmetric up to `tol` relative to its largest absolute entry.
pub fn is_symmetric<const N: usize>(a: &nalgebra::SMatrix<f64, N, N>, tol: f64) -> bool {
    let scale = a.abs().max().max(1.0);
    (a - a.transpose()).abs().max() <= tol * scale
}
