use std::cmp::Ordering;

use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix};

use crate::math::curve::curve::{derivative_coefficients, horner};
use crate::math::round::normalize_zero;

// ─────────────────────────────────────────────────────────────────────────────
// Numeric root finding over ℂ
// ─────────────────────────────────────────────────────────────────────────────
//
// Coefficients are always given highest degree first, with a non-zero
// leading coefficient:
//
//   p(x) = c_0·xⁿ + c_1·xⁿ⁻¹ + … + c_n
//
// Degree 1 and 2 are solved in closed form; higher degrees through the
// eigenvalues of the Frobenius companion matrix, polished once with Newton.

const SCHUR_EPSILON: f64 = 1e-14;
const SCHUR_MAX_ITERATIONS: usize = 10_000;
const NEWTON_MAX_ITERATIONS: usize = 64;

/// A root counts as real once `|im| ≤ IMAGINARY_TOLERANCE·max(1, |root|)`.
pub const IMAGINARY_TOLERANCE: f64 = 1e-9;

/// Radius, relative to `max(1, |x|)`, inside which eigenvalues are taken as
/// one split multiple root at a critical point `x`.
const CLUSTER_RADIUS: f64 = 1e-4;

pub fn horner_complex(coefficients: &[f64], z: Complex<f64>) -> Complex<f64> {
    coefficients
        .iter()
        .fold(Complex::new(0.0, 0.0), |acc, &coef| acc * z + coef)
}

pub fn is_numerically_real(root: &Complex<f64>) -> bool {
    root.im.abs() <= IMAGINARY_TOLERANCE * root.norm().max(1.0)
}

/// Both roots of `a·x² + b·x + c`, `a ≠ 0`.
///
/// Real roots carry an imaginary part of exactly `0.0` and come sorted
/// ascending; a complex pair is returned with the positive imaginary part first.
/// Roots that do not fit in an `f64` come back infinite.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> [Complex<f64>; 2] {
    // Dividing by the power of two nearest the largest magnitude keeps
    // b² - 4ac from overflowing and leaves the mantissas untouched.
    let largest = a.abs().max(b.abs()).max(c.abs());
    let scale = 2.0_f64.powi(largest.log2().floor() as i32);
    let (a, b, c) = (a / scale, b / scale, c / scale);

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        let re = normalize_zero(-b / (2.0 * a));
        let im = (-discriminant).sqrt() / (2.0 * a.abs());
        return [Complex::new(re, im), Complex::new(re, -im)];
    }

    // q = -(b + sign(b)·√Δ)/2 avoids cancellation between -b and √Δ.
    let sqrt_discriminant = discriminant.sqrt();
    let q = -0.5 * (b + b.signum() * sqrt_discriminant);
    let (x1, x2) = if q == 0.0 {
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };
    let (low, high) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
    [
        Complex::new(normalize_zero(low), 0.0),
        Complex::new(normalize_zero(high), 0.0)
    ]
}

/// All three roots of `a·x³ + b·x² + c·x + d`, `a ≠ 0`.
///
/// The eigenvalue solver splits a multiple real root into a cluster, often
/// with small imaginary parts. Such a cluster is collapsed onto the real
/// critical point it surrounds when `p` vanishes there up to rounding; every
/// other root keeps its imaginary part unless it is within
/// [`IMAGINARY_TOLERANCE`].
/// Callers can then test `im == 0.0`.
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Option<Vec<Complex<f64>>> {
    let coefficients = [a, b, c, d];
    if a == 0.0 || coefficients.iter().any(|coef| !coef.is_finite()) {
        return None;
    }
    let mut roots = companion_roots(&coefficients)?;

    for critical in quadratic_roots(3.0 * a, 2.0 * b, c) {
        if critical.im != 0.0 || !critical.re.is_finite() {
            continue;
        }
        let x = critical.re;
        if horner(&coefficients, x).abs() > rounding_bound(&coefficients, x) {
            continue;
        }
        let radius = CLUSTER_RADIUS * x.abs().max(1.0);
        for root in roots.iter_mut() {
            if (*root - x).norm() <= radius {
                *root = Complex::new(x, 0.0);
            }
        }
    }

    let cleaned = roots
        .into_iter()
        .map(|root| {
            let polished = polish(&coefficients, root);
            if is_numerically_real(&polished) {
                Complex::new(polished.re, 0.0)
            } else {
                polished
            }
        })
        .collect();
    Some(sort_roots(cleaned))
}

/// Bound on the rounding error of evaluating `p(x)` with Horner's scheme.
fn rounding_bound(coefficients: &[f64], x: f64) -> f64 {
    let magnitudes: Vec<f64> = coefficients.iter().map(|coef| coef.abs()).collect();
    let terms = coefficients.len() as f64;
    4.0 * terms * f64::EPSILON * horner(&magnitudes, x.abs())
}

/// Roots of an arbitrary polynomial with non-zero leading coefficient.
///
/// Returns `None` when the coefficients are degenerate or the Schur
/// decomposition does not converge.
pub fn polynomial_roots(coefficients: &[f64]) -> Option<Vec<Complex<f64>>> {
    let leading = *coefficients.first()?;
    if leading == 0.0 || coefficients.iter().any(|coef| !coef.is_finite()) {
        return None;
    }

    match coefficients.len() {
        1 => Some(Vec::new()),
        2 => Some(vec![Complex::new(normalize_zero(-coefficients[1] / leading), 0.0)]),
        3 => Some(quadratic_roots(leading, coefficients[1], coefficients[2]).to_vec()),
        _ => {
            let roots = companion_roots(coefficients)?;
            Some(roots.into_iter().map(|root| polish(coefficients, root)).collect())
        }
    }
}

fn companion_roots(coefficients: &[f64]) -> Option<Vec<Complex<f64>>> {
    let degree = coefficients.len() - 1;
    let leading = coefficients[0];
    let companion = DMatrix::from_fn(degree, degree, |row, col| {
        if row == 0 {
            -coefficients[col + 1] / leading
        } else if row == col + 1 {
            1.0
        } else {
            0.0
        }
    });

    let schur = Schur::try_new(companion, SCHUR_EPSILON, SCHUR_MAX_ITERATIONS)?;
    let roots = schur.complex_eigenvalues().iter().copied().collect();
    Some(roots)
}

/// Newton refinement; a step is kept only while it shrinks the residual.
/// Real roots stay on the real axis.
fn polish(coefficients: &[f64], root: Complex<f64>) -> Complex<f64> {
    let derivative = derivative_coefficients(coefficients);
    let mut current = root;
    let mut residual = horner_complex(coefficients, current).norm();

    for _ in 0..NEWTON_MAX_ITERATIONS {
        if residual == 0.0 {
            break;
        }
        let slope = horner_complex(&derivative, current);
        if slope.norm() == 0.0 {
            break;
        }
        let mut candidate = current - horner_complex(coefficients, current) / slope;
        if root.im == 0.0 {
            candidate.im = 0.0;
        }
        let candidate_residual = horner_complex(coefficients, candidate).norm();
        if candidate_residual.is_nan() || candidate_residual >= residual {
            break;
        }
        current = candidate;
        residual = candidate_residual;
    }

    Complex::new(normalize_zero(current.re), normalize_zero(current.im))
}

/// Real roots ascending, then complex roots by real part, positive imaginary first.
pub fn sort_roots(mut roots: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
    roots.sort_by(|lhs, rhs| {
        let lhs_complex = lhs.im != 0.0;
        let rhs_complex = rhs.im != 0.0;
        match lhs_complex.cmp(&rhs_complex) {
            Ordering::Equal => lhs
                .re
                .total_cmp(&rhs.re)
                .then_with(|| rhs.im.total_cmp(&lhs.im)),
            other => other
        }
    });
    roots
}
