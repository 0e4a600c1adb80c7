use crate::math::round::normalize_zero;

/// A real function of one real variable.
///
/// Outside the function's real domain `value` and `derivative` return NaN
/// (or an infinity at a singularity) instead of failing.
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;
}

/// Evaluates `coefficients[0]·xⁿ + … + coefficients[n]` with Horner's scheme.
pub fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &coef| acc * x + coef)
}

/// Coefficients (highest degree first) of the derivative polynomial.
pub fn derivative_coefficients(coefficients: &[f64]) -> Vec<f64> {
    let degree = coefficients.len().saturating_sub(1);
    coefficients
        .iter()
        .take(degree)
        .enumerate()
        .map(|(i, &coef)| normalize_zero(coef * (degree - i) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_evaluates_descending_coefficients() {
        // x^2 - 2x + 1
        assert_eq!(horner(&[1.0, -2.0, 1.0], 3.0), 4.0);
        assert_eq!(horner(&[], 3.0), 0.0);
    }

    #[test]
    fn derivative_drops_constant_term() {
        assert_eq!(derivative_coefficients(&[1.0, -6.0, 11.0, -6.0]), vec![3.0, -12.0, 11.0]);
        assert!(derivative_coefficients(&[5.0]).is_empty());
    }
}
