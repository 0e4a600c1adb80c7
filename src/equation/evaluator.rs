use log::{debug, warn};
use nalgebra::Complex;

use crate::equation::equation::{check_finite, Equation};
use crate::equation::equationerror::EquationError;
use crate::equation::equationfamily::EquationFamily;
use crate::equation::equationresult::{DomainClassification, EquationResult, Point2D, Root};
use crate::math::expressiontext::{
    format_exponential,
    format_factored,
    format_logarithmic,
    format_polynomial
};
use crate::math::polynomial::polynomialroots::{cubic_roots, quadratic_roots};
use crate::math::round::normalize_zero;

/// Decimal places used in the expression and factored-form text.
pub const EXPRESSION_DIGITS: u32 = 6;

const LEADING_ZERO_REASON: &str = "a cannot be 0";
const LOG_BASE_REASON: &str = "base must be positive and ≠ 1";

/// Dispatches a typed request to the evaluator of its family.
pub fn evaluate(equation: &Equation) -> Result<EquationResult, EquationError> {
    let outcome = match *equation {
        Equation::Linear { a, b } => evaluate_linear(a, b),
        Equation::Quadratic { a, b, c } => evaluate_quadratic(a, b, c),
        Equation::Cubic { a, b, c, d } => evaluate_cubic(a, b, c, d),
        Equation::Exponential { a, b } => evaluate_exponential(a, b),
        Equation::Logarithmic { a, b } => evaluate_logarithmic(a, b)
    };
    match &outcome {
        Ok(result) => debug!(
            "event=evaluate family={} expression=\"{}\" domain={} roots={}",
            result.family(),
            result.expression(),
            result.domain(),
            result.roots().len()
        ),
        Err(error) => warn!("event=evaluate family={} status=rejected reason=\"{}\"", equation.family(), error)
    }
    outcome
}

/// `a·x + b`, `a ≠ 0`.
pub fn evaluate_linear(a: f64, b: f64) -> Result<EquationResult, EquationError> {
    check_finite(&[a, b])?;
    require_non_zero_leading(a)?;

    let root = Root::real(normalize_zero(-b / a));
    require_in_range(EquationFamily::Linear, &[root.to_complex()])?;
    let result = EquationResult::new(
        EquationFamily::Linear,
        format_polynomial(&[a, b], EXPRESSION_DIGITS),
        DomainClassification::Real
    )
    .with_factored(format_factored(a, &[root.to_complex()], EXPRESSION_DIGITS))
    .with_roots(vec![root])
    .with_y_intercept(b);
    Ok(result)
}

/// `a·x² + b·x + c`, `a ≠ 0`. Roots come from the quadratic formula over ℂ.
pub fn evaluate_quadratic(a: f64, b: f64, c: f64) -> Result<EquationResult, EquationError> {
    check_finite(&[a, b, c])?;
    require_non_zero_leading(a)?;

    let complex_roots = quadratic_roots(a, b, c);
    let roots: Vec<Root> = complex_roots.iter().copied().map(Root::from).collect();
    let vertex_x = normalize_zero(-b / (2.0 * a));
    let vertex_y = normalize_zero(a * vertex_x * vertex_x + b * vertex_x + c);
    require_in_range(EquationFamily::Quadratic, &complex_roots)?;
    if !vertex_x.is_finite() || !vertex_y.is_finite() {
        return Err(EquationError::ResultOutOfRange(EquationFamily::Quadratic));
    }

    let result = EquationResult::new(
        EquationFamily::Quadratic,
        format_polynomial(&[a, b, c], EXPRESSION_DIGITS),
        DomainClassification::of_roots(&roots)
    )
    .with_factored(format_factored(a, &complex_roots, EXPRESSION_DIGITS))
    .with_roots(roots)
    .with_y_intercept(c)
    .with_vertex(Point2D::new(vertex_x, vertex_y));
    Ok(result)
}

/// `a·x³ + b·x² + c·x + d`, `a ≠ 0`. Roots come from the companion-matrix solver.
pub fn evaluate_cubic(a: f64, b: f64, c: f64, d: f64) -> Result<EquationResult, EquationError> {
    check_finite(&[a, b, c, d])?;
    require_non_zero_leading(a)?;

    let complex_roots =
        cubic_roots(a, b, c, d).ok_or(EquationError::RootSolveFailed(EquationFamily::Cubic))?;
    require_in_range(EquationFamily::Cubic, &complex_roots)?;
    let roots: Vec<Root> = complex_roots.iter().copied().map(Root::from).collect();

    let result = EquationResult::new(
        EquationFamily::Cubic,
        format_polynomial(&[a, b, c, d], EXPRESSION_DIGITS),
        DomainClassification::of_roots(&roots)
    )
    .with_factored(format_factored(a, &complex_roots, EXPRESSION_DIGITS))
    .with_roots(roots)
    .with_y_intercept(d);
    Ok(result)
}

/// `a·bˣ`. No roots are computed; only the domain is classified: a
/// non-positive base leaves bˣ undefined over the reals for non-integer x.
pub fn evaluate_exponential(a: f64, b: f64) -> Result<EquationResult, EquationError> {
    check_finite(&[a, b])?;

    let domain = if b > 0.0 {
        DomainClassification::Real
    } else {
        DomainClassification::Complex
    };
    let result = EquationResult::new(
        EquationFamily::Exponential,
        format_exponential(a, b, EXPRESSION_DIGITS),
        domain
    )
    .with_y_intercept(a);
    Ok(result)
}

/// `a·log_b(x)`, `b > 0`, `b ≠ 1`.
///
/// The result only records that x must be positive; no x is evaluated here.
pub fn evaluate_logarithmic(a: f64, b: f64) -> Result<EquationResult, EquationError> {
    check_finite(&[a, b])?;
    if b <= 0.0 || b == 1.0 {
        return Err(EquationError::invalid_coefficient("b", LOG_BASE_REASON));
    }

    // log_b(1) = 0 for every valid base; a zero multiplier vanishes everywhere.
    let roots = if a != 0.0 { vec![Root::real(1.0)] } else { Vec::new() };
    let result = EquationResult::new(
        EquationFamily::Logarithmic,
        format_logarithmic(a, b, EXPRESSION_DIGITS),
        DomainClassification::Real
    )
    .with_roots(roots)
    .with_domain_restriction("x > 0");
    Ok(result)
}

fn require_non_zero_leading(a: f64) -> Result<(), EquationError> {
    if a == 0.0 {
        Err(EquationError::invalid_coefficient("a", LEADING_ZERO_REASON))
    } else {
        Ok(())
    }
}

fn require_in_range(family: EquationFamily, roots: &[Complex<f64>]) -> Result<(), EquationError> {
    if roots.iter().all(|root| root.re.is_finite() && root.im.is_finite()) {
        Ok(())
    } else {
        Err(EquationError::ResultOutOfRange(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_intercepts() {
        let result = evaluate_linear(2.0, 3.0).unwrap();
        assert_eq!(result.x_intercepts(), vec![Point2D::new(-1.5, 0.0)]);
        assert_eq!(result.y_intercept(), Some(Point2D::new(0.0, 3.0)));
        assert_eq!(result.expression(), "2x + 3");
        assert_eq!(result.factored(), Some("2(x + 1.5)"));
        assert_eq!(result.domain(), DomainClassification::Real);
    }

    #[test]
    fn linear_through_origin_has_positive_zero_root() {
        let result = evaluate_linear(-4.0, 0.0).unwrap();
        assert!(result.roots()[0].re().is_sign_positive());
    }

    #[test]
    fn leading_zero_is_rejected_for_polynomials() {
        let expected = EquationError::invalid_coefficient("a", "a cannot be 0");
        assert_eq!(evaluate_linear(0.0, 1.0).unwrap_err(), expected);
        assert_eq!(evaluate_quadratic(0.0, 1.0, 1.0).unwrap_err(), expected);
        assert_eq!(evaluate_cubic(0.0, 1.0, 1.0, 1.0).unwrap_err(), expected);
    }

    #[test]
    fn quadratic_double_root() {
        let result = evaluate_quadratic(1.0, -2.0, 1.0).unwrap();
        assert_eq!(result.vertex(), Some(Point2D::new(1.0, 0.0)));
        assert_eq!(result.factored(), Some("(x - 1)^2"));
        assert_eq!(result.domain(), DomainClassification::Real);
        assert_eq!(result.x_intercepts().len(), 2);
    }

    #[test]
    fn quadratic_negative_discriminant_is_complex() {
        let result = evaluate_quadratic(1.0, 2.0, 5.0).unwrap();
        assert_eq!(result.domain(), DomainClassification::Complex);
        assert_eq!(result.roots()[0], Root::new(-1.0, 2.0));
        assert_eq!(result.roots()[1], Root::new(-1.0, -2.0));
        assert!(result.x_intercepts().is_empty());
        assert_eq!(result.factored(), Some("(x^2 + 2x + 5)"));
    }

    #[test]
    fn cubic_with_complex_pair_is_complex() {
        let result = evaluate_cubic(1.0, 0.0, 0.0, -8.0).unwrap();
        assert_eq!(result.domain(), DomainClassification::Complex);
        assert_eq!(result.x_intercepts().len(), 1);
        assert!((result.x_intercepts()[0].x() - 2.0).abs() < 1e-9);
        assert_eq!(result.y_intercept(), Some(Point2D::new(0.0, -8.0)));
        assert_eq!(result.vertex(), None);
    }

    #[test]
    fn huge_coefficients_keep_accurate_roots() {
        let result = evaluate_quadratic(1e160, 1e160, 1.0).unwrap();
        assert_eq!(result.domain(), DomainClassification::Real);
        assert!((result.roots()[0].re() + 1.0).abs() < 1e-12);
        assert!((result.roots()[1].re() / -1e-160 - 1.0).abs() < 1e-12);
        assert_eq!(result.vertex().map(|vertex| vertex.x()), Some(-0.5));
    }

    #[test]
    fn unrepresentable_results_are_rejected() {
        // Roots are fine but the vertex sits near y = -2.5e399.
        assert_eq!(
            evaluate_quadratic(1.0, 1e200, 1.0).unwrap_err(),
            EquationError::ResultOutOfRange(EquationFamily::Quadratic)
        );
        assert_eq!(
            evaluate_linear(1e-300, 1e300).unwrap_err(),
            EquationError::ResultOutOfRange(EquationFamily::Linear)
        );
    }

    #[test]
    fn tiny_leading_coefficient_is_still_rendered() {
        let result = evaluate_linear(1e-7, 1.0).unwrap();
        assert_eq!(result.expression(), "1e-7*x + 1");
        assert_eq!(result.factored(), Some("1e-7(x + 10000000)"));
    }

    #[test]
    fn exponential_has_no_roots() {
        let result = evaluate_exponential(2.0, 3.0).unwrap();
        assert!(result.roots().is_empty());
        assert_eq!(result.expression(), "2*3^x");
        assert_eq!(result.y_intercept(), Some(Point2D::new(0.0, 2.0)));
    }

    #[test]
    fn logarithmic_records_restriction() {
        let result = evaluate_logarithmic(3.0, 10.0).unwrap();
        assert_eq!(result.domain_restriction(), Some("x > 0"));
        assert_eq!(result.x_intercepts(), vec![Point2D::new(1.0, 0.0)]);
        assert_eq!(result.y_intercept(), None);
        assert_eq!(
            evaluate_logarithmic(1.0, 0.0).unwrap_err(),
            EquationError::invalid_coefficient("b", "base must be positive and ≠ 1")
        );
    }
}
