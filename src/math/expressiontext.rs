use nalgebra::Complex;

use crate::math::round::{format_coefficient, format_number, round};

// ─────────────────────────────────────────────────────────────────────────────
// Plain-text rendering of expressions
// ─────────────────────────────────────────────────────────────────────────────
//
// Everything here is cosmetic: values are rounded to `digits` decimal places
// and nothing downstream parses the text back. A non-zero coefficient is never
// dropped; when it would round to zero it is written in scientific notation.

/// `[1, -2, 1]` → `"x^2 - 2x + 1"`. Coefficients are highest degree first.
pub fn format_polynomial(coefficients: &[f64], digits: u32) -> String {
    let degree = coefficients.len().saturating_sub(1);
    let mut text = String::new();

    for (i, &coef) in coefficients.iter().enumerate() {
        if coef == 0.0 {
            continue;
        }
        let power = degree - i;
        let magnitude = coef.abs();

        if text.is_empty() {
            if coef < 0.0 {
                text.push('-');
            }
        } else {
            text.push_str(if coef < 0.0 { " - " } else { " + " });
        }

        if round(magnitude, digits) != 1.0 || power == 0 {
            let number = format_coefficient(magnitude, digits);
            let scientific = number.contains('e');
            text.push_str(&number);
            if scientific && power > 0 {
                text.push('*');
            }
        }
        match power {
            0 => {}
            1 => text.push('x'),
            _ => text.push_str(&format!("x^{}", power))
        }
    }

    if text.is_empty() {
        "0".to_owned()
    } else {
        text
    }
}

/// Prefixes `body` with the scalar `a`: `1` vanishes, `-1` becomes a sign.
pub fn format_scaled(a: f64, body: &str, digits: u32) -> String {
    let rounded = round(a, digits);
    if rounded == 1.0 {
        body.to_owned()
    } else if rounded == -1.0 {
        format!("-{}", body)
    } else {
        format!("{}*{}", format_coefficient(a, digits), body)
    }
}

/// `a·bˣ`, e.g. `"2*3^x"` or `"(-3)^x"`.
pub fn format_exponential(a: f64, b: f64, digits: u32) -> String {
    let base = format_coefficient(b, digits);
    let body = if b < 0.0 {
        format!("({})^x", base)
    } else {
        format!("{}^x", base)
    };
    format_scaled(a, &body, digits)
}

/// `a·log_b(x)`, e.g. `"3*log_2(x)"`.
pub fn format_logarithmic(a: f64, b: f64, digits: u32) -> String {
    let body = format!("log_{}(x)", format_coefficient(b, digits));
    format_scaled(a, &body, digits)
}

/// Best-effort factored form `a(x - r1)(x - r2)…` of a real polynomial.
///
/// Real roots that agree at `digits` places are merged into a power; each
/// conjugate pair becomes one irreducible quadratic factor.
pub fn format_factored(leading: f64, roots: &[Complex<f64>], digits: u32) -> String {
    let mut factors: Vec<(String, usize)> = Vec::new();

    for root in roots {
        let factor = if root.im == 0.0 {
            linear_factor(root.re, digits)
        } else if root.im > 0.0 {
            let sum = round(-2.0 * root.re, digits);
            let product = round(root.re * root.re + root.im * root.im, digits);
            format!("({})", format_polynomial(&[1.0, sum, product], digits))
        } else {
            continue;
        };
        match factors.iter_mut().find(|(text, _)| *text == factor) {
            Some((_, multiplicity)) => *multiplicity += 1,
            None => factors.push((factor, 1))
        }
    }

    let body: String = factors
        .iter()
        .map(|(factor, multiplicity)| {
            if *multiplicity > 1 {
                format!("{}^{}", factor, multiplicity)
            } else {
                factor.clone()
            }
        })
        .collect();

    let rounded = round(leading, digits);
    if rounded == 1.0 {
        body
    } else if rounded == -1.0 {
        format!("-{}", body)
    } else {
        format!("{}{}", format_coefficient(leading, digits), body)
    }
}

fn linear_factor(root: f64, digits: u32) -> String {
    let rounded = round(root, digits);
    if rounded == 0.0 {
        "x".to_owned()
    } else if rounded > 0.0 {
        format!("(x - {})", format_number(rounded, digits))
    } else {
        format!("(x + {})", format_number(-rounded, digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(re: f64) -> Complex<f64> {
        Complex::new(re, 0.0)
    }

    #[test]
    fn polynomial_skips_zero_terms_and_unit_coefficients() {
        assert_eq!(format_polynomial(&[1.0, -2.0, 1.0], 6), "x^2 - 2x + 1");
        assert_eq!(format_polynomial(&[2.0, 0.0, -3.0], 6), "2x^2 - 3");
        assert_eq!(format_polynomial(&[-1.0, 0.5], 6), "-x + 0.5");
        assert_eq!(format_polynomial(&[0.0, 0.0], 6), "0");
    }

    #[test]
    fn tiny_coefficients_are_never_dropped() {
        assert_eq!(format_polynomial(&[1e-7, 1.0], 6), "1e-7*x + 1");
        assert_eq!(format_polynomial(&[-3e-8, 0.0, 2.0], 6), "-3e-8*x^2 + 2");
        assert_eq!(format_polynomial(&[1.0, 0.0, 4e-9], 6), "x^2 + 4e-9");
        assert_eq!(format_factored(1e-7, &[real(-1e7)], 6), "1e-7(x + 10000000)");
        assert_eq!(format_scaled(-5e-8, "2^x", 6), "-5e-8*2^x");
    }

    #[test]
    fn scaled_expressions() {
        assert_eq!(format_exponential(2.0, 3.0, 6), "2*3^x");
        assert_eq!(format_exponential(1.0, -3.0, 6), "(-3)^x");
        assert_eq!(format_logarithmic(-1.0, 2.0, 6), "-log_2(x)");
        assert_eq!(format_logarithmic(3.0, 2.5, 6), "3*log_2.5(x)");
    }

    #[test]
    fn factored_form_merges_repeated_roots() {
        assert_eq!(format_factored(1.0, &[real(1.0), real(1.0)], 6), "(x - 1)^2");
        assert_eq!(
            format_factored(2.0, &[real(-1.5), real(0.0), real(3.0)], 6),
            "2(x + 1.5)x(x - 3)"
        );
    }

    #[test]
    fn factored_form_keeps_irreducible_quadratic() {
        let roots = [real(1.0), Complex::new(0.0, 1.0), Complex::new(0.0, -1.0)];
        assert_eq!(format_factored(-1.0, &roots, 6), "-(x - 1)(x^2 + 1)");
    }
}
