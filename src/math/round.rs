/// Rounds half to even at `digits` decimal places.
pub fn round(x: f64, digits: u32) -> f64 {
    let pow1: f64;
    let pow2: f64;

    if digits > 22 {
            /* pow1 and pow2 are each safe from overflow, but
               pow1*pow2 ~= pow(10.0, ndigits) might overflow */
        pow1 = (10.0 as f64).powi((digits - 22) as i32);
        pow2 = 1e22;
    }
    else {
        pow1 = (10.0 as f64).powi(digits as i32);
        pow2 = 1.0;
    }

    let y = (x * pow1) * pow2;
    if !y.is_finite() {
        return x;
    }

    let mut z = y.round();

    if (y-z).abs() == 0.5 {
        z = 2.0 * ((y / 2.0).round() as f64)
    }

    normalize_zero((z / pow2) / pow1)
}

/// Maps `-0.0` onto `0.0`, leaves everything else untouched.
pub fn normalize_zero(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

/// Rounded, shortest decimal text of `x` ("2", "-1.5", "0.333333").
pub fn format_number(x: f64, digits: u32) -> String {
    if x.is_nan() {
        return "NaN".to_owned();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".to_owned() } else { "-inf".to_owned() };
    }
    format!("{}", round(x, digits))
}

/// Like [`format_number`], but a non-zero `x` that would round to zero is
/// written with `digits` significant decimals instead: `1e-7`, `-2.5e-9`.
pub fn format_coefficient(x: f64, digits: u32) -> String {
    if x == 0.0 || !x.is_finite() || round(x, digits) != 0.0 {
        return format_number(x, digits);
    }
    let text = format!("{:.*e}", digits as usize, x);
    match text.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{}e{}", mantissa, exponent)
        }
        _ => text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round(2.5, 0), 2.0);
        assert_eq!(round(3.5, 0), 4.0);
        assert_eq!(round(1.2345678, 6), 1.234568);
    }

    #[test]
    fn negative_zero_is_normalized() {
        assert_eq!(format_number(-0.0, 6), "0");
        assert_eq!(format_number(-1e-12, 6), "0");
    }

    #[test]
    fn small_coefficients_keep_significant_digits() {
        assert_eq!(format_coefficient(1e-7, 6), "1e-7");
        assert_eq!(format_coefficient(-2.5e-9, 6), "-2.5e-9");
        assert_eq!(format_coefficient(0.25, 6), "0.25");
        assert_eq!(format_coefficient(0.0, 6), "0");
    }

    #[test]
    fn formats_shortest_text() {
        assert_eq!(format_number(2.0, 6), "2");
        assert_eq!(format_number(-1.5, 6), "-1.5");
        assert_eq!(format_number(1.0 / 3.0, 6), "0.333333");
        assert_eq!(format_number(f64::INFINITY, 6), "inf");
    }
}
