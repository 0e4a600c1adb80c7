use crate::equation::equationresult::{EquationResult, Point2D, Root};
use crate::math::round::{format_number, round};

/// Renders an [`EquationResult`] as the console report.
pub struct TextReport {
    precision: u32
}

impl TextReport {
    pub fn new(precision: u32) -> TextReport {
        TextReport { precision }
    }

    pub fn render(&self, result: &EquationResult) -> String {
        let family = result.family();
        let mut lines = vec![format!(
            "{} equation: {}",
            capitalize(family.name()),
            family.template()
        )];
        lines.push(format!("Expression : {}", result.expression()));

        if let Some(factored) = result.factored() {
            lines.push(format!("The possible factored version is : {}", factored));
        }

        if family.is_polynomial() || !result.roots().is_empty() {
            let roots: Vec<String> = result
                .roots()
                .iter()
                .map(|root| format!("({}, 0)", self.root(root)))
                .collect();
            let text = if roots.is_empty() { "none".to_owned() } else { roots.join(" ") };
            lines.push(format!("The x-intercept's coordinates are: {}", text));
        }

        if let Some(y_intercept) = result.y_intercept() {
            lines.push(format!("The y-intercept's coordinates are: {}", self.point(&y_intercept)));
        }

        if let Some(vertex) = result.vertex() {
            lines.push(format!("The vertex's coordinates are: {}", self.point(&vertex)));
        }

        lines.push(format!("Domain : {}", result.domain()));

        if let Some(restriction) = result.domain_restriction() {
            lines.push(format!("Restriction : {}", restriction));
        }

        lines.join("\n")
    }

    fn point(&self, point: &Point2D) -> String {
        format!(
            "({}, {})",
            format_number(point.x(), self.precision),
            format_number(point.y(), self.precision)
        )
    }

    /// `1.5`, `-1+2i`, `0.5-0.866025i`.
    fn root(&self, root: &Root) -> String {
        let re = format_number(root.re(), self.precision);
        let im = round(root.im(), self.precision);
        if im == 0.0 {
            return re;
        }
        let sign = if im < 0.0 { '-' } else { '+' };
        let magnitude = im.abs();
        if magnitude == 1.0 {
            format!("{}{}i", re, sign)
        } else {
            format!("{}{}{}i", re, sign, format_number(magnitude, self.precision))
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::evaluator::{evaluate_exponential, evaluate_logarithmic, evaluate_quadratic};

    #[test]
    fn renders_quadratic_report() {
        let result = evaluate_quadratic(1.0, -2.0, 1.0).unwrap();
        let expected = "\
Quadratic equation: ax^2 + bx + c
Expression : x^2 - 2x + 1
The possible factored version is : (x - 1)^2
The x-intercept's coordinates are: (1, 0) (1, 0)
The y-intercept's coordinates are: (0, 1)
The vertex's coordinates are: (1, 0)
Domain : R";
        assert_eq!(TextReport::new(6).render(&result), expected);
    }

    #[test]
    fn renders_complex_roots() {
        let result = evaluate_quadratic(1.0, 0.0, 1.0).unwrap();
        let report = TextReport::new(6).render(&result);
        assert!(report.contains("(0+i, 0) (0-i, 0)"), "{report}");
        assert!(report.ends_with("Domain : C"));
    }

    #[test]
    fn exponential_report_has_no_intercept_line() {
        let report = TextReport::new(6).render(&evaluate_exponential(2.0, -3.0).unwrap());
        assert!(!report.contains("x-intercept"));
        assert!(report.contains("Expression : 2*(-3)^x"));
        assert!(report.ends_with("Domain : C"));
    }

    #[test]
    fn logarithmic_report_states_restriction() {
        let report = TextReport::new(2).render(&evaluate_logarithmic(1.0, 2.0).unwrap());
        assert!(report.contains("The x-intercept's coordinates are: (1, 0)"));
        assert!(report.ends_with("Restriction : x > 0"));
    }
}
