use serde::{Deserialize, Serialize};

use crate::equation::equationerror::EquationError;
use crate::equation::equationfamily::EquationFamily;
use crate::equation::equationresult::EquationResult;
use crate::equation::evaluator;
use crate::math::curve::curve::{derivative_coefficients, horner, Curve};

const COEFFICIENT_NAMES: [&str; 4] = ["a", "b", "c", "d"];

/// Untyped request as it arrives from input files: a family tag plus a list
/// of coefficients whose length has not been checked yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    family: EquationFamily,
    coefficients: Vec<f64>
}

impl CoefficientSet {
    pub fn new(family: EquationFamily, coefficients: Vec<f64>) -> CoefficientSet {
        CoefficientSet { family, coefficients }
    }

    pub fn family(&self) -> EquationFamily {
        self.family
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// A fully typed equation request: one variant per family with exactly the
/// coefficients that family takes.
///
/// Family-specific constraints (non-zero leading coefficient, valid log base)
/// are checked by the evaluators, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoefficientSet", into = "CoefficientSet")]
pub enum Equation {
    Linear { a: f64, b: f64 },
    Quadratic { a: f64, b: f64, c: f64 },
    Cubic { a: f64, b: f64, c: f64, d: f64 },
    Exponential { a: f64, b: f64 },
    Logarithmic { a: f64, b: f64 }
}

impl Equation {
    /// Checks arity and finiteness, then builds the matching variant.
    pub fn from_coefficients(
        family: EquationFamily,
        coefficients: &[f64]
    ) -> Result<Equation, EquationError> {
        check_finite(coefficients)?;

        let equation = match (family, coefficients) {
            (EquationFamily::Linear, &[a, b]) => Equation::Linear { a, b },
            (EquationFamily::Quadratic, &[a, b, c]) => Equation::Quadratic { a, b, c },
            (EquationFamily::Cubic, &[a, b, c, d]) => Equation::Cubic { a, b, c, d },
            (EquationFamily::Exponential, &[a, b]) => Equation::Exponential { a, b },
            (EquationFamily::Logarithmic, &[a, b]) => Equation::Logarithmic { a, b },
            _ => {
                return Err(EquationError::CoefficientCount {
                    family,
                    expected: family.arity(),
                    found: coefficients.len()
                })
            }
        };
        Ok(equation)
    }

    pub fn family(&self) -> EquationFamily {
        match self {
            Equation::Linear { .. } => EquationFamily::Linear,
            Equation::Quadratic { .. } => EquationFamily::Quadratic,
            Equation::Cubic { .. } => EquationFamily::Cubic,
            Equation::Exponential { .. } => EquationFamily::Exponential,
            Equation::Logarithmic { .. } => EquationFamily::Logarithmic
        }
    }

    /// Coefficients in declaration order (`a`, `b`, …).
    pub fn coefficients(&self) -> Vec<f64> {
        match *self {
            Equation::Linear { a, b } => vec![a, b],
            Equation::Quadratic { a, b, c } => vec![a, b, c],
            Equation::Cubic { a, b, c, d } => vec![a, b, c, d],
            Equation::Exponential { a, b } => vec![a, b],
            Equation::Logarithmic { a, b } => vec![a, b]
        }
    }

    pub fn evaluate(&self) -> Result<EquationResult, EquationError> {
        evaluator::evaluate(self)
    }
}

/// Rejects NaN and infinities, naming the first offending coefficient.
pub(crate) fn check_finite(coefficients: &[f64]) -> Result<(), EquationError> {
    match coefficients
        .iter()
        .zip(COEFFICIENT_NAMES)
        .find(|(value, _)| !value.is_finite())
    {
        Some((_, name)) => Err(EquationError::NonFiniteCoefficient { name }),
        None => Ok(())
    }
}

impl TryFrom<CoefficientSet> for Equation {
    type Error = EquationError;

    fn try_from(value: CoefficientSet) -> Result<Self, Self::Error> {
        Equation::from_coefficients(value.family, &value.coefficients)
    }
}

impl From<Equation> for CoefficientSet {
    fn from(value: Equation) -> Self {
        CoefficientSet::new(value.family(), value.coefficients())
    }
}

impl Curve for Equation {
    fn value(&self, x: f64) -> f64 {
        match *self {
            Equation::Linear { a, b } => a * x + b,
            Equation::Quadratic { a, b, c } => horner(&[a, b, c], x),
            Equation::Cubic { a, b, c, d } => horner(&[a, b, c, d], x),
            Equation::Exponential { a, b } => a * b.powf(x),
            Equation::Logarithmic { a, b } => {
                if x > 0.0 { a * x.ln() / b.ln() } else { f64::NAN }
            }
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        match *self {
            Equation::Linear { a, .. } => a,
            Equation::Quadratic { a, b, c } => horner(&derivative_coefficients(&[a, b, c]), x),
            Equation::Cubic { a, b, c, d } => horner(&derivative_coefficients(&[a, b, c, d]), x),
            Equation::Exponential { a, b } => {
                if b > 0.0 { a * b.powf(x) * b.ln() } else { f64::NAN }
            }
            Equation::Logarithmic { a, b } => {
                if x > 0.0 { a / (x * b.ln()) } else { f64::NAN }
            }
        }
    }
}
