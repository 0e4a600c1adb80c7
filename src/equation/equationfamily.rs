use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::equation::equationerror::EquationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquationFamily {
    Linear,
    Quadratic,
    Cubic,
    Exponential,
    Logarithmic
}

impl EquationFamily {
    pub const ALL: [EquationFamily; 5] = [
        EquationFamily::Linear,
        EquationFamily::Quadratic,
        EquationFamily::Cubic,
        EquationFamily::Exponential,
        EquationFamily::Logarithmic
    ];

    /// Number of coefficients the family takes.
    pub fn arity(&self) -> usize {
        match self {
            EquationFamily::Linear => 2,
            EquationFamily::Quadratic => 3,
            EquationFamily::Cubic => 4,
            EquationFamily::Exponential => 2,
            EquationFamily::Logarithmic => 2
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquationFamily::Linear => "linear",
            EquationFamily::Quadratic => "quadratic",
            EquationFamily::Cubic => "cubic",
            EquationFamily::Exponential => "exponential",
            EquationFamily::Logarithmic => "logarithmic"
        }
    }

    /// Generic form with symbolic coefficients, e.g. `"ax^2 + bx + c"`.
    pub fn template(&self) -> &'static str {
        match self {
            EquationFamily::Linear => "ax + b",
            EquationFamily::Quadratic => "ax^2 + bx + c",
            EquationFamily::Cubic => "ax^3 + bx^2 + cx + d",
            EquationFamily::Exponential => "a*b^x",
            EquationFamily::Logarithmic => "a*log_b(x)"
        }
    }

    pub fn is_polynomial(&self) -> bool {
        matches!(
            self,
            EquationFamily::Linear | EquationFamily::Quadratic | EquationFamily::Cubic
        )
    }
}

impl fmt::Display for EquationFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EquationFamily {
    type Err = EquationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        EquationFamily::ALL
            .into_iter()
            .find(|family| family.name() == normalized)
            .ok_or_else(|| EquationError::UnknownFamily(s.to_owned()))
    }
}
