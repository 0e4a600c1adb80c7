use thiserror::Error;

use crate::equation::equationfamily::EquationFamily;

/// Failures of the evaluation core.
///
/// Every variant is raised before any computation starts, except
/// `RootSolveFailed` and `ResultOutOfRange`. Callers decide whether to re-prompt or abort; the
/// core never produces a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquationError {
    #[error("invalid coefficient {name}: {reason}")]
    InvalidCoefficient {
        name: &'static str,
        reason: &'static str
    },

    #[error("{family} equation takes {expected} coefficients, {found} given")]
    CoefficientCount {
        family: EquationFamily,
        expected: usize,
        found: usize
    },

    #[error("coefficient {name} is not a finite number")]
    NonFiniteCoefficient {
        name: &'static str
    },

    #[error("root solver did not converge for {0} equation")]
    RootSolveFailed(EquationFamily),

    #[error("{0} equation has roots or vertex outside the range of f64")]
    ResultOutOfRange(EquationFamily),

    #[error("unknown equation family '{0}'")]
    UnknownFamily(String)
}

impl EquationError {
    pub fn invalid_coefficient(name: &'static str, reason: &'static str) -> EquationError {
        EquationError::InvalidCoefficient { name, reason }
    }
}
