use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::equation::equation::{CoefficientSet, Equation};
use crate::equation::equationerror::EquationError;
use crate::equation::equationresult::EquationResult;
use crate::logging::log_evaluation;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot read batch file: {0}")]
    IOError(#[from] std::io::Error),

    #[error("cannot parse batch file: {0}")]
    JsonParseError(#[from] serde_json::Error)
}

/// Outcome of one request in a batch. Exactly one of `result` and `error`
/// is set.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    index: usize,
    request: CoefficientSet,
    evaluated_at: DateTime<Utc>,
    result: Option<EquationResult>,
    error: Option<String>
}

impl BatchEntry {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn request(&self) -> &CoefficientSet {
        &self.request
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    pub fn result(&self) -> Option<&EquationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }
}

/// Reads a JSON array of `{"family": ..., "coefficients": [...]}` objects.
///
/// Arity is not checked here so that one malformed entry fails alone.
pub fn read_batch<P: AsRef<Path>>(file_path: P) -> Result<Vec<CoefficientSet>, BatchError> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Evaluates one request: arity check, then the family's evaluator.
pub fn evaluate_request(request: &CoefficientSet) -> Result<EquationResult, EquationError> {
    let outcome = Equation::from_coefficients(request.family(), request.coefficients())
        .and_then(|equation| equation.evaluate());
    log_evaluation(request, &outcome);
    outcome
}

/// Evaluates every request independently; a failure never stops the batch.
pub fn run_batch(requests: &[CoefficientSet]) -> Vec<BatchEntry> {
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let outcome = evaluate_request(request);
            let evaluated_at = Utc::now();
            let (result, error) = match outcome {
                Ok(result) => (Some(result), None),
                Err(err) => (None, Some(err.to_string()))
            };
            BatchEntry {
                index,
                request: request.clone(),
                evaluated_at,
                result,
                error
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::equationfamily::EquationFamily;

    #[test]
    fn failures_stay_local_to_their_entry() {
        let requests = vec![
            CoefficientSet::new(EquationFamily::Linear, vec![0.0, 1.0]),
            CoefficientSet::new(EquationFamily::Cubic, vec![1.0]),
            CoefficientSet::new(EquationFamily::Quadratic, vec![1.0, -3.0, 2.0])
        ];
        let entries = run_batch(&requests);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].error(), Some("invalid coefficient a: a cannot be 0"));
        assert_eq!(entries[1].error(), Some("cubic equation takes 4 coefficients, 1 given"));
        assert!(entries[2].is_ok());
        assert_eq!(entries[2].index(), 2);
    }

    #[test]
    fn unreadable_batch_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_batch(dir.path().join("absent.json")), Err(BatchError::IOError(_))));

        let path = dir.path().join("batch.json");
        std::fs::write(&path, r#"{"family": "linear"}"#).unwrap();
        assert!(matches!(read_batch(&path), Err(BatchError::JsonParseError(_))));
    }
}
