use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equation::equationfamily::EquationFamily;

pub const DEFAULT_SAMPLES: usize = 400;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("sampling window start {start} must be below end {end}")]
    InvertedWindow { start: f64, end: f64 },

    #[error("sampling window needs at least 2 samples, {0} given")]
    TooFewSamples(usize),

    #[error("sampling window bounds must be finite")]
    NonFiniteBound
}

/// Closed interval `[start, end]` sampled at `samples` evenly spaced points.
///
/// Every instance is valid: JSON input goes through the same checks as `new`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSamplingWindow")]
pub struct SamplingWindow {
    start: f64,
    end: f64,
    samples: usize
}

#[derive(Deserialize)]
struct RawSamplingWindow {
    start: f64,
    end: f64,
    samples: usize
}

impl TryFrom<RawSamplingWindow> for SamplingWindow {
    type Error = SamplingError;

    fn try_from(raw: RawSamplingWindow) -> Result<SamplingWindow, SamplingError> {
        SamplingWindow::new(raw.start, raw.end, raw.samples)
    }
}

impl SamplingWindow {
    pub fn new(start: f64, end: f64, samples: usize) -> Result<SamplingWindow, SamplingError> {
        let window = SamplingWindow { start, end, samples };
        window.validate()?;
        Ok(window)
    }

    /// `[-10, 10]`, or `[0.1, 10]` for logarithms to stay clear of x = 0.
    pub fn default_for(family: EquationFamily) -> SamplingWindow {
        match family {
            EquationFamily::Logarithmic => SamplingWindow { start: 0.1, end: 10.0, samples: DEFAULT_SAMPLES },
            _ => SamplingWindow { start: -10.0, end: 10.0, samples: DEFAULT_SAMPLES }
        }
    }

    fn validate(&self) -> Result<(), SamplingError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SamplingError::NonFiniteBound);
        }
        if self.start >= self.end {
            return Err(SamplingError::InvertedWindow { start: self.start, end: self.end });
        }
        if self.samples < 2 {
            return Err(SamplingError::TooFewSamples(self.samples));
        }
        Ok(())
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sample abscissas; the last one is exactly `end`.
    pub fn abscissas(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.samples - 1;
        let width = self.end - self.start;
        (0..self.samples).map(move |i| {
            if i == last {
                self.end
            } else {
                self.start + width * i as f64 / last as f64
            }
        })
    }
}
