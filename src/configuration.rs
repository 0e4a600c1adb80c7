use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equation::equationfamily::EquationFamily;
use crate::plot::samplingwindow::SamplingWindow;

/// Decimals beyond this are noise for an `f64`.
pub const MAX_PRECISION: u32 = 15;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("precision {0} exceeds the maximum of {max}", max = MAX_PRECISION)]
    PrecisionTooLarge(u32)
}

/// Settings shared by the console front-end.
///
/// Every field is optional in the JSON file; missing ones take the
/// `Default` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    precision: u32,
    default_window: SamplingWindow,
    logarithmic_window: SamplingWindow,
    log_level: String,
    log_dir: Option<PathBuf>
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            precision: 6,
            default_window: SamplingWindow::default_for(EquationFamily::Linear),
            logarithmic_window: SamplingWindow::default_for(EquationFamily::Logarithmic),
            log_level: "info".to_owned(),
            log_dir: None
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_str(json)?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigurationError::PrecisionTooLarge(self.precision));
        }
        Ok(())
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn with_precision(mut self, precision: u32) -> Result<Configuration, ConfigurationError> {
        if precision > MAX_PRECISION {
            return Err(ConfigurationError::PrecisionTooLarge(precision));
        }
        self.precision = precision;
        Ok(self)
    }

    /// Window used when sampling an equation of `family`.
    pub fn window_for(&self, family: EquationFamily) -> SamplingWindow {
        match family {
            EquationFamily::Logarithmic => self.logarithmic_window,
            _ => self.default_window
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}
