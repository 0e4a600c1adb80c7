//! Process-wide logger setup and audit events for evaluations.
//!
//! The library itself only talks to the `log` facade; a front-end calls
//! [`init_logging`] once to route records either to stderr or to rotating
//! files in a directory.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::equation::equation::CoefficientSet;
use crate::equation::equationerror::EquationError;
use crate::equation::equationresult::EquationResult;

const LOG_FILE_BASENAME: &str = "eqanalysis";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    Directory(PathBuf)
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("failed to create log directory `{}`: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error
    },

    #[error("failed to start logger: {0}")]
    Backend(#[from] flexi_logger::FlexiLoggerError),

    #[error("logging already initialized with level `{level}` to {sink:?}")]
    AlreadyInitialized {
        level: &'static str,
        sink: LogSink
    }
}

struct LoggingState {
    level: &'static str,
    sink: LogSink,
    _logger: LoggerHandle
}

/// Starts the global logger.
///
/// Calling it again with the same level and destination is a no-op; any
/// other combination is rejected because the backend cannot be swapped.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), LoggingError> {
    let normalized_level = normalize_level(level)?;
    let sink = match log_dir {
        Some(dir) => LogSink::Directory(dir.to_path_buf()),
        None => LogSink::Stderr
    };

    if let Some(state) = LOGGING_STATE.get() {
        return check_same(state, normalized_level, &sink);
    }

    let init_sink = sink.clone();
    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, LoggingError> {
        let logger = Logger::try_with_str(normalized_level)?;
        let handle = match &init_sink {
            LogSink::Stderr => logger
                .log_to_stderr()
                .format_for_stderr(flexi_logger::default_format)
                .start()?,
            LogSink::Directory(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDirectory {
                    path: dir.clone(),
                    source
                })?;
                logger
                    .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                    .rotate(
                        Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                        Naming::Numbers,
                        Cleanup::KeepLogFiles(MAX_LOG_FILES)
                    )
                    .write_mode(WriteMode::BufferAndFlush)
                    .append()
                    .format_for_files(flexi_logger::detailed_format)
                    .start()?
            }
        };

        info!(
            "event=app_start status=ok platform={} version={} level={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION"),
            normalized_level
        );

        Ok(LoggingState {
            level: normalized_level,
            sink: init_sink,
            _logger: handle
        })
    })?;

    check_same(state, normalized_level, &sink)
}

/// Records the outcome of one evaluation request for audit.
pub fn log_evaluation(request: &CoefficientSet, outcome: &Result<EquationResult, EquationError>) {
    match outcome {
        Ok(result) => info!(
            "event=evaluate family={} coefficients={:?} status=ok domain={} roots={}",
            request.family(),
            request.coefficients(),
            result.domain(),
            result.roots().len()
        ),
        Err(err) => error!(
            "event=evaluate family={} coefficients={:?} status=error reason=\"{}\"",
            request.family(),
            request.coefficients(),
            err
        )
    }
}

fn check_same(state: &LoggingState, level: &'static str, sink: &LogSink) -> Result<(), LoggingError> {
    if state.level == level && state.sink == *sink {
        Ok(())
    } else {
        Err(LoggingError::AlreadyInitialized {
            level: state.level,
            sink: state.sink.clone()
        })
    }
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LoggingError::UnsupportedLevel(level.to_owned()))
    }
}
