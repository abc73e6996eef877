//! Error types for filter design, session persistence and console scripts

use std::path::PathBuf;
use thiserror::Error;

/// Invalid filter parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    #[error("{kind} order {order} is outside the allowed range {min}..={max}")]
    OrderOutOfRange {
        kind: &'static str,
        order: usize,
        min: usize,
        max: usize,
    },
    #[error("cutoff {cutoff_hz} Hz must lie strictly between 0 and Nyquist ({nyquist_hz} Hz)")]
    CutoffOutOfRange { cutoff_hz: f64, nyquist_hz: f64 },
}

/// Filtering could not run on the current signal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplyError {
    #[error("cannot filter an empty signal")]
    EmptySignal,
    #[error("signal contains a non-finite sample at index {index}")]
    NonFiniteSample { index: usize },
}

/// Anything that can go wrong when designing and applying a filter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Design(#[from] DesignError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// Waveform parameters rejected at the input boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("frequency must be a positive finite number, got {0}")]
    InvalidFrequency(f64),
    #[error("amplitude must lie in (0, 1e6], got {0}")]
    InvalidAmplitude(f64),
    #[error("sampling rate must be greater than zero")]
    InvalidSamplingRate,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session document could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("session document has an invalid sampling rate of 0 Hz")]
    InvalidSamplingRate,
    #[error("session document could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("sample {index} is not finite and cannot be stored as JSON")]
    NonFiniteSample { index: usize },
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Console script failure, `line` is 1-based
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl ScriptError {
    pub(crate) fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid studio configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("default_sampling_rate must be greater than zero")]
    InvalidSamplingRate,
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
