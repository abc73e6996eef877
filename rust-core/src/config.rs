//! Studio defaults
//!
//! Every field falls back to its default when absent, so a configuration
//! file only needs to name the values it overrides.

use crate::error::ConfigError;
use crate::generator::WaveformSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default sampling rate of a fresh store, in Hz
pub const DEFAULT_SAMPLING_RATE: u32 = 1024;

/// Default number of samples in a fresh store
pub const DEFAULT_LENGTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Sampling rate of the zero-filled signal a new store starts with
    pub default_sampling_rate: u32,

    /// Length of the zero-filled signal a new store starts with
    pub default_length: usize,

    /// Generator parameters shown before the user touches anything
    pub generator: WaveformSpec,

    /// FIR tap count
    pub fir_order: usize,

    /// FIR cutoff in Hz
    pub fir_cutoff_hz: f64,

    /// Butterworth order
    pub iir_order: usize,

    /// Butterworth cutoff in Hz
    pub iir_cutoff_hz: f64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            default_sampling_rate: DEFAULT_SAMPLING_RATE,
            default_length: DEFAULT_LENGTH,
            generator: WaveformSpec::default(),
            fir_order: 51,
            fir_cutoff_hz: 100.0,
            iir_order: 4,
            iir_cutoff_hz: 100.0,
        }
    }
}

impl StudioConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.default_sampling_rate == 0 {
            return Err(ConfigError::InvalidSamplingRate);
        }
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::WaveShape;

    #[test]
    fn test_default_values() {
        let config = StudioConfig::default();
        assert_eq!(config.default_sampling_rate, 1024);
        assert_eq!(config.default_length, 1024);
        assert_eq!(config.generator.shape, WaveShape::Sine);
        assert_eq!(config.generator.frequency, 50.0);
        assert_eq!(config.generator.amplitude, 1.0);
        assert_eq!(config.fir_order, 51);
        assert_eq!(config.iir_order, 4);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = StudioConfig::from_json_str(
            r#"{"default_sampling_rate": 8000, "generator": {"sigType": "Square"}}"#,
        )
        .unwrap();

        assert_eq!(config.default_sampling_rate, 8000);
        assert_eq!(config.default_length, 1024);
        assert_eq!(config.generator.shape, WaveShape::Square);
        assert_eq!(config.generator.frequency, 50.0);
        assert_eq!(config.fir_cutoff_hz, 100.0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(matches!(
            StudioConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_sampling_rate_is_rejected() {
        assert!(matches!(
            StudioConfig::from_json_str(r#"{"default_sampling_rate": 0}"#),
            Err(ConfigError::InvalidSamplingRate)
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = StudioConfig::from_path("/nonexistent/dsp-studio/config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
