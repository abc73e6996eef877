//! The single live signal owned by a studio session
//!
//! Every producing operation builds a complete new [`Signal`] and hands it to
//! [`SignalStore::replace`]; nothing edits the buffer in place.

use crate::config::{StudioConfig, DEFAULT_LENGTH, DEFAULT_SAMPLING_RATE};
use log::debug;

/// Real-valued samples at a fixed sampling rate
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Samples x[n]
    pub samples: Vec<f64>,

    /// Sampling rate in Hz
    pub sampling_rate: u32,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sampling_rate: u32) -> Self {
        Self {
            samples,
            sampling_rate,
        }
    }

    /// Zero-filled signal of `length` samples
    pub fn zeros(length: usize, sampling_rate: u32) -> Self {
        Self::new(vec![0.0; length], sampling_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nyquist frequency in Hz
    pub fn nyquist_hz(&self) -> f64 {
        self.sampling_rate as f64 / 2.0
    }

    /// Duration covered by the samples in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sampling_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sampling_rate as f64
    }

    /// Time of each sample in seconds, for time-domain plots
    pub fn time_axis(&self) -> Vec<f64> {
        let fs = self.sampling_rate as f64;
        (0..self.samples.len()).map(|n| n as f64 / fs).collect()
    }
}

/// Exclusively owned holder of the current signal
#[derive(Debug, Clone, PartialEq)]
pub struct SignalStore {
    current: Signal,
}

impl Default for SignalStore {
    /// 1024 zero samples at 1024 Hz
    fn default() -> Self {
        Self {
            current: Signal::zeros(DEFAULT_LENGTH, DEFAULT_SAMPLING_RATE),
        }
    }
}

impl SignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the configured default signal
    pub fn with_config(config: &StudioConfig) -> Self {
        Self {
            current: Signal::zeros(config.default_length, config.default_sampling_rate),
        }
    }

    /// Swap in a new signal, dropping the previous one
    pub fn replace(&mut self, signal: Signal) {
        debug!(
            "signal replaced: {} samples at {} Hz",
            signal.len(),
            signal.sampling_rate
        );
        self.current = signal;
    }

    pub fn current(&self) -> &Signal {
        &self.current
    }

    pub fn samples(&self) -> &[f64] {
        &self.current.samples
    }

    pub fn sampling_rate(&self) -> u32 {
        self.current.sampling_rate
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}
