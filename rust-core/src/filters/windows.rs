//! Window functions for FIR filter design and spectral analysis
//!
//! Symmetric windows: both endpoints are evaluated, so a window of length M
//! uses a period of M-1 samples.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Rectangular window (no windowing)
    #[default]
    Rectangular,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~53 dB
    Hamming,

    /// Hanning window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~44 dB
    Hanning,
}

impl WindowType {
    pub const ALL: [WindowType; 3] = [
        WindowType::Rectangular,
        WindowType::Hamming,
        WindowType::Hanning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Rectangular => "Rectangular",
            WindowType::Hamming => "Hamming",
            WindowType::Hanning => "Hanning",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowType::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown window '{s}'"))
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    // A single-point window has no period to speak of
    if length == 1 {
        return vec![1.0];
    }

    let m = length as f64;

    match window_type {
        WindowType::Rectangular => vec![1.0; length],

        WindowType::Hamming => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / (m - 1.0);
                0.54 - 0.46 * angle.cos()
            })
            .collect(),

        WindowType::Hanning => (0..length)
            .map(|n| {
                let angle = 2.0 * PI * n as f64 / (m - 1.0);
                0.5 - 0.5 * angle.cos()
            })
            .collect(),
    }
}
