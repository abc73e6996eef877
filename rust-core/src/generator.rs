//! Test waveform generation
//!
//! Every waveform covers exactly one second: `sampling_rate` samples at
//! `t[n] = n / sampling_rate`.

use crate::error::GenerateError;
use crate::store::Signal;
use log::warn;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Waveform shape selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaveShape {
    /// A·sin(2πft)
    #[default]
    Sine,

    /// ±A, positive on the first half of each period
    Square,

    /// Ramp from -A to A once per period, zero at t = 0
    Sawtooth,

    /// Gaussian white noise with standard deviation A
    Noise,
}

impl WaveShape {
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Square,
        WaveShape::Sawtooth,
        WaveShape::Noise,
    ];

    /// Name used in session files
    pub fn name(&self) -> &'static str {
        match self {
            WaveShape::Sine => "Sine",
            WaveShape::Square => "Square",
            WaveShape::Sawtooth => "Sawtooth",
            WaveShape::Noise => "Noise",
        }
    }
}

impl fmt::Display for WaveShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WaveShape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown waveform shape '{s}'"))
    }
}

/// Largest accepted amplitude, keeps `Noise` samples far from overflow
pub const MAX_AMPLITUDE: f64 = 1.0e6;

/// Generator parameters, also stored in sessions as `params`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformSpec {
    #[serde(rename = "sigType", deserialize_with = "lenient_shape")]
    pub shape: WaveShape,

    /// Frequency in Hz
    #[serde(rename = "freq")]
    pub frequency: f64,

    #[serde(rename = "amp")]
    pub amplitude: f64,
}

impl Default for WaveformSpec {
    fn default() -> Self {
        Self {
            shape: WaveShape::Sine,
            frequency: 50.0,
            amplitude: 1.0,
        }
    }
}

impl WaveformSpec {
    pub fn new(shape: WaveShape, frequency: f64, amplitude: f64) -> Self {
        Self {
            shape,
            frequency,
            amplitude,
        }
    }

    /// Reject parameters the generator is not defined for
    pub fn validate(&self, sampling_rate: u32) -> Result<(), GenerateError> {
        if sampling_rate == 0 {
            return Err(GenerateError::InvalidSamplingRate);
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(GenerateError::InvalidFrequency(self.frequency));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= MAX_AMPLITUDE) {
            return Err(GenerateError::InvalidAmplitude(self.amplitude));
        }
        Ok(())
    }
}

// Older or hand-edited sessions may carry a shape name we do not know.
fn lenient_shape<'de, D>(deserializer: D) -> Result<WaveShape, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(match name {
        Some(name) => name.parse().unwrap_or_else(|_| {
            warn!("unknown sigType '{name}', falling back to {}", WaveShape::default());
            WaveShape::default()
        }),
        None => WaveShape::default(),
    })
}

/// Generate one second of the requested waveform using the thread RNG
pub fn generate(spec: &WaveformSpec, sampling_rate: u32) -> Signal {
    generate_with_rng(spec, sampling_rate, &mut rand::thread_rng())
}

/// Generate one second of the requested waveform, drawing noise from `rng`
pub fn generate_with_rng<R: Rng + ?Sized>(
    spec: &WaveformSpec,
    sampling_rate: u32,
    rng: &mut R,
) -> Signal {
    let fs = sampling_rate as f64;
    let amp = spec.amplitude;
    let f = spec.frequency;

    let samples = (0..sampling_rate as usize)
        .map(|n| {
            let t = n as f64 / fs;
            match spec.shape {
                WaveShape::Sine => amp * (2.0 * PI * f * t).sin(),
                WaveShape::Square => {
                    if fract(f * t) < 0.5 {
                        amp
                    } else {
                        -amp
                    }
                }
                WaveShape::Sawtooth => amp * (2.0 * fract(f * t + 0.5) - 1.0),
                WaveShape::Noise => amp * standard_normal(rng),
            }
        })
        .collect();

    Signal::new(samples, sampling_rate)
}

#[inline]
fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Box-Muller draw from N(0, 1)
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen() is in [0, 1); flip it so ln never sees 0
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
