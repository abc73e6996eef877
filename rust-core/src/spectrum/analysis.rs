//! One-sided magnitude spectrum of the stored signal
//!
//! Combines windowing with the FFT engine. Analysis never touches the store.

use super::fft::FftEngine;
use super::windowing::apply_window;
use crate::filters::windows::WindowType;
use crate::store::Signal;

/// Added to |X[k]| before taking the log so empty bins stay finite
pub const MAGNITUDE_FLOOR: f64 = 1e-12;

/// Frequency axis and matching magnitudes, ready for plotting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    /// Bin frequencies in Hz, k * fs / N
    pub frequencies: Vec<f64>,

    /// 20*log10(|X[k]| + 1e-12)
    pub magnitudes_db: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes_db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes_db.is_empty()
    }

    /// Loudest bin as (index, frequency Hz, magnitude dB)
    pub fn peak(&self) -> Option<(usize, f64, f64)> {
        self.magnitudes_db
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(bin, &db)| (bin, self.frequencies[bin], db))
    }
}

/// Spectrum analyzer that keeps its FFT plan between calls
///
/// A new plan is made only when the signal length changes.
#[derive(Default)]
pub struct SpectrumAnalyzer {
    fft_engine: Option<FftEngine>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window the signal and compute its magnitude spectrum in dB
    ///
    /// # Returns
    /// floor(N/2)+1 bins, or an empty spectrum for an empty signal
    pub fn analyze(&mut self, signal: &Signal, window_type: WindowType) -> Spectrum {
        let n = signal.len();
        if n == 0 {
            return Spectrum::default();
        }

        let engine = match self.fft_engine.take() {
            Some(engine) if engine.fft_size() == n => engine,
            _ => FftEngine::new(n),
        };
        let engine = self.fft_engine.insert(engine);

        let windowed = apply_window(&signal.samples, window_type);
        let magnitudes_db = engine
            .compute_magnitude(&windowed)
            .into_iter()
            .map(|mag| 20.0 * (mag + MAGNITUDE_FLOOR).log10())
            .collect();

        Spectrum {
            frequencies: engine.frequency_axis_hz(signal.sampling_rate as f64),
            magnitudes_db,
        }
    }
}

/// One-shot analysis without plan reuse
pub fn analyze(signal: &Signal, window_type: WindowType) -> Spectrum {
    SpectrumAnalyzer::new().analyze(signal, window_type)
}
