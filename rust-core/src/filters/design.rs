//! Low-pass filter design using the windowing method and Butterworth prototypes
//!
//! Cutoffs arrive in Hz and are normalized to Nyquist (`fs / 2`) before
//! design, so a normalized cutoff of 1.0 is the Nyquist frequency.

use super::iir::{design_butterworth_lowpass, ButterworthDesign, IirFilter};
use super::windows::{generate_window, WindowType};
use super::fir::FirFilter;
use crate::error::{ApplyError, DesignError, FilterError};
use crate::store::{Signal, SignalStore};
use log::debug;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::ops::RangeInclusive;

/// Allowed FIR tap counts
pub const FIR_ORDER_RANGE: RangeInclusive<usize> = 3..=200;

/// Allowed Butterworth orders
pub const IIR_ORDER_RANGE: RangeInclusive<usize> = 1..=10;

/// Filter specifications, cutoffs in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterSpec {
    /// Linear-phase windowed-sinc low-pass, `order` is the number of taps
    Fir { order: usize, cutoff_hz: f64 },

    /// Butterworth low-pass
    Iir { order: usize, cutoff_hz: f64 },
}

impl FilterSpec {
    pub fn fir(order: usize, cutoff_hz: f64) -> Self {
        FilterSpec::Fir { order, cutoff_hz }
    }

    pub fn iir(order: usize, cutoff_hz: f64) -> Self {
        FilterSpec::Iir { order, cutoff_hz }
    }

    fn kind(&self) -> &'static str {
        match self {
            FilterSpec::Fir { .. } => "FIR",
            FilterSpec::Iir { .. } => "IIR",
        }
    }

    /// Check order and cutoff against the sampling rate
    ///
    /// # Returns
    /// Cutoff normalized to Nyquist
    pub fn normalized_cutoff(&self, sampling_rate: u32) -> Result<f64, DesignError> {
        let (order, cutoff_hz, range) = match *self {
            FilterSpec::Fir { order, cutoff_hz } => (order, cutoff_hz, FIR_ORDER_RANGE),
            FilterSpec::Iir { order, cutoff_hz } => (order, cutoff_hz, IIR_ORDER_RANGE),
        };

        if !range.contains(&order) {
            return Err(DesignError::OrderOutOfRange {
                kind: self.kind(),
                order,
                min: *range.start(),
                max: *range.end(),
            });
        }

        let nyquist_hz = sampling_rate as f64 / 2.0;
        // NaN fails both comparisons and lands here too
        if !(cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
            return Err(DesignError::CutoffOutOfRange {
                cutoff_hz,
                nyquist_hz,
            });
        }

        Ok(cutoff_hz / nyquist_hz)
    }

    /// Design coefficients for a signal sampled at `sampling_rate`
    pub fn design(&self, sampling_rate: u32) -> Result<FilterDesign, DesignError> {
        let cutoff = self.normalized_cutoff(sampling_rate)?;

        let design = match *self {
            FilterSpec::Fir { order, .. } => FilterDesign::Fir(design_lowpass_fir(order, cutoff)),
            FilterSpec::Iir { order, .. } => {
                FilterDesign::Iir(design_butterworth_lowpass(order, cutoff))
            }
        };

        debug!(
            "designed {} low-pass: order {}, normalized cutoff {:.6}",
            self.kind(),
            design.order(),
            cutoff
        );

        Ok(design)
    }

    /// Magnitude response in dB of the filter this spec designs, at
    /// frequencies given in Hz
    pub fn response_db(
        &self,
        frequencies_hz: &[f64],
        sampling_rate: u32,
    ) -> Result<Vec<f64>, DesignError> {
        let design = self.design(sampling_rate)?;
        let nyquist_hz = sampling_rate as f64 / 2.0;
        let normalized: Vec<f64> = frequencies_hz.iter().map(|f| f / nyquist_hz).collect();
        Ok(design.magnitude_response_db(&normalized))
    }

    /// Design against the store's rate, filter the current signal and
    /// replace it with the result
    ///
    /// The store is left untouched on error.
    pub fn apply(&self, store: &mut SignalStore) -> Result<(), FilterError> {
        let design = self.design(store.sampling_rate())?;
        let filtered = design.filter(store.current())?;
        store.replace(filtered);
        Ok(())
    }
}

/// Designed coefficients, ready to filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDesign {
    Fir(Vec<f64>),
    Iir(ButterworthDesign),
}

impl FilterDesign {
    /// Order as the designer understands it (tap count for FIR)
    pub fn order(&self) -> usize {
        match self {
            FilterDesign::Fir(taps) => taps.len(),
            FilterDesign::Iir(design) => design.order(),
        }
    }

    /// Causal filtering with zero initial state
    ///
    /// # Returns
    /// New signal with the same length and rate as `signal`
    pub fn filter(&self, signal: &Signal) -> Result<Signal, ApplyError> {
        if signal.is_empty() {
            return Err(ApplyError::EmptySignal);
        }
        if let Some(index) = signal.samples.iter().position(|x| !x.is_finite()) {
            return Err(ApplyError::NonFiniteSample { index });
        }

        let samples = match self {
            FilterDesign::Fir(taps) => {
                let mut fir = FirFilter::new(taps.clone());
                debug!(
                    "FIR group delay: {} samples",
                    fir.group_delay_samples()
                );
                fir.process_block(&signal.samples)
            }
            FilterDesign::Iir(design) => IirFilter::new(design).process_block(&signal.samples),
        };

        Ok(Signal::new(samples, signal.sampling_rate))
    }

    /// Transfer function polynomials (b, a) in powers of z^-1
    pub fn transfer_function(&self) -> (Vec<f64>, Vec<f64>) {
        match self {
            FilterDesign::Fir(taps) => (taps.clone(), vec![1.0]),
            FilterDesign::Iir(design) => design.transfer_function(),
        }
    }

    /// Magnitude response in dB at normalized frequencies (1.0 = Nyquist)
    pub fn magnitude_response_db(&self, frequencies: &[f64]) -> Vec<f64> {
        let (b, a) = self.transfer_function();
        frequencies
            .iter()
            .map(|&omega| {
                let h = evaluate_polynomial(&b, omega) / evaluate_polynomial(&a, omega);
                20.0 * (h.norm() + 1e-12).log10()
            })
            .collect()
    }
}

/// Design a linear-phase lowpass FIR filter
///
/// Ideal sinc response times a Hamming window, scaled to unity gain at DC.
///
/// # Arguments
/// * `num_taps` - Filter length M
/// * `cutoff` - Cutoff normalized to Nyquist (0 < cutoff < 1)
///
/// # Returns
/// Vector of filter coefficients h[n] for n = 0..M-1
pub fn design_lowpass_fir(num_taps: usize, cutoff: f64) -> Vec<f64> {
    let window = generate_window(WindowType::Hamming, num_taps);
    let wc_rad = cutoff * PI;

    let center = (num_taps as f64 - 1.0) / 2.0;
    let mut h: Vec<f64> = window
        .iter()
        .enumerate()
        .map(|(n, &w)| {
            let n_shifted = n as f64 - center;

            // h_ideal[n] = sin(wc*n)/(π*n), wc/π at the center
            let h_ideal = if n_shifted.abs() < 1e-10 {
                wc_rad / PI
            } else {
                (wc_rad * n_shifted).sin() / (PI * n_shifted)
            };

            h_ideal * w
        })
        .collect();

    let dc_gain: f64 = h.iter().sum();
    for coeff in h.iter_mut() {
        *coeff /= dc_gain;
    }

    h
}

/// Σ c[n] e^{-jωπn}
fn evaluate_polynomial(coeffs: &[f64], omega: f64) -> Complex64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(n, &c)| c * Complex64::from_polar(1.0, -omega * PI * n as f64))
        .sum()
}
