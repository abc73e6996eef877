//! FFT engine using realfft for real-valued signals

use realfft::{RealFftPlanner, RealToComplex};
use num_complex::Complex64;
use std::sync::Arc;

/// FFT engine for real-valued signals of one fixed length
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer, realfft uses it as scratch
    input_buffer: Vec<f64>,

    /// Reusable output buffer (complex spectrum)
    output_buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, >= 1, any length)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute FFT and return magnitude spectrum
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded if shorter than fft_size, truncated if longer)
    ///
    /// # Returns
    /// Magnitude spectrum |X[k]| for k = 0..=fft_size/2 (non-negative frequencies only)
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Vec<f64> {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        // Buffers come from the planner itself, so lengths always match
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .expect("FFT processing failed");

        self.output_buffer.iter().map(|c| c.norm()).collect()
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Frequency of each bin in Hz: k * sample_rate / fft_size
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        let n = self.fft_size as f64;
        (0..self.num_bins())
            .map(|bin| bin as f64 * sample_rate / n)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);

        // DC signal, zero-padded from 100 samples
        let signal = vec![1.0; 100];
        let spectrum = fft.compute_magnitude(&signal);

        assert!((spectrum[0] - 100.0).abs() < 1e-9);
        assert!(spectrum[10] < 100.0);
    }

    #[test]
    fn test_fft_sine_wave() {
        let mut fft = FftEngine::new(1000);

        // 37 whole cycles over 1000 samples
        let signal: Vec<f64> = (0..1000)
            .map(|n| (2.0 * PI * 37.0 * n as f64 / 1000.0).sin())
            .collect();

        let spectrum = fft.compute_magnitude(&signal);
        assert_eq!(spectrum.len(), 501);

        let (peak_bin, &peak_mag) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();

        assert_eq!(peak_bin, 37);
        // N/2 for a unit sine
        assert!((peak_mag - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_frequency_axis() {
        let fft = FftEngine::new(1024);
        let freqs = fft.frequency_axis_hz(1024.0);

        assert_eq!(freqs.len(), 513);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[50], 50.0);
        assert_eq!(freqs[512], 512.0);

        // Odd length: last bin sits below Nyquist
        let odd = FftEngine::new(5).frequency_axis_hz(10.0);
        assert_eq!(odd, vec![0.0, 2.0, 4.0]);
    }
}
