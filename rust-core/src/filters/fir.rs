//! Causal FIR filter
//!
//! Direct convolution over a ring-buffer delay line. The delay line starts
//! at zero, so the first `length - 1` outputs contain the start-up transient.

/// FIR filter processor with zero-allocation ring buffer
#[derive(Debug, Clone)]
pub struct FirFilter {
    /// Filter coefficients h[n]
    coefficients: Vec<f64>,

    /// Ring buffer state (delay line), holds the last M inputs
    state_buffer: Vec<f64>,

    /// Current write position in ring buffer
    cursor: usize,

    /// Filter length
    length: usize,
}

impl FirFilter {
    /// Create a new FIR filter with given coefficients
    ///
    /// # Arguments
    /// * `coefficients` - Filter coefficients h[n] for n = 0..M-1, M >= 1
    pub fn new(coefficients: Vec<f64>) -> Self {
        let length = coefficients.len().max(1);

        Self {
            coefficients,
            state_buffer: vec![0.0; length],
            cursor: 0,
            length,
        }
    }

    /// Process single sample
    ///
    /// # Returns
    /// y[n] = Σ h[k] * x[n-k]
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        self.state_buffer[self.cursor] = input;

        let mut output = 0.0;
        for (k, &coeff) in self.coefficients.iter().enumerate() {
            // (cursor - k) mod length
            let idx = (self.cursor + self.length - k) % self.length;
            output += coeff * self.state_buffer[idx];
        }

        self.cursor = (self.cursor + 1) % self.length;

        output
    }

    /// Process a block of samples
    ///
    /// # Returns
    /// Filtered output samples (same length as input)
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Get group delay (for linear phase Type I FIR)
    pub fn group_delay_samples(&self) -> f64 {
        (self.length - 1) as f64 / 2.0
    }
}
