//! Butterworth low-pass design and causal IIR filtering
//!
//! The analog prototype poles sit on the unit circle at
//! `exp(jπ(2k + N + 1) / 2N)`. They are scaled by the pre-warped cutoff
//! `tan(π·Wn/2)` and mapped through the bilinear transform
//! `z = (1 + s) / (1 - s)`. Conjugate pole pairs become second-order
//! sections, an odd order adds one first-order section. All zeros sit at
//! z = -1 and every section is scaled to unity gain at DC.

use num_complex::Complex64;
use std::f64::consts::PI;

/// One first- or second-order stage, a[0] == 1
///
/// First-order stages keep b[2] == a[2] == 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub b: [f64; 3],
    pub a: [f64; 3],
}

impl Section {
    fn from_conjugate_pole(pole: Complex64) -> Self {
        let a1 = -2.0 * pole.re;
        let a2 = pole.norm_sqr();
        let gain = (1.0 + a1 + a2) / 4.0;

        Self {
            b: [gain, 2.0 * gain, gain],
            a: [1.0, a1, a2],
        }
    }

    fn from_real_pole(pole: f64) -> Self {
        let gain = (1.0 - pole) / 2.0;

        Self {
            b: [gain, gain, 0.0],
            a: [1.0, -pole, 0.0],
        }
    }
}

/// Butterworth low-pass coefficients as a cascade of sections
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthDesign {
    order: usize,
    sections: Vec<Section>,
}

impl ButterworthDesign {
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Expand the cascade into transfer function polynomials (b, a)
    ///
    /// Both vectors have `order + 1` coefficients, in powers of z^-1.
    pub fn transfer_function(&self) -> (Vec<f64>, Vec<f64>) {
        let mut b = vec![1.0];
        let mut a = vec![1.0];

        for section in &self.sections {
            b = poly_mul(&b, &section.b);
            a = poly_mul(&a, &section.a);
        }

        // First-order sections pad the products with trailing zeros
        b.truncate(self.order + 1);
        a.truncate(self.order + 1);

        (b, a)
    }
}

/// Design a Butterworth low-pass filter
///
/// # Arguments
/// * `order` - Filter order N >= 1
/// * `cutoff` - -3 dB frequency normalized to Nyquist, 0 < cutoff < 1
pub fn design_butterworth_lowpass(order: usize, cutoff: f64) -> ButterworthDesign {
    let warped = (PI * cutoff / 2.0).tan();
    let n = order as f64;
    let one = Complex64::new(1.0, 0.0);

    let mut sections = Vec::with_capacity(order.div_ceil(2));

    if order % 2 == 1 {
        let s = -warped;
        sections.push(Section::from_real_pole((1.0 + s) / (1.0 - s)));
    }

    // Upper half-plane representative of each conjugate pair
    for k in 0..order / 2 {
        let theta = PI * (2 * k + order + 1) as f64 / (2.0 * n);
        let s = Complex64::from_polar(warped, theta);
        let z = (one + s) / (one - s);
        sections.push(Section::from_conjugate_pole(z));
    }

    ButterworthDesign { order, sections }
}

/// Cascade of transposed direct form II sections
#[derive(Debug, Clone)]
pub struct IirFilter {
    sections: Vec<Section>,

    /// Two delay registers per section
    state: Vec<[f64; 2]>,
}

impl IirFilter {
    pub fn new(design: &ButterworthDesign) -> Self {
        Self {
            sections: design.sections.clone(),
            state: vec![[0.0; 2]; design.sections.len()],
        }
    }

    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let mut x = input;

        for (section, z) in self.sections.iter().zip(self.state.iter_mut()) {
            let [b0, b1, b2] = section.b;
            let [_, a1, a2] = section.a;

            let y = b0 * x + z[0];
            z[0] = b1 * x - a1 * y + z[1];
            z[1] = b2 * x - a2 * y;

            x = y;
        }

        x
    }

    /// Filter a block, output has the same length as the input
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }
}

fn poly_mul(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            out[i + j] += pi * qj;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "index {}: {} vs {}", i, a, e);
        }
    }

    #[test]
    fn test_second_order_half_band() {
        // scipy.signal.butter(2, 0.5)
        let (b, a) = design_butterworth_lowpass(2, 0.5).transfer_function();

        assert_close(&b, &[0.29289322, 0.58578644, 0.29289322], 1e-8);
        assert_close(&a, &[1.0, 0.0, 0.17157288], 1e-8);
    }

    #[test]
    fn test_first_order_half_band() {
        // scipy.signal.butter(1, 0.5)
        let (b, a) = design_butterworth_lowpass(1, 0.5).transfer_function();

        assert_close(&b, &[0.5, 0.5], 1e-12);
        assert_close(&a, &[1.0, 0.0], 1e-12);
    }

    #[test]
    fn test_third_order_half_band() {
        // scipy.signal.butter(3, 0.5)
        let (b, a) = design_butterworth_lowpass(3, 0.5).transfer_function();

        assert_close(&b, &[1.0 / 6.0, 0.5, 0.5, 1.0 / 6.0], 1e-8);
        assert_close(&a, &[1.0, 0.0, 1.0 / 3.0, 0.0], 1e-8);
    }

    #[test]
    fn test_section_count() {
        for order in 1..=10 {
            let design = design_butterworth_lowpass(order, 0.2);
            assert_eq!(design.order(), order);
            assert_eq!(design.sections().len(), order.div_ceil(2));

            let (b, a) = design.transfer_function();
            assert_eq!(b.len(), order + 1);
            assert_eq!(a.len(), order + 1);
        }
    }

    #[test]
    fn test_unity_dc_gain() {
        let design = design_butterworth_lowpass(4, 100.0 / 512.0);
        let mut filter = IirFilter::new(&design);

        let output = filter.process_block(&vec![1.0; 2000]);
        assert!((output[1999] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stable_poles() {
        for order in 1..=10 {
            for section in design_butterworth_lowpass(order, 0.05).sections() {
                // |z|^2 = a2 for complex pairs, |z| = -a1 for the real pole
                if section.a[2] != 0.0 {
                    assert!(section.a[2] < 1.0);
                } else {
                    assert!(section.a[1].abs() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_impulse_response_matches_transfer_function() {
        let design = design_butterworth_lowpass(3, 0.3);
        let (b, a) = design.transfer_function();

        let mut impulse = vec![0.0; 64];
        impulse[0] = 1.0;

        let cascade = IirFilter::new(&design).process_block(&impulse);

        // Direct difference equation on the expanded polynomials
        let mut direct = vec![0.0; impulse.len()];
        for n in 0..impulse.len() {
            let mut acc = 0.0;
            for (k, &bk) in b.iter().enumerate() {
                if n >= k {
                    acc += bk * impulse[n - k];
                }
            }
            for (k, &ak) in a.iter().enumerate().skip(1) {
                if n >= k {
                    acc -= ak * direct[n - k];
                }
            }
            direct[n] = acc;
        }

        assert_close(&cascade, &direct, 1e-12);
    }
}
