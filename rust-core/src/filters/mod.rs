//! FIR and Butterworth low-pass design and causal filtering

pub mod windows;
pub mod design;
pub mod fir;
pub mod iir;

pub use windows::{WindowType, generate_window};
pub use design::{FilterSpec, FilterDesign, design_lowpass_fir, FIR_ORDER_RANGE, IIR_ORDER_RANGE};
pub use fir::FirFilter;
pub use iir::{ButterworthDesign, IirFilter, design_butterworth_lowpass};
