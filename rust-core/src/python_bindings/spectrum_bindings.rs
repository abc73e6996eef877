//! Python bindings for spectrum analysis

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use crate::filters::WindowType;
use crate::spectrum;
use crate::store::Signal;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone, Copy)]
pub enum PyWindowType {
    Rectangular,
    Hamming,
    Hanning,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Rectangular => WindowType::Rectangular,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Hanning => WindowType::Hanning,
        }
    }
}

/// Magnitude spectrum of a sample array
///
/// Args:
///     samples: Signal as numpy array
///     sampling_rate: Sampling rate in Hz
///     window: Window applied before the FFT
///
/// Returns:
///     (frequencies_hz, magnitudes_db) as numpy arrays
#[pyfunction]
#[pyo3(signature = (samples, sampling_rate, window=PyWindowType::Rectangular))]
pub fn analyze<'py>(
    py: Python<'py>,
    samples: PyReadonlyArray1<f64>,
    sampling_rate: u32,
    window: PyWindowType,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let signal = Signal::new(samples.as_slice()?.to_vec(), sampling_rate);
    let spectrum = spectrum::analyze(&signal, window.into());

    Ok((
        PyArray1::from_vec(py, spectrum.frequencies),
        PyArray1::from_vec(py, spectrum.magnitudes_db),
    ))
}
