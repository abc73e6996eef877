//! Python bindings for the signal store and the operations that replace it

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};
use super::spectrum_bindings::PyWindowType;
use crate::config::StudioConfig;
use crate::console;
use crate::error::FilterError;
use crate::filters::FilterSpec;
use crate::generator::{self, WaveShape, WaveformSpec};
use crate::session::{self, SessionParams};
use crate::spectrum::SpectrumAnalyzer;
use crate::store::{Signal, SignalStore};

/// Waveform shape enum exposed to Python
#[pyclass(name = "WaveShape")]
#[derive(Clone, Copy)]
pub enum PyWaveShape {
    Sine,
    Square,
    Sawtooth,
    Noise,
}

impl From<PyWaveShape> for WaveShape {
    fn from(py_shape: PyWaveShape) -> Self {
        match py_shape {
            PyWaveShape::Sine => WaveShape::Sine,
            PyWaveShape::Square => WaveShape::Square,
            PyWaveShape::Sawtooth => WaveShape::Sawtooth,
            PyWaveShape::Noise => WaveShape::Noise,
        }
    }
}

impl From<WaveShape> for PyWaveShape {
    fn from(shape: WaveShape) -> Self {
        match shape {
            WaveShape::Sine => PyWaveShape::Sine,
            WaveShape::Square => PyWaveShape::Square,
            WaveShape::Sawtooth => PyWaveShape::Sawtooth,
            WaveShape::Noise => PyWaveShape::Noise,
        }
    }
}

/// The studio's single live signal
#[pyclass(name = "SignalStore")]
pub struct PySignalStore {
    store: SignalStore,
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySignalStore {
    /// Create a store holding 1024 zero samples at 1024 Hz
    #[new]
    fn new() -> Self {
        Self {
            store: SignalStore::new(),
            analyzer: SpectrumAnalyzer::new(),
        }
    }

    /// Create a store whose starting signal comes from a JSON configuration file
    #[staticmethod]
    fn from_config(path: &str) -> PyResult<Self> {
        let config = StudioConfig::from_path(path)?;
        Ok(Self {
            store: SignalStore::with_config(&config),
            analyzer: SpectrumAnalyzer::new(),
        })
    }

    #[getter]
    fn sampling_rate(&self) -> u32 {
        self.store.sampling_rate()
    }

    fn __len__(&self) -> usize {
        self.store.len()
    }

    /// Current samples as numpy array
    fn samples<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.store.samples())
    }

    /// Sample times in seconds, for the time-domain plot
    fn time_axis<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.store.current().time_axis())
    }

    /// Replace the signal with caller-provided samples
    fn set_samples(&mut self, samples: PyReadonlyArray1<f64>, sampling_rate: u32) -> PyResult<()> {
        if sampling_rate == 0 {
            return Err(PyValueError::new_err("sampling rate must be greater than zero"));
        }
        let samples = samples.as_slice()?.to_vec();
        self.store.replace(Signal::new(samples, sampling_rate));
        Ok(())
    }

    /// Generate one second of a test waveform at the current sampling rate
    #[pyo3(signature = (shape=PyWaveShape::Sine, frequency=50.0, amplitude=1.0))]
    fn generate(&mut self, shape: PyWaveShape, frequency: f64, amplitude: f64) -> PyResult<()> {
        let spec = WaveformSpec::new(shape.into(), frequency, amplitude);
        let fs = self.store.sampling_rate();
        spec.validate(fs)?;

        self.store.replace(generator::generate(&spec, fs));
        Ok(())
    }

    /// Design a windowed-sinc low-pass and filter the signal
    #[pyo3(signature = (order=51, cutoff_hz=100.0))]
    fn apply_fir(&mut self, order: usize, cutoff_hz: f64) -> PyResult<()> {
        FilterSpec::fir(order, cutoff_hz).apply(&mut self.store)?;
        Ok(())
    }

    /// Design a Butterworth low-pass and filter the signal
    #[pyo3(signature = (order=4, cutoff_hz=100.0))]
    fn apply_iir(&mut self, order: usize, cutoff_hz: f64) -> PyResult<()> {
        FilterSpec::iir(order, cutoff_hz).apply(&mut self.store)?;
        Ok(())
    }

    /// Magnitude response in dB of a low-pass at the current sampling rate,
    /// without touching the signal
    ///
    /// Args:
    ///     kind: "fir" or "iir"
    ///     order: Tap count (FIR) or Butterworth order (IIR)
    ///     cutoff_hz: Cutoff in Hz
    ///     frequencies: Frequencies in Hz to evaluate
    fn filter_response<'py>(
        &self,
        py: Python<'py>,
        kind: &str,
        order: usize,
        cutoff_hz: f64,
        frequencies: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let spec = match kind.to_ascii_lowercase().as_str() {
            "fir" => FilterSpec::fir(order, cutoff_hz),
            "iir" => FilterSpec::iir(order, cutoff_hz),
            other => {
                return Err(PyValueError::new_err(format!(
                    "unknown filter kind '{other}', expected 'fir' or 'iir'"
                )))
            }
        };

        let response = spec
            .response_db(frequencies.as_slice()?, self.store.sampling_rate())
            .map_err(FilterError::from)?;
        Ok(PyArray1::from_vec(py, response))
    }

    /// Run a console script, returns the number of transforms applied
    fn run_script(&mut self, script: &str) -> PyResult<usize> {
        Ok(console::run_script(&mut self.store, script)?)
    }

    /// Magnitude spectrum of the current signal
    ///
    /// Returns:
    ///     (frequencies_hz, magnitudes_db) as numpy arrays
    #[pyo3(signature = (window=PyWindowType::Rectangular))]
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        window: PyWindowType,
    ) -> (&'py PyArray1<f64>, &'py PyArray1<f64>) {
        let spectrum = self.analyzer.analyze(self.store.current(), window.into());
        (
            PyArray1::from_vec(py, spectrum.frequencies),
            PyArray1::from_vec(py, spectrum.magnitudes_db),
        )
    }

    /// Write the session to a JSON file
    #[pyo3(signature = (path, script="", shape=PyWaveShape::Sine, frequency=50.0, amplitude=1.0))]
    fn save(
        &self,
        path: &str,
        script: &str,
        shape: PyWaveShape,
        frequency: f64,
        amplitude: f64,
    ) -> PyResult<()> {
        let params = SessionParams::new(script, WaveformSpec::new(shape.into(), frequency, amplitude));
        session::save_to_path(&self.store, &params, path)?;
        Ok(())
    }

    /// Load a session file into the store
    ///
    /// Returns:
    ///     (script, shape, frequency, amplitude)
    fn load(&mut self, path: &str) -> PyResult<(String, PyWaveShape, f64, f64)> {
        let params = session::load_into(&mut self.store, path)?;
        let generator = params.generator;

        Ok((
            params.script,
            generator.shape.into(),
            generator.frequency,
            generator.amplitude,
        ))
    }
}
