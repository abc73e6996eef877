//! PyO3 bindings for the Python studio GUI

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::error::{ConfigError, FilterError, GenerateError, ScriptError, SessionError};

mod spectrum_bindings;
mod store_bindings;

impl From<FilterError> for PyErr {
    fn from(err: FilterError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<GenerateError> for PyErr {
    fn from(err: GenerateError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ScriptError> for PyErr {
    fn from(err: ScriptError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<SessionError> for PyErr {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Io { .. } => PyIOError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } => PyIOError::new_err(err.to_string()),
            ConfigError::Parse(_) | ConfigError::InvalidSamplingRate => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

/// Route `log` records to stderr, filtered by RUST_LOG
#[pyfunction]
fn init_logging() {
    // A second call from Python is harmless
    let _ = env_logger::try_init();
}

/// Python module definition
#[pymodule]
fn dsp_studio(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<store_bindings::PySignalStore>()?;
    m.add_class::<store_bindings::PyWaveShape>()?;
    m.add_class::<spectrum_bindings::PyWindowType>()?;

    m.add_function(wrap_pyfunction!(spectrum_bindings::analyze, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    Ok(())
}
