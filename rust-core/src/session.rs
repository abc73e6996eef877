//! Session persistence as JSON
//!
//! ```json
//! {
//!   "fs": 1024,
//!   "signal": [0.0, 0.1, ...],
//!   "console": "scale 0.5",
//!   "params": {"sigType": "Sine", "freq": 50.0, "amp": 1.0}
//! }
//! ```
//!
//! Decoding is lenient: every key except `signal` may be missing and falls
//! back to its default, and unknown keys are ignored.

use crate::config::DEFAULT_SAMPLING_RATE;
use crate::error::SessionError;
use crate::generator::WaveformSpec;
use crate::store::{Signal, SignalStore};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// On-disk shape of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
    #[serde(default = "default_fs")]
    pub fs: u32,

    pub signal: Vec<f64>,

    #[serde(default)]
    pub console: String,

    #[serde(default)]
    pub params: WaveformSpec,
}

fn default_fs() -> u32 {
    DEFAULT_SAMPLING_RATE
}

/// Everything a session carries besides the signal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionParams {
    /// Console script text, stored verbatim
    pub script: String,

    /// Last-used generator parameters
    pub generator: WaveformSpec,
}

impl SessionParams {
    pub fn new(script: impl Into<String>, generator: WaveformSpec) -> Self {
        Self {
            script: script.into(),
            generator,
        }
    }
}

/// Snapshot the store and parameters into a document
pub fn save(store: &SignalStore, params: &SessionParams) -> Result<SessionDocument, SessionError> {
    let signal = store.current();
    if signal.sampling_rate == 0 {
        return Err(SessionError::InvalidSamplingRate);
    }
    if let Some(index) = signal.samples.iter().position(|x| !x.is_finite()) {
        return Err(SessionError::NonFiniteSample { index });
    }

    Ok(SessionDocument {
        fs: signal.sampling_rate,
        signal: signal.samples.clone(),
        console: params.script.clone(),
        params: params.generator.clone(),
    })
}

/// Turn a decoded document back into a signal and parameters
pub fn load(document: SessionDocument) -> Result<(Signal, SessionParams), SessionError> {
    if document.fs == 0 {
        return Err(SessionError::InvalidSamplingRate);
    }

    Ok((
        Signal::new(document.signal, document.fs),
        SessionParams::new(document.console, document.params),
    ))
}

/// Pretty-printed JSON with two-space indentation
pub fn to_json(store: &SignalStore, params: &SessionParams) -> Result<String, SessionError> {
    let document = save(store, params)?;
    serde_json::to_string_pretty(&document).map_err(SessionError::Encode)
}

pub fn from_json(text: &str) -> Result<(Signal, SessionParams), SessionError> {
    let document: SessionDocument = serde_json::from_str(text).map_err(SessionError::Decode)?;
    load(document)
}

/// Write a session file, replacing any existing file at `path`
///
/// The document is written to a sibling `.tmp` file first and renamed over
/// `path`, so a failed write leaves the previous session intact.
pub fn save_to_path(
    store: &SignalStore,
    params: &SessionParams,
    path: impl AsRef<Path>,
) -> Result<(), SessionError> {
    let path = path.as_ref();
    let document = save(store, params)?;
    let staging = staging_path(path);

    if let Err(err) = write_document(&document, &staging) {
        let _ = std::fs::remove_file(&staging);
        return Err(err);
    }
    if let Err(source) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(SessionError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(
        "saved session to {}: {} samples at {} Hz",
        path.display(),
        document.signal.len(),
        document.fs
    );
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

fn write_document(document: &SessionDocument, path: &Path) -> Result<(), SessionError> {
    let io_err = |source: std::io::Error| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, document).map_err(|err| {
        if err.is_io() {
            io_err(err.into())
        } else {
            SessionError::Encode(err)
        }
    })?;
    writer.flush().map_err(io_err)?;
    Ok(())
}

/// Read and decode a session file without touching any store
pub fn load_from_path(path: impl AsRef<Path>) -> Result<(Signal, SessionParams), SessionError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document: SessionDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(SessionError::Decode)?;
    let (signal, params) = load(document)?;

    info!(
        "loaded session from {}: {} samples at {} Hz",
        path.display(),
        signal.len(),
        signal.sampling_rate
    );
    Ok((signal, params))
}

/// Load a session file into `store`
///
/// The store is only replaced once the whole document has decoded.
pub fn load_into(
    store: &mut SignalStore,
    path: impl AsRef<Path>,
) -> Result<SessionParams, SessionError> {
    let (signal, params) = load_from_path(path)?;
    store.replace(signal);
    Ok(params)
}
