//! DSP Studio - signal core for an interactive DSP workbench
//!
//! Waveform generation, windowed spectrum analysis, FIR/IIR low-pass
//! filtering, console transforms and JSON sessions around a single owned
//! signal store. The Python GUI talks to it through the optional bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod config;
pub mod console;
pub mod error;
pub mod filters;
pub mod generator;
pub mod session;
pub mod spectrum;
pub mod store;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use config::StudioConfig;
pub use error::{ApplyError, DesignError, FilterError, ScriptError, SessionError};
pub use filters::{FilterSpec, WindowType};
pub use generator::{generate, WaveShape, WaveformSpec};
pub use session::SessionParams;
pub use spectrum::{analyze, Spectrum, SpectrumAnalyzer};
pub use store::{Signal, SignalStore};
