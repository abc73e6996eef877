//! End-to-end studio workflows: generate, analyze, filter, save and reload

use dsp_studio::session::{self, SessionParams};
use dsp_studio::{
    analyze, generate, FilterError, FilterSpec, DesignError, Signal, SignalStore, SessionError,
    WaveShape, WaveformSpec, WindowType,
};
use std::path::PathBuf;

fn temp_session_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dsp-studio-{}-{}.json", name, std::process::id()))
}

fn sine_store(frequency: f64) -> SignalStore {
    let mut store = SignalStore::new();
    let spec = WaveformSpec::new(WaveShape::Sine, frequency, 1.0);
    store.replace(generate(&spec, store.sampling_rate()));
    store
}

#[test]
fn generated_sine_peaks_at_its_bin() {
    let store = sine_store(50.0);
    assert_eq!(store.len(), 1024);

    let spectrum = analyze(store.current(), WindowType::Hanning);
    let (bin, freq, _) = spectrum.peak().unwrap();

    assert_eq!(bin, 50);
    assert_eq!(freq, 50.0);
}

#[test]
fn rectangular_peak_matches_rounded_bin() {
    let spec = WaveformSpec::new(WaveShape::Sine, 333.3, 1.0);
    let signal = generate(&spec, 2000);

    // round(f * N / fs) with N == fs
    let spectrum = analyze(&signal, WindowType::Rectangular);
    let expected = 333.3_f64.round() as usize;

    assert_eq!(spectrum.peak().unwrap().0, expected);
}

#[test]
fn fir_then_iir_preserve_length() {
    let mut store = sine_store(50.0);

    FilterSpec::fir(51, 100.0).apply(&mut store).unwrap();
    assert_eq!(store.len(), 1024);

    FilterSpec::iir(4, 100.0).apply(&mut store).unwrap();
    assert_eq!(store.len(), 1024);
    assert_eq!(store.sampling_rate(), 1024);
}

#[test]
fn lowpass_keeps_passband_and_removes_stopband() {
    let fs = 1024;
    let mix: Vec<f64> = (0..fs as usize)
        .map(|n| {
            let t = n as f64 / fs as f64;
            (2.0 * std::f64::consts::PI * 20.0 * t).sin()
                + (2.0 * std::f64::consts::PI * 400.0 * t).sin()
        })
        .collect();

    for spec in [FilterSpec::fir(101, 100.0), FilterSpec::iir(6, 100.0)] {
        let mut store = SignalStore::new();
        store.replace(Signal::new(mix.clone(), fs));
        spec.apply(&mut store).unwrap();

        let spectrum = analyze(store.current(), WindowType::Hanning);
        let tone = spectrum.magnitudes_db[20];
        let hiss = spectrum.magnitudes_db[400];

        assert!(tone - hiss > 40.0, "{spec:?}: {tone} dB vs {hiss} dB");
    }
}

#[test]
fn design_errors_follow_bounds() {
    let mut store = sine_store(50.0);
    let before = store.clone();

    let cases = [
        FilterSpec::fir(2, 100.0),
        FilterSpec::fir(201, 100.0),
        FilterSpec::fir(51, 512.0),
        FilterSpec::iir(0, 100.0),
        FilterSpec::iir(11, 100.0),
        FilterSpec::iir(4, 700.0),
    ];

    for spec in cases {
        let err = spec.apply(&mut store).unwrap_err();
        assert!(matches!(err, FilterError::Design(_)), "{spec:?}");
    }
    assert_eq!(store, before);

    assert!(matches!(
        FilterSpec::fir(51, 4000.0).design(8000),
        Err(DesignError::CutoffOutOfRange { .. })
    ));
    assert!(FilterSpec::fir(51, 3999.0).design(8000).is_ok());
}

#[test]
fn session_round_trip_through_file() {
    let mut store = SignalStore::new();
    store.replace(Signal::zeros(8000, 8000));
    let params = SessionParams::new("", WaveformSpec::new(WaveShape::Noise, 120.0, 2.0));

    let path = temp_session_path("round-trip");
    session::save_to_path(&store, &params, &path).unwrap();

    let mut reloaded = SignalStore::new();
    let loaded = session::load_into(&mut reloaded, &path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(reloaded.sampling_rate(), 8000);
    assert_eq!(reloaded.len(), 8000);
    assert!(reloaded.samples().iter().all(|&x| x == 0.0));
    assert_eq!(loaded, params);
}

#[test]
fn session_round_trip_of_generated_noise() {
    let mut store = SignalStore::new();
    let spec = WaveformSpec::new(WaveShape::Noise, 10.0, 0.3);
    store.replace(generate(&spec, 4096));
    let params = SessionParams::new("scale 0.5\nclip -1 1", spec);

    let path = temp_session_path("noise");
    session::save_to_path(&store, &params, &path).unwrap();
    let (signal, loaded) = session::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(signal.sampling_rate, 4096);
    assert_eq!(signal.len(), store.len());
    for (a, b) in signal.samples.iter().zip(store.samples()) {
        assert!((a - b).abs() < 1e-9);
    }
    assert_eq!(loaded, params);
}

#[test]
fn corrupt_session_leaves_store_untouched() {
    let path = temp_session_path("corrupt");
    std::fs::write(&path, r#"{"fs": 8000, "console": "hello"}"#).unwrap();

    let mut store = sine_store(50.0);
    let before = store.clone();
    let result = session::load_into(&mut store, &path);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(SessionError::Decode(_))));
    assert_eq!(store, before);
}

#[test]
fn session_without_params_loads_defaults() {
    let path = temp_session_path("no-params");
    std::fs::write(&path, r#"{"signal": [0.25, 0.5]}"#).unwrap();

    let mut store = SignalStore::new();
    let params = session::load_into(&mut store, &path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(store.samples(), &[0.25, 0.5]);
    assert_eq!(store.sampling_rate(), 1024);
    assert_eq!(params.generator, WaveformSpec::new(WaveShape::Sine, 50.0, 1.0));
    assert_eq!(params.script, "");
}
