//! Console scripts: a closed set of buffer transforms
//!
//! One command per line, `#` starts a comment, keywords are case-insensitive:
//!
//! ```text
//! scale 0.5       # multiply every sample
//! offset -0.1     # add a constant
//! clip -1 1       # clamp into [lo, hi]
//! normalize       # peak magnitude becomes 1
//! ```
//!
//! A script is parsed completely before anything runs, and the store is only
//! replaced after every transform has been applied.

use crate::error::ScriptError;
use crate::store::{Signal, SignalStore};
use log::info;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Scale(f64),
    Offset(f64),
    Clip { min: f64, max: f64 },
    Normalize,
}

impl Transform {
    pub fn apply(&self, samples: &mut [f64]) {
        match *self {
            Transform::Scale(k) => samples.iter_mut().for_each(|x| *x *= k),
            Transform::Offset(c) => samples.iter_mut().for_each(|x| *x += c),
            Transform::Clip { min, max } => samples.iter_mut().for_each(|x| *x = x.clamp(min, max)),
            Transform::Normalize => {
                let peak = samples.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
                if peak > 0.0 {
                    samples.iter_mut().for_each(|x| *x /= peak);
                }
            }
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Scale(k) => write!(f, "scale {k}"),
            Transform::Offset(c) => write!(f, "offset {c}"),
            Transform::Clip { min, max } => write!(f, "clip {min} {max}"),
            Transform::Normalize => write!(f, "normalize"),
        }
    }
}

/// Parse a whole script, stopping at the first bad line
pub fn parse_script(text: &str) -> Result<Vec<Transform>, ScriptError> {
    Ok(parse_lines(text)?.into_iter().map(|(_, t)| t).collect())
}

/// Transforms paired with the 1-based line they came from
fn parse_lines(text: &str) -> Result<Vec<(usize, Transform)>, ScriptError> {
    let mut transforms = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let code = raw.split('#').next().unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }

        let mut words = code.split_whitespace();
        let command = words.next().unwrap_or("").to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let transform = match command.as_str() {
            "scale" => Transform::Scale(single_number(line, &command, &args)?),
            "offset" => Transform::Offset(single_number(line, &command, &args)?),
            "clip" => {
                let [lo, hi] = args.as_slice() else {
                    return Err(ScriptError::new(line, "clip takes two arguments: clip <lo> <hi>"));
                };
                let (min, max) = (number(line, lo)?, number(line, hi)?);
                if min > max {
                    return Err(ScriptError::new(
                        line,
                        format!("clip lower bound {min} is above upper bound {max}"),
                    ));
                }
                Transform::Clip { min, max }
            }
            "normalize" => {
                if !args.is_empty() {
                    return Err(ScriptError::new(line, "normalize takes no arguments"));
                }
                Transform::Normalize
            }
            other => {
                return Err(ScriptError::new(line, format!("unknown command '{other}'")));
            }
        };

        transforms.push((line, transform));
    }

    Ok(transforms)
}

fn single_number(line: usize, command: &str, args: &[&str]) -> Result<f64, ScriptError> {
    match args {
        [value] => number(line, value),
        _ => Err(ScriptError::new(
            line,
            format!("{command} takes exactly one number"),
        )),
    }
}

fn number(line: usize, word: &str) -> Result<f64, ScriptError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::new(line, format!("'{word}' is not a finite number")))
}

/// Parse `text` and run it against the store's signal
///
/// Fails without touching the store if any line does not parse or if a
/// transform leaves a non-finite sample behind.
///
/// # Returns
/// Number of transforms applied
pub fn run_script(store: &mut SignalStore, text: &str) -> Result<usize, ScriptError> {
    let transforms = parse_lines(text)?;

    let mut samples = store.samples().to_vec();
    for (line, transform) in &transforms {
        transform.apply(&mut samples);
        if let Some(index) = samples.iter().position(|x| !x.is_finite()) {
            return Err(ScriptError::new(
                *line,
                format!("'{transform}' made sample {index} non-finite"),
            ));
        }
    }
    let sampling_rate = store.sampling_rate();
    store.replace(Signal::new(samples, sampling_rate));

    info!("console ran {} transform(s)", transforms.len());
    Ok(transforms.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(samples: Vec<f64>) -> SignalStore {
        let mut store = SignalStore::new();
        store.replace(Signal::new(samples, 100));
        store
    }

    #[test]
    fn test_parse_all_commands() {
        let script = "\
            # halve then shift\n\
            SCALE 0.5\n\
            \n\
            offset -1   # trailing comment\n\
            clip -0.75 0.75\n\
            normalize\n";

        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                Transform::Scale(0.5),
                Transform::Offset(-1.0),
                Transform::Clip { min: -0.75, max: 0.75 },
                Transform::Normalize,
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("scale 2\nsig = sig * 0.5").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("unknown command"));

        assert_eq!(parse_script("scale").unwrap_err().line, 1);
        assert_eq!(parse_script("scale 1 2").unwrap_err().line, 1);
        assert_eq!(parse_script("offset abc").unwrap_err().line, 1);
        assert_eq!(parse_script("offset inf").unwrap_err().line, 1);
        assert_eq!(parse_script("clip 1").unwrap_err().line, 1);
        assert_eq!(parse_script("\n\nclip 1 -1").unwrap_err().line, 3);
        assert_eq!(parse_script("normalize now").unwrap_err().line, 1);
    }

    #[test]
    fn test_run_script_transforms_in_order() {
        let mut store = store_with(vec![-4.0, 0.0, 2.0]);

        let applied = run_script(&mut store, "scale 0.5\noffset 1\nclip 0 1.5").unwrap();

        assert_eq!(applied, 3);
        assert_eq!(store.samples(), &[0.0, 1.0, 1.5]);
        assert_eq!(store.sampling_rate(), 100);
    }

    #[test]
    fn test_normalize() {
        let mut store = store_with(vec![0.5, -2.0, 1.0]);
        run_script(&mut store, "normalize").unwrap();
        assert_eq!(store.samples(), &[0.25, -1.0, 0.5]);

        let mut silent = store_with(vec![0.0; 4]);
        run_script(&mut silent, "normalize").unwrap();
        assert_eq!(silent.samples(), &[0.0; 4]);
    }

    #[test]
    fn test_failed_script_leaves_store_untouched() {
        let mut store = store_with(vec![1.0, 2.0]);
        let before = store.clone();

        assert!(run_script(&mut store, "scale 10\nimport os").is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_overflow_is_rejected_at_its_line() {
        let mut store = store_with(vec![1.0, 0.0]);
        let before = store.clone();

        let err = run_script(&mut store, "scale 1e200\nscale 1e200\nnormalize").unwrap_err();

        assert_eq!(err.line, 2);
        assert!(err.message.contains("non-finite"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_empty_script_is_a_no_op() {
        let mut store = store_with(vec![1.0, 2.0]);
        assert_eq!(run_script(&mut store, "# nothing\n\n").unwrap(), 0);
        assert_eq!(store.samples(), &[1.0, 2.0]);
    }

    #[test]
    fn test_display_parses_back() {
        let transforms = vec![
            Transform::Scale(2.5),
            Transform::Clip { min: -1.0, max: 1.0 },
            Transform::Normalize,
        ];
        let script: Vec<String> = transforms.iter().map(|t| t.to_string()).collect();
        assert_eq!(parse_script(&script.join("\n")).unwrap(), transforms);
    }
}
