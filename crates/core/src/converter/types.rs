//! Types for the converter module.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Loosely-typed user options, keyed by option name.
pub type RawOptions = BTreeMap<String, Value>;

/// A single conversion request as supplied by the caller.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// File to convert.
    pub input_path: PathBuf,
    /// Existing directory that receives the converted file.
    pub output_dir: PathBuf,
    /// Target format name (e.g. "mp3"); case and surrounding whitespace are ignored.
    pub target_format: String,
    /// Unvalidated options.
    pub raw_options: RawOptions,
}

impl ConversionRequest {
    /// Creates a request with no options.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        target_format: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            target_format: target_format.into(),
            raw_options: RawOptions::new(),
        }
    }

    /// Adds or replaces a raw option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.raw_options.insert(key.into(), value.into());
        self
    }

    /// Replaces all raw options.
    pub fn with_options(mut self, raw_options: RawOptions) -> Self {
        self.raw_options = raw_options;
        self
    }
}

/// Volume adjustment in decibels.
///
/// Renders as a signed decibel string: `+6dB`, `-3.5dB`, `0dB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Volume(f64);

impl Volume {
    pub fn from_db(db: f64) -> Self {
        Self(db)
    }

    pub fn db(&self) -> f64 {
        self.0
    }

    /// Value for ffmpeg's `volume` audio filter.
    pub fn to_filter(&self) -> String {
        format!("volume={}", self)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0dB")
        } else {
            write!(f, "{:+}dB", self.0)
        }
    }
}

/// Options after validation against a format.
///
/// Every value is a member of the corresponding catalog list (or inside the
/// volume range), or that format's default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOptions {
    pub codec: String,
    /// Bitrate as `"<kbps>k"`.
    pub bit_rate: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    pub channels: u8,
    pub volume: Volume,
}
