//! Format catalog: the closed set of target formats and what each one accepts.
//!
//! The catalog is built once on first use and never mutated afterwards. Only
//! combinations listed here are ever handed to the transcoding engine.
//!
//! # Example
//!
//! ```
//! use tonecast_core::catalog;
//!
//! let mp3 = catalog::lookup(" MP3 ").expect("mp3 is supported");
//! assert_eq!(mp3.default_codec(), "libmp3lame");
//! assert!(catalog::lookup("ogg").is_none());
//! ```

mod types;

pub use types::{FormatSpec, VolumeRange};

use once_cell::sync::Lazy;

/// Gain bounds shared by every format, in dB.
const VOLUME_DB: VolumeRange = VolumeRange::new(-50.0, 99.0);

/// Stereo first so it is the default layout.
const STEREO_OR_MONO: &[u8] = &[2, 1];

static FORMATS: Lazy<Vec<FormatSpec>> = Lazy::new(|| {
    vec![
        FormatSpec {
            name: "mp3",
            codecs: &["libmp3lame"],
            bitrates: &["128k", "192k", "256k", "320k"],
            sample_rates: &[44100, 48000],
            channels: STEREO_OR_MONO,
            volume: VOLUME_DB,
        },
        FormatSpec {
            name: "aac",
            codecs: &["aac"],
            bitrates: &["128k", "192k", "256k"],
            sample_rates: &[44100, 48000],
            channels: STEREO_OR_MONO,
            volume: VOLUME_DB,
        },
        FormatSpec {
            name: "wav",
            codecs: &["pcm_s16le"],
            bitrates: &["256k", "512k", "1024k"],
            sample_rates: &[44100, 48000, 96000],
            channels: STEREO_OR_MONO,
            volume: VOLUME_DB,
        },
        FormatSpec {
            name: "flac",
            codecs: &["flac"],
            bitrates: &["512k", "1024k", "2048k"],
            sample_rates: &[44100, 48000, 96000],
            channels: STEREO_OR_MONO,
            volume: VOLUME_DB,
        },
        FormatSpec {
            name: "m4a",
            codecs: &["aac"],
            bitrates: &["128k", "192k", "256k"],
            sample_rates: &[44100, 48000],
            channels: STEREO_OR_MONO,
            volume: VOLUME_DB,
        },
        FormatSpec {
            name: "wma",
            codecs: &["wmav2"],
            bitrates: &["128k", "192k", "256k"],
            sample_rates: &[44100, 48000],
            channels: STEREO_OR_MONO,
            volume: VOLUME_DB,
        },
    ]
});

/// Normalizes a user-supplied format name: trimmed, lower-cased, leading dot removed.
pub fn normalize_format_name(format_name: &str) -> String {
    format_name.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Looks up a target format by name.
///
/// Returns `None` for anything outside the closed catalog; callers turn that
/// into [`ConverterError::UnsupportedFormat`](crate::converter::ConverterError).
pub fn lookup(format_name: &str) -> Option<&'static FormatSpec> {
    let name = normalize_format_name(format_name);
    FORMATS.iter().find(|spec| spec.name == name)
}

/// All supported formats, in catalog order.
pub fn formats() -> &'static [FormatSpec] {
    &FORMATS
}

/// Names of all supported formats, in catalog order.
pub fn format_names() -> Vec<&'static str> {
    FORMATS.iter().map(|spec| spec.name).collect()
}
