//! Option resolution: turns raw user options into values a format accepts.
//!
//! Resolution is lenient. A missing option, or one whose value the format does
//! not accept, resolves to the format's default instead of failing the
//! request, so one bad field never aborts an otherwise valid conversion.
//! Unrecognized keys are ignored.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde_json::Value;
use tracing::debug;

use crate::catalog::FormatSpec;

use super::types::{RawOptions, ResolvedOptions, Volume};

static BITRATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*[kK]?\s*$").expect("valid bitrate regex"));

static VOLUME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*(?:[dD][bB])?\s*$").expect("valid volume regex")
});

/// Options recognized by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    Codec,
    BitRate,
    SampleRate,
    Channels,
    Volume,
}

impl OptionKey {
    pub const ALL: [OptionKey; 5] = [
        Self::Codec,
        Self::BitRate,
        Self::SampleRate,
        Self::Channels,
        Self::Volume,
    ];

    /// Accepted spellings, canonical name first.
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            Self::Codec => &["codec"],
            Self::BitRate => &["bit_rate", "bitrate"],
            Self::SampleRate => &["sample_rate", "sample_rates"],
            Self::Channels => &["channels", "channel"],
            Self::Volume => &["volume"],
        }
    }

    pub fn canonical_name(&self) -> &'static str {
        self.names()[0]
    }

    /// Maps a raw key to the option it names, if any.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = normalize_key(key);
        Self::ALL
            .into_iter()
            .find(|option| option.names().contains(&key.as_str()))
    }

    /// Finds this option's value in `raw`. The canonical spelling wins over aliases,
    /// and an exact spelling wins over one that only matches after normalizing.
    fn find<'a>(&self, raw: &'a RawOptions) -> Option<&'a Value> {
        self.names().iter().find_map(|name| {
            raw.get(*name).or_else(|| {
                raw.iter()
                    .find(|(key, _)| normalize_key(key) == *name)
                    .map(|(_, value)| value)
            })
        })
    }
}

/// Lowercased, trimmed form used to match option keys.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

/// Resolves raw options against a format.
pub fn resolve(raw: &RawOptions, spec: &FormatSpec) -> ResolvedOptions {
    for key in raw.keys().filter(|key| OptionKey::from_key(key).is_none()) {
        debug!(format = spec.name, key = %key, "Ignoring unrecognized option");
    }

    let codec = resolve_option(raw, OptionKey::Codec, spec, spec.default_codec(), |value| {
        let codec = value.as_str()?.trim();
        spec.codecs.iter().copied().find(|allowed| *allowed == codec)
    });

    let bit_rate = resolve_option(raw, OptionKey::BitRate, spec, spec.default_bitrate(), |value| {
        let bitrate = coerce_bitrate(value)?;
        spec.bitrates.iter().copied().find(|allowed| *allowed == bitrate)
    });

    let sample_rate = resolve_option(
        raw,
        OptionKey::SampleRate,
        spec,
        spec.default_sample_rate(),
        |value| {
            let rate = u32::try_from(coerce_integer(value)?).ok()?;
            spec.sample_rates.contains(&rate).then_some(rate)
        },
    );

    let channels = resolve_option(raw, OptionKey::Channels, spec, spec.default_channels(), |value| {
        let channels = coerce_channels(value)?;
        spec.channels.contains(&channels).then_some(channels)
    });

    let volume = resolve_option(raw, OptionKey::Volume, spec, spec.default_volume_db(), |value| {
        let db = coerce_decibels(value)?;
        spec.volume.contains(db).then_some(db)
    });

    ResolvedOptions {
        codec: codec.to_string(),
        bit_rate: bit_rate.to_string(),
        sample_rate,
        channels,
        volume: Volume::from_db(volume),
    }
}

/// Applies the fallback policy for one option: absent or rejected values become `default`.
fn resolve_option<T, F>(
    raw: &RawOptions,
    key: OptionKey,
    spec: &FormatSpec,
    default: T,
    accept: F,
) -> T
where
    T: std::fmt::Debug,
    F: FnOnce(&Value) -> Option<T>,
{
    let Some(value) = key.find(raw) else {
        return default;
    };

    match accept(value) {
        Some(resolved) => resolved,
        None => {
            debug!(
                format = spec.name,
                option = key.canonical_name(),
                value = %value,
                default = ?default,
                "Option value not accepted, using format default"
            );
            default
        }
    }
}

/// Non-negative integer from a JSON number or numeric string.
fn coerce_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Bitrate rendered as `"<kbps>k"`. Accepts `192`, `"192"`, `"192k"` and `"192K"`.
fn coerce_bitrate(value: &Value) -> Option<String> {
    let kbps = match value {
        Value::String(s) => BITRATE_RE.captures(s)?.get(1)?.as_str().parse::<u32>().ok()?,
        other => u32::try_from(coerce_integer(other)?).ok()?,
    };
    Some(format!("{}k", kbps))
}

/// Channel count from a number, numeric string, or `"mono"` / `"stereo"`.
fn coerce_channels(value: &Value) -> Option<u8> {
    if let Some(name) = value.as_str() {
        match name.trim().to_ascii_lowercase().as_str() {
            "mono" => return Some(1),
            "stereo" => return Some(2),
            _ => {}
        }
    }
    u8::try_from(coerce_integer(value)?).ok()
}

/// Gain in dB from a number or a string such as `"-3"`, `"+6 dB"` or `"6dB"`.
fn coerce_decibels(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => VOLUME_RE.captures(s)?.get(1)?.as_str().parse().ok(),
        _ => None,
    }
}
