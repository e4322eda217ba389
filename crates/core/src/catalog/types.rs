//! Types for the format catalog.

use serde::Serialize;

/// Inclusive volume adjustment range, in decibels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumeRange {
    /// Lowest accepted gain in dB.
    pub min_db: f64,
    /// Highest accepted gain in dB.
    pub max_db: f64,
}

impl VolumeRange {
    /// Creates a range from its inclusive bounds.
    pub const fn new(min_db: f64, max_db: f64) -> Self {
        Self { min_db, max_db }
    }

    /// Whether `db` lies within the range, bounds included.
    pub fn contains(&self, db: f64) -> bool {
        db.is_finite() && db >= self.min_db && db <= self.max_db
    }

    /// The neutral gain used when no valid volume was requested.
    pub fn neutral(&self) -> f64 {
        0.0_f64.clamp(self.min_db, self.max_db)
    }
}

/// One supported target audio format and everything it accepts.
///
/// Every list is non-empty and its first element is the value used when the
/// caller omits the option or supplies something outside the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatSpec {
    /// Format name, also used as the output file extension (e.g. "mp3").
    pub name: &'static str,
    /// Encoder names accepted for this format.
    pub codecs: &'static [&'static str],
    /// Bitrates accepted for this format, rendered as `"<kbps>k"`.
    pub bitrates: &'static [&'static str],
    /// Sample rates in Hz.
    pub sample_rates: &'static [u32],
    /// Channel counts (1 = mono, 2 = stereo).
    pub channels: &'static [u8],
    /// Accepted volume adjustment.
    pub volume: VolumeRange,
}

impl FormatSpec {
    pub fn default_codec(&self) -> &'static str {
        self.codecs[0]
    }

    pub fn default_bitrate(&self) -> &'static str {
        self.bitrates[0]
    }

    pub fn default_sample_rate(&self) -> u32 {
        self.sample_rates[0]
    }

    pub fn default_channels(&self) -> u8 {
        self.channels[0]
    }

    pub fn default_volume_db(&self) -> f64 {
        self.volume.neutral()
    }

    /// File extension for outputs of this format.
    pub fn extension(&self) -> &'static str {
        self.name
    }
}
