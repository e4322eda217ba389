//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing or running a conversion.
///
/// Out-of-range option values are deliberately absent: they are replaced by
/// the format's default instead of failing the request.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Input path does not point at an existing regular file.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Output directory does not exist.
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// Target format is not in the catalog.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// Engine binary not found.
    #[error("FFmpeg not found at path: {path}")]
    EngineNotFound { path: PathBuf },

    /// Engine ran but reported failure.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// I/O error while talking to the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new conversion failed error with stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Whether this error was raised before the engine was invoked.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. }
                | Self::OutputDirectoryNotFound { .. }
                | Self::UnsupportedFormat { .. }
        )
    }

    /// Human-readable message including the engine's diagnostics, if any.
    pub fn report(&self) -> String {
        match self {
            Self::ConversionFailed {
                stderr: Some(stderr),
                ..
            } if !stderr.trim().is_empty() => format!("{}\n{}", self, stderr.trim_end()),
            _ => self.to_string(),
        }
    }
}
