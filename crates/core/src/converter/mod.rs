//! Converter module: turns loosely-typed conversion requests into validated
//! ffmpeg invocations and runs them.
//!
//! A request goes through four steps:
//!
//! - the target format is looked up in the [catalog](crate::catalog)
//! - input file and output directory are checked (never created)
//! - raw options are resolved against the format, falling back to the
//!   format's defaults for anything missing or not accepted
//! - the command is built and run once, blocking, by an [`Engine`]
//!
//! # Example
//!
//! ```ignore
//! use tonecast_core::converter::{AudioConverter, ConversionRequest};
//!
//! let converter = AudioConverter::with_defaults();
//!
//! let request = ConversionRequest::new("/music/song.wav", "/tmp/out", "mp3")
//!     .with_option("bit_rate", "192k")
//!     .with_option("channels", "stereo")
//!     .with_option("volume", -3);
//!
//! converter.convert_with_callbacks(
//!     &request,
//!     |msg| println!("{}", msg),
//!     |msg| eprintln!("{}", msg),
//! )?;
//! ```

mod command;
mod config;
mod error;
mod ffmpeg;
mod options;
mod pipeline;
mod traits;
mod types;

pub use command::{output_file_path, pinned_codec, CommandBuilder, CommandSpec};
pub use config::{EngineConfig, FFMPEG_LOG_LEVELS};
pub use error::ConverterError;
pub use ffmpeg::FfmpegEngine;
pub use options::{normalize_key, resolve, OptionKey};
pub use pipeline::{AudioConverter, PreparedConversion};
pub use traits::Engine;
pub use types::{ConversionRequest, RawOptions, ResolvedOptions, Volume};
