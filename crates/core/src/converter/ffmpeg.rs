//! FFmpeg-based engine implementation.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, warn};

use super::command::CommandSpec;
use super::config::EngineConfig;
use super::error::ConverterError;
use super::traits::Engine;

/// Runs conversions with the ffmpeg command-line tool.
pub struct FfmpegEngine {
    config: EngineConfig,
}

impl FfmpegEngine {
    /// Creates a new FFmpeg engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Checks that the configured ffmpeg binary can be executed.
    pub fn validate(&self) -> Result<(), ConverterError> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(e, &self.config.ffmpeg_path))?;

        if !output.status.success() {
            return Err(ConverterError::conversion_failed(
                format!("ffmpeg -version exited with code: {:?}", output.status.code()),
                stderr_text(&output.stderr),
            ));
        }

        Ok(())
    }
}

fn spawn_error(e: std::io::Error, program: &Path) -> ConverterError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ConverterError::EngineNotFound {
            path: program.to_path_buf(),
        }
    } else {
        ConverterError::Io(e)
    }
}

fn stderr_text(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

impl Engine for FfmpegEngine {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn run(&self, command: &CommandSpec) -> Result<(), ConverterError> {
        let start = Instant::now();
        debug!(command = %command, "Running ffmpeg");

        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(e, Path::new(command.program())))?;

        if !output.status.success() {
            let stderr = stderr_text(&output.stderr);
            warn!(
                code = ?output.status.code(),
                stderr = stderr.as_deref().unwrap_or(""),
                "ffmpeg failed"
            );
            return Err(ConverterError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                stderr,
            ));
        }

        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "ffmpeg finished");
        Ok(())
    }
}
