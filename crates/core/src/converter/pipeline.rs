//! Request pipeline: precondition checks, option resolution, command
//! construction and one blocking engine call.

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::{self, FormatSpec};

use super::command::{output_file_path, CommandBuilder, CommandSpec};
use super::config::EngineConfig;
use super::error::ConverterError;
use super::ffmpeg::FfmpegEngine;
use super::options::resolve;
use super::traits::Engine;
use super::types::{ConversionRequest, ResolvedOptions};

/// Everything needed to run one conversion, computed without invoking the engine.
#[derive(Debug, Clone)]
pub struct PreparedConversion {
    pub format: &'static FormatSpec,
    pub options: ResolvedOptions,
    pub output_path: PathBuf,
    pub command: CommandSpec,
}

/// Validates requests and hands the resulting commands to an engine.
///
/// Holds no mutable state; independent conversions may run on separate
/// threads against the same converter.
pub struct AudioConverter<E: Engine> {
    config: EngineConfig,
    engine: E,
}

impl AudioConverter<FfmpegEngine> {
    /// Creates a converter backed by ffmpeg.
    pub fn with_config(config: EngineConfig) -> Self {
        let engine = FfmpegEngine::new(config.clone());
        Self::new(config, engine)
    }

    /// Creates an ffmpeg-backed converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl<E: Engine> AudioConverter<E> {
    pub fn new(config: EngineConfig, engine: E) -> Self {
        Self { config, engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Checks preconditions and builds the command, without running it.
    ///
    /// Fails with `UnsupportedFormat`, `InputNotFound` or
    /// `OutputDirectoryNotFound`, checked in that order. Option values never
    /// cause a failure.
    pub fn prepare(&self, request: &ConversionRequest) -> Result<PreparedConversion, ConverterError> {
        let format = catalog::lookup(&request.target_format)
            .ok_or_else(|| ConverterError::unsupported_format(request.target_format.trim()))?;

        if !request.input_path.is_file() {
            return Err(ConverterError::InputNotFound {
                path: request.input_path.clone(),
            });
        }

        if !request.output_dir.is_dir() {
            return Err(ConverterError::OutputDirectoryNotFound {
                path: request.output_dir.clone(),
            });
        }

        let options = resolve(&request.raw_options, format);
        let output_path = output_file_path(&request.input_path, &request.output_dir, format);
        let command = CommandBuilder::new(&self.config).build(
            format,
            &request.input_path,
            &output_path,
            &options,
        );
        debug!(format = format.name, command = %command, "Prepared conversion");

        Ok(PreparedConversion {
            format,
            options,
            output_path,
            command,
        })
    }

    /// Converts one file, blocking until the engine finishes.
    ///
    /// Returns the path of the written file.
    pub fn convert(&self, request: &ConversionRequest) -> Result<PathBuf, ConverterError> {
        let prepared = self.prepare(request)?;
        let start = Instant::now();

        info!(
            engine = self.engine.name(),
            input = %request.input_path.display(),
            output = %prepared.output_path.display(),
            format = prepared.format.name,
            "Starting conversion"
        );

        if let Err(e) = self
            .engine
            .run(&prepared.command)
            .and_then(|()| verify_output(&prepared.output_path))
        {
            warn!(error = %e, "Conversion failed");
            return Err(e);
        }

        info!(
            output = %prepared.output_path.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Conversion finished"
        );
        Ok(prepared.output_path)
    }

    /// Converts one file and reports the outcome through exactly one callback.
    ///
    /// `on_success` receives `"Conversion successful:\n<output path>"`;
    /// `on_failure` receives `"Error occurred:\n<error>"` for every failure,
    /// precondition errors included. The typed result is returned as well.
    pub fn convert_with_callbacks<S, F>(
        &self,
        request: &ConversionRequest,
        on_success: S,
        on_failure: F,
    ) -> Result<PathBuf, ConverterError>
    where
        S: FnOnce(String),
        F: FnOnce(String),
    {
        let result = self.convert(request);
        match &result {
            Ok(output_path) => on_success(format!(
                "Conversion successful:\n{}",
                output_path.display()
            )),
            Err(e) => on_failure(format!("Error occurred:\n{}", e.report())),
        }
        result
    }
}

/// The engine reporting success is not enough; the file has to be there.
fn verify_output(output_path: &Path) -> Result<(), ConverterError> {
    if output_path.is_file() {
        Ok(())
    } else {
        Err(ConverterError::conversion_failed(
            "Output file not created",
            None,
        ))
    }
}
