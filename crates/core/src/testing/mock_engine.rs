//! Mock engine for testing.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::converter::{CommandSpec, ConverterError, Engine};

/// Mock implementation of the Engine trait.
///
/// Provides controllable behavior for testing:
/// - Records every command it is asked to run
/// - Writes the output file named by the command, like a successful ffmpeg run
/// - Fails the next run with a preset error
#[derive(Debug)]
pub struct MockEngine {
    /// Recorded commands.
    runs: Mutex<Vec<CommandSpec>>,
    /// If set, the next run fails with this error.
    next_error: Mutex<Option<ConverterError>>,
    /// Whether successful runs create the output file.
    write_output: AtomicBool,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Create a new mock engine.
    pub fn new() -> Self {
        Self {
            runs: Mutex::new(Vec::new()),
            next_error: Mutex::new(None),
            write_output: AtomicBool::new(true),
        }
    }

    /// A mock that reports success without writing any output.
    pub fn without_output() -> Self {
        let engine = Self::new();
        engine.write_output.store(false, Ordering::SeqCst);
        engine
    }

    /// Make the next run fail with `error`.
    pub fn fail_next(&self, error: ConverterError) {
        *self.next_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    /// Get all recorded commands.
    pub fn recorded_runs(&self) -> Vec<CommandSpec> {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Get the number of runs performed.
    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Clear recorded commands.
    pub fn clear_recorded(&self) {
        self.runs.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Engine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn run(&self, command: &CommandSpec) -> Result<(), ConverterError> {
        self.runs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.clone());

        let next_error = self
            .next_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(error) = next_error {
            return Err(error);
        }

        if self.write_output.load(Ordering::SeqCst) {
            if let Some(output) = command.args().last() {
                std::fs::write(Path::new(output), b"mock output")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_records_and_writes_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.mp3");
        let engine = MockEngine::new();
        let command = CommandSpec::new(
            "ffmpeg",
            vec!["-i".to_string(), "in.wav".to_string(), output.display().to_string()],
        );

        engine.run(&command).unwrap();

        assert!(output.is_file());
        assert_eq!(engine.recorded_runs(), vec![command]);
        engine.clear_recorded();
        assert_eq!(engine.run_count(), 0);
    }

    #[test]
    fn test_fail_next_only_once() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.wav");
        let engine = MockEngine::new();
        let command = CommandSpec::new("ffmpeg", vec![output.display().to_string()]);

        engine.fail_next(ConverterError::conversion_failed("boom", None));
        assert!(engine.run(&command).is_err());
        assert!(!output.exists());
        assert!(engine.run(&command).is_ok());
        assert_eq!(engine.run_count(), 2);
    }

    #[test]
    fn test_without_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.flac");
        let engine = MockEngine::without_output();
        engine
            .run(&CommandSpec::new("ffmpeg", vec![output.display().to_string()]))
            .unwrap();
        assert!(!output.exists());
    }
}
