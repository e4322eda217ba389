//! Trait definitions for the converter module.

use super::command::CommandSpec;
use super::error::ConverterError;

/// An external transcoding engine.
///
/// `run` blocks until the engine has finished. On success the engine has
/// written the output file named by the command.
pub trait Engine: Send + Sync {
    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Runs one command to completion.
    fn run(&self, command: &CommandSpec) -> Result<(), ConverterError>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, command: &CommandSpec) -> Result<(), ConverterError> {
        (**self).run(command)
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, command: &CommandSpec) -> Result<(), ConverterError> {
        (**self).run(command)
    }
}
