//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use tonecast_core::testing::MockEngine;
//! use tonecast_core::{AudioConverter, EngineConfig};
//!
//! let converter = AudioConverter::new(EngineConfig::default(), MockEngine::new());
//! converter.convert(&request)?;
//!
//! assert_eq!(converter.engine().run_count(), 1);
//! ```

mod mock_engine;

pub use mock_engine::MockEngine;
