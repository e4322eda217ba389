pub mod catalog;
pub mod config;
pub mod converter;
pub mod testing;

pub use catalog::{FormatSpec, VolumeRange};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
};
pub use converter::{
    AudioConverter, CommandSpec, ConversionRequest, ConverterError, Engine, EngineConfig,
    FfmpegEngine, PreparedConversion, RawOptions, ResolvedOptions,
};
