use super::{types::Config, ConfigError};
use crate::converter::FFMPEG_LOG_LEVELS;

/// Validate configuration
/// Currently validates:
/// - ffmpeg path is not empty
/// - log level is one ffmpeg understands
/// - extra args do not add another input
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let engine = &config.engine;

    if engine.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if !FFMPEG_LOG_LEVELS.contains(&engine.log_level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "engine.log_level must be one of {}, got {:?}",
            FFMPEG_LOG_LEVELS.join(", "),
            engine.log_level
        )));
    }

    if engine.extra_args.iter().any(|arg| arg == "-i") {
        return Err(ConfigError::ValidationError(
            "engine.extra_args cannot contain -i".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::EngineConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_ffmpeg_path_fails() {
        let config = Config {
            engine: EngineConfig::with_ffmpeg_path(""),
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_unknown_log_level_fails() {
        let config = Config {
            engine: EngineConfig::default().with_log_level("chatty"),
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_validate_extra_input_fails() {
        let config = Config {
            engine: EngineConfig::default()
                .with_extra_args(vec!["-i".to_string(), "other.wav".to_string()]),
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
