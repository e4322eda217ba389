use serde::{Deserialize, Serialize};

use crate::converter::EngineConfig;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[engine]
ffmpeg_path = "/usr/local/bin/ffmpeg"
log_level = "warning"
overwrite = false
extra_args = ["-map_metadata", "-1"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.engine.ffmpeg_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.engine.log_level, "warning");
        assert!(!config.engine.overwrite);
        assert_eq!(config.engine.extra_args, vec!["-map_metadata", "-1"]);
    }

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine.ffmpeg_path, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_deserialize_wrong_type_fails() {
        let toml = r#"
[engine]
overwrite = "sometimes"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }
}
