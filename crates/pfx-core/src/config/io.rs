//! Loading and saving configuration as RON.

use std::path::Path;

use thiserror::Error;

use super::PipelineConfig;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl PipelineConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        tracing::info!("Loaded pipeline config from {:?}", path);
        Ok(config)
    }

    /// Loads a configuration file, falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default pipeline config ({:?}: {})", path, e);
                Self::default()
            }
        }
    }

    /// Writes the configuration, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron_string()?)?;
        tracing::info!("Saved pipeline config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EffectId;

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = PipelineConfig::from_ron_str("(bloom_iterations: 3, window_effects: [Tint])")
            .expect("valid config");
        assert_eq!(config.bloom_iterations, 3);
        assert_eq!(config.window_effects, vec![EffectId::Tint]);
        assert_eq!(config.effects, crate::config::EffectParams::default());
    }

    #[test]
    fn test_malformed_document() {
        let result = PipelineConfig::from_ron_str("(bloom_iterations: \"many\")");
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = PipelineConfig::from_ron_str("(area_size: (0.0, 1.0))");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("pfx-config-test-{}", std::process::id()));
        let path = dir.join("pipeline.ron");

        let mut config = PipelineConfig::default();
        config.effects.burn_speed = 0.5;
        config.save(&path).expect("save");

        let loaded = PipelineConfig::load(&path).expect("load");
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = PipelineConfig::load_or_default("/nonexistent/pfx/pipeline.ron");
        assert_eq!(config, PipelineConfig::default());
    }
}
