use crate::animation::AnimationConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use towerclimb_common::Color4;

/// Errors from loading a driver configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Driver configuration: animation tuning, starting position and clear colour.
///
/// Every field is optional in JSON; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub animation: AnimationConfig,
    pub initial_position: [f32; 3],
    pub clear_color: Color4,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            initial_position: [0.0, 0.0, 0.0],
            clear_color: Color4::BLACK,
        }
    }
}

impl DriverConfig {
    pub fn initial_position(&self) -> Vec3 {
        Vec3::from_array(self.initial_position)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::PhaseMode;

    #[test]
    fn defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.animation.phase_step, 0.01);
        assert_eq!(config.animation.offset_scale, 0.001);
        assert_eq!(config.animation.phase_mode, PhaseMode::Literal);
        assert_eq!(config.initial_position(), Vec3::ZERO);
        assert_eq!(config.clear_color, Color4::BLACK);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            DriverConfig::from_json_str(r#"{ "animation": { "phase_mode": "single" } }"#).unwrap();
        assert_eq!(config.animation.phase_mode, PhaseMode::Single);
        assert_eq!(config.animation.phase_step, 0.01);
        assert_eq!(config.clear_color, Color4::BLACK);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            DriverConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DriverConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let config = DriverConfig {
            initial_position: [0.25, -0.5, 0.0],
            clear_color: Color4::new(0.1, 0.1, 0.15, 1.0),
            ..DriverConfig::default()
        };
        config.save(tmp.path()).unwrap();

        let loaded = DriverConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
