//! World configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is out of range
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Values given to bodies created through the world or the body factories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDefaults {
    pub elasticity: f64,
    pub inertia: f64,
}

impl Default for BodyDefaults {
    fn default() -> Self {
        Self {
            elasticity: 1.0,
            inertia: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// When set, [`crate::World::advance`] slices frame time into ticks of this length.
    pub fixed_timestep: Option<f64>,
    /// Upper bound on ticks run by a single `advance` call.
    pub max_substeps: usize,
    pub body_defaults: BodyDefaults,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: None,
            max_substeps: 8,
            body_defaults: BodyDefaults::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded world config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(step) = self.fixed_timestep {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::Invalid {
                    field: "fixed_timestep",
                    reason: format!("must be a positive finite number, got {step}"),
                });
            }
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::Invalid {
                field: "max_substeps",
                reason: "must be at least 1".to_string(),
            });
        }
        let defaults = &self.body_defaults;
        if defaults.elasticity.is_nan() || defaults.elasticity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "body_defaults.elasticity",
                reason: format!("must be non-negative, got {}", defaults.elasticity),
            });
        }
        if defaults.inertia.is_nan() || defaults.inertia <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "body_defaults.inertia",
                reason: format!("must be positive, got {}", defaults.inertia),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = WorldConfig::from_toml_str("").unwrap();
        assert_eq!(config, WorldConfig::default());
        assert_eq!(config.fixed_timestep, None);
        assert_eq!(config.max_substeps, 8);
        assert_eq!(config.body_defaults.elasticity, 1.0);
        assert_eq!(config.body_defaults.inertia, 100.0);
    }

    #[test]
    fn test_parse_full_document() {
        let config = WorldConfig::from_toml_str(
            r#"
            fixed_timestep = 0.5
            max_substeps = 4

            [body_defaults]
            elasticity = 0.8
            inertia = 50.0
            "#,
        )
        .unwrap();
        assert_eq!(config.fixed_timestep, Some(0.5));
        assert_eq!(config.max_substeps, 4);
        assert_eq!(config.body_defaults.elasticity, 0.8);
        assert_eq!(config.body_defaults.inertia, 50.0);
    }

    #[test]
    fn test_partial_body_defaults() {
        let config = WorldConfig::from_toml_str("[body_defaults]\nelasticity = 0.5\n").unwrap();
        assert_eq!(config.body_defaults.elasticity, 0.5);
        assert_eq!(config.body_defaults.inertia, 100.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = WorldConfig::from_toml_str("fixed_timestep = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fixed_timestep", .. }));

        let err = WorldConfig::from_toml_str("max_substeps = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_substeps", .. }));

        let err = WorldConfig::from_toml_str("[body_defaults]\ninertia = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "body_defaults.inertia", .. }));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = WorldConfig::from_toml_str("fixed_timestep = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = WorldConfig {
            fixed_timestep: Some(1.0),
            ..WorldConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(WorldConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = WorldConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
