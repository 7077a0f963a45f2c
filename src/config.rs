// Configuration: TOML-loaded tunables for divider rendering and hit-testing.

use serde::Deserialize;
use std::path::Path;

use crate::geometry::{DIVIDER_WIDTH, HIT_TEST_MARGIN};

/// Top-level layout-manager configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub divider: DividerConfig,
}

/// Divider bar configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerConfig {
    /// Width of the divider bar in pixels.
    pub width: f32,
    /// Extra pixels around a divider that still count as a hit.
    pub hit_margin: f32,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            width: DIVIDER_WIDTH,
            hit_margin: HIT_TEST_MARGIN,
        }
    }
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs ───────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    divider: RawDividerConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawDividerConfig {
    width: f32,
    hit_margin: f32,
}

impl Default for RawDividerConfig {
    fn default() -> Self {
        Self {
            width: DIVIDER_WIDTH,
            hit_margin: HIT_TEST_MARGIN,
        }
    }
}

// ── Config implementation ────────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let config = Self {
            divider: DividerConfig {
                width: raw.divider.width,
                hit_margin: raw.divider.hit_margin,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.divider.width <= 0.0 {
            return Err(ConfigError::Validation(
                "divider width must be > 0".to_string(),
            ));
        }
        if self.divider.hit_margin < 0.0 {
            return Err(ConfigError::Validation(
                "divider hit_margin must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}
