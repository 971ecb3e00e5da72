//! Runtime configuration.

use crate::catalog::DEFAULT_SPRITE_CDN_URL;
use crate::games::puzzle_grid::OverwritePolicy;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding the sprite CDN base.
pub const SPRITE_CDN_ENV: &str = "POKEGRID_SPRITE_CDN_URL";

/// Game configuration, read from TOML.
///
/// ```toml
/// overwrite_policy = "release"
/// sprite_cdn_url = "https://example.org/sprites"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Whether overwriting a filled cell releases the displaced Pokemon.
    #[serde(default)]
    overwrite_policy: OverwritePolicy,

    /// Base URL sprites are served from.
    #[serde(default = "default_sprite_cdn_url")]
    sprite_cdn_url: String,
}

fn default_sprite_cdn_url() -> String {
    DEFAULT_SPRITE_CDN_URL.to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            overwrite_policy: OverwritePolicy::default(),
            sprite_cdn_url: default_sprite_cdn_url(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(policy = %config.overwrite_policy, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// Starts from the file when one is given (defaults otherwise), then
    /// applies the sprite CDN environment override.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SPRITE_CDN_ENV).filter(|u| !u.trim().is_empty()) {
            debug!(%url, "Sprite CDN overridden from environment");
            self.sprite_cdn_url = url;
        }
        self
    }

    /// Returns a copy with a different overwrite policy.
    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
