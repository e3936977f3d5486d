//! Service configuration loading.
//!
//! Reads `config.toml` and applies environment overrides on top:
//!
//! - `MEMBERKIT_API_URL` replaces `service.api_base_url`
//! - `MEMBERKIT_TIMEOUT_SECS` replaces `service.request_timeout_secs`

use crate::paths::MemberkitPaths;
use memberkit_core::config::RootConfig;
use memberkit_core::{MemberkitError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "MEMBERKIT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "MEMBERKIT_TIMEOUT_SECS";

/// Loads [`RootConfig`] from a TOML file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Uses the platform config location (`~/.config/memberkit/config.toml`).
    pub fn new_default() -> Result<Self> {
        let path = MemberkitPaths::config_file().map_err(|e| MemberkitError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the file (defaults if it does not exist), then applies
    /// overrides from the process environment.
    pub fn load(&self) -> Result<RootConfig> {
        let config = self.load_file()?;
        apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    /// Loads the file only. A missing file yields defaults.
    pub fn load_file(&self) -> Result<RootConfig> {
        if !self.config_path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                self.config_path.display()
            );
            return Ok(RootConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            MemberkitError::config(format!(
                "Failed to read configuration file at {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            MemberkitError::config(format!(
                "Failed to parse configuration file at {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: RootConfig, lookup: F) -> Result<RootConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.service.api_base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.service.request_timeout_secs = raw.trim().parse().map_err(|_| {
            MemberkitError::config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
        })?;
    }

    Ok(config)
}
