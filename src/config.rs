//! Configuration module for Roost

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_PAGE_LIMIT;
use crate::feed::DEFAULT_SNAPSHOT_BUFFER;
use crate::models::FeedKind;
use crate::paths;

/// Environment variable overriding the instance
pub const INSTANCE_ENV: &str = "ROOST_INSTANCE";

/// Environment variable overriding the access token
pub const TOKEN_ENV: &str = "ROOST_ACCESS_TOKEN";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Mastodon instance (e.g. `mastodon.social` or a full URL)
    #[serde(default)]
    pub instance: String,

    /// OAuth access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Number of entries to fetch per page
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// How many snapshots a slow subscriber may fall behind before skipping
    #[serde(default = "default_snapshot_buffer")]
    pub snapshot_buffer: usize,

    /// Feed shown when none is given on the command line
    #[serde(default)]
    pub default_feed: FeedKind,
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn default_snapshot_buffer() -> usize {
    DEFAULT_SNAPSHOT_BUFFER
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance: String::new(),
            access_token: None,
            page_limit: default_page_limit(),
            snapshot_buffer: default_snapshot_buffer(),
            default_feed: FeedKind::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path, then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Override settings from environment variables
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(instance) = var(INSTANCE_ENV).filter(|v| !v.trim().is_empty()) {
            self.instance = instance;
        }
        if let Some(token) = var(TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    /// Instance and token, if both are set
    pub fn credentials(&self) -> Result<(&str, &str)> {
        if self.instance.trim().is_empty() {
            anyhow::bail!("No instance configured. Set `instance` in the config file or {INSTANCE_ENV}");
        }
        let token = self
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .with_context(|| {
                format!("No access token configured. Set `access_token` in the config file or {TOKEN_ENV}")
            })?;
        Ok((self.instance.as_str(), token))
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}
