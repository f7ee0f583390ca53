//! Configuration handling for the form client

use crate::api::{Session, DEFAULT_API_URL};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Overrides `api_base_url`
pub const API_URL_ENV: &str = "FAIRWAY_API_URL";
/// Overrides `session_token`
pub const SESSION_TOKEN_ENV: &str = "FAIRWAY_SESSION_TOKEN";

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Tournament API base URL
    pub api_base_url: Option<String>,
    /// Request timeout; unset or zero means no client-side timeout
    pub request_timeout_secs: Option<u64>,
    /// Admin bearer token
    pub session_token: Option<String>,
    pub session_user: Option<String>,
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "fairway", "fairway")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read `path`. On first run a template holding the defaults is written
    /// there for the user to fill in.
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let template = Self {
                api_base_url: Some(DEFAULT_API_URL.to_string()),
                ..Self::default()
            };
            match template.save_to(path) {
                Ok(()) => tracing::info!(path = %path.display(), "Wrote default config"),
                Err(e) => tracing::debug!(error = %e, "Could not write default config"),
            }
            return Ok(template);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save configuration to `path`
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Load the file, then apply environment overrides
    pub fn resolve() -> Result<Self> {
        Ok(Self::load()?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(%url, "API URL overridden from environment");
            self.api_base_url = Some(url);
        }
        if let Some(token) = lookup(SESSION_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.session_token = Some(token);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Admin session opened from the configured token, if any
    pub fn session(&self) -> Option<Session> {
        self.session_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|token| Session::new(token.clone(), self.session_user.clone()))
    }
}
