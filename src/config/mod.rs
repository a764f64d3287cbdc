//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the backend base URL
pub const ENV_BASE_URL: &str = "ADMIN_API_BASE_URL";

/// Environment variable overriding the request timeout, in seconds
pub const ENV_TIMEOUT_SECS: &str = "ADMIN_API_TIMEOUT_SECS";

/// Environment variable pointing at a file-backed session
pub const ENV_SESSION_FILE: &str = "ADMIN_SESSION_FILE";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.example.com/api`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Path under which uploaded files are served
    pub uploads_path: String,

    /// Route the navigator is sent to after a 401
    pub login_route: String,

    /// Persist the session in this file instead of memory
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 10,
            uploads_path: "/uploads".to_string(),
            login_route: "/login".to_string(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with defaults for everything else
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))?;
        }
        if let Ok(path) = std::env::var(ENV_SESSION_FILE) {
            config.session_file = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the client cannot work with
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https:// (got '{}')", url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        if !self.login_route.starts_with('/') {
            anyhow::bail!("login_route must be an absolute path (got '{}')", self.login_route);
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// Origin serving uploaded files: the base URL minus a trailing `/api`
    pub fn asset_origin(&self) -> &str {
        let base = self.api_base();
        base.strip_suffix("/api").unwrap_or(base)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
