use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the backend root
pub const BASE_URL_ENV: &str = "SMARTLOCAL_BASE_URL";

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Backend root, without the API prefix
    pub base_url: String,

    /// Path prefix every endpoint lives under
    pub api_prefix: String,

    /// Output directory for reports
    pub output_dir: PathBuf,

    /// Write JSON, JUnit and HTML reports after the run
    pub report: bool,

    /// Print per-case progress and the summary
    #[serde(skip, default = "console_default")]
    pub console: bool,

    /// Per-request bound; reqwest defaults apply when unset
    #[serde(skip)]
    pub request_timeout: Option<Duration>,
}

fn console_default() -> bool {
    true
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            api_prefix: "/api".to_string(),
            output_dir: PathBuf::from("./output"),
            report: false,
            console: console_default(),
            request_timeout: None,
        }
    }
}

impl HarnessConfig {
    /// Read a YAML config file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default().normalized());
        }
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Defaults, overlaid with the config file when one is given
    pub fn resolve(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self.normalized()
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        self.base_url = trimmed;
        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            self.api_prefix = format!("/{}", self.api_prefix);
        }
        self
    }
}
