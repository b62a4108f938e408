//! Application configuration
//!
//! Configuration loaded from `.gh-workflow-lander.toml`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration loaded from `.gh-workflow-lander.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GitHub token; `GITHUB_TOKEN`, `GH_TOKEN` and `gh auth token` are tried when unset
    #[serde(default)]
    pub token: Option<String>,

    /// REST API base URL (change for GitHub Enterprise)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Overall timeout of a single request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Page size when listing the user's repositories
    #[serde(default = "default_repository_limit")]
    pub repository_limit: u32,

    /// How often the terminal is redrawn and polled for input
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Repositories (`owner/name`) to show; the user's repositories when empty
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Branch to follow instead of each repository's default branch
    #[serde(default)]
    pub branch: Option<String>,

    /// JSON object sent as `inputs` when dispatching a workflow
    #[serde(default = "default_dispatch_inputs")]
    pub dispatch_inputs: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_repository_limit() -> u32 {
    200
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_dispatch_inputs() -> String {
    "{}".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            repository_limit: default_repository_limit(),
            tick_rate_ms: default_tick_rate_ms(),
            repositories: Vec::new(),
            branch: None,
            dispatch_inputs: default_dispatch_inputs(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse config file content
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
