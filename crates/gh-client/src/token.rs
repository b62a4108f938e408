//! Bearer token resolution
//!
//! The application never runs an authentication flow; it only picks up a
//! token that was configured beforehand.

use anyhow::{Context, Result};
use log::debug;

/// Resolves the GitHub token used for every request
///
/// Tries multiple sources in order:
/// 1. Token from the application config
/// 2. `GITHUB_TOKEN` or `GH_TOKEN` env var
/// 3. `gh auth token` command
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    configured: Option<String>,
}

impl TokenResolver {
    /// Create a resolver that prefers the given configured token
    pub fn new(configured: Option<String>) -> Self {
        let configured = configured.filter(|token| !token.trim().is_empty());
        Self { configured }
    }

    /// Resolve the token without touching the network
    pub async fn resolve(&self) -> Result<String> {
        if let Some(token) = &self.configured {
            debug!("Using token from config file");
            return Ok(token.clone());
        }

        if let Some(token) = env_token() {
            debug!("Using token from GITHUB_TOKEN/GH_TOKEN");
            return Ok(token);
        }

        debug!("Trying gh auth token");
        let output = tokio::process::Command::new("gh")
            .args(["auth", "token"])
            .output()
            .await
            .context("Failed to run 'gh auth token'")?;

        if output.status.success() {
            let token = String::from_utf8(output.stdout)
                .context("Invalid UTF-8 in gh auth token output")?
                .trim()
                .to_string();
            if !token.is_empty() {
                debug!("Using token from gh CLI");
                return Ok(token);
            }
        }

        Err(anyhow::anyhow!(
            "No GitHub token found. Set `token` in the config file, \
             export GITHUB_TOKEN, or run 'gh auth login'"
        ))
    }
}

fn env_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .or_else(|_| std::env::var("GH_TOKEN"))
        .ok()
        .filter(|token| !token.trim().is_empty())
}
