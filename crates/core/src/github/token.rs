//! Credential discovery for the GraphQL lookup.
//!
//! Resolution order:
//! 1. `GH_TOKEN`, then `GITHUB_TOKEN` (github.com), or
//!    `GH_ENTERPRISE_TOKEN`, then `GITHUB_ENTERPRISE_TOKEN` (other hosts)
//! 2. `gh auth token --hostname <host>`

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, instrument};

use crate::errors::GitHubError;

const GITHUB_COM: &str = "github.com";

/// Environment variables consulted for `host`, highest priority first.
pub fn token_env_vars(host: &str) -> [&'static str; 2] {
    if host.eq_ignore_ascii_case(GITHUB_COM) {
        ["GH_TOKEN", "GITHUB_TOKEN"]
    } else {
        ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    }
}

/// First non-empty value among `token_env_vars(host)` according to `lookup`.
pub fn token_from_env<F>(host: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    token_env_vars(host).into_iter().find_map(|var| {
        let value = lookup(var)?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            debug!(var, "using token from environment");
            Some(value.to_string())
        }
    })
}

/// Find a token for `host` in the environment or the `gh` CLI's store.
#[instrument]
pub async fn resolve_token(host: &str) -> Result<String, GitHubError> {
    if let Some(token) = token_from_env(host, |var| std::env::var(var).ok()) {
        return Ok(token);
    }

    token_from_gh_cli(host)
        .await
        .ok_or_else(|| GitHubError::TokenUnavailable {
            host: host.to_string(),
        })
}

async fn token_from_gh_cli(host: &str) -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|e| debug!(error = %e, "gh CLI not available"))
        .ok()?;

    if !output.status.success() {
        debug!(status = ?output.status, "gh auth token failed");
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        None
    } else {
        debug!("using token from gh CLI");
        Some(token)
    }
}
