//! Error types for the pairing-with core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them for callers that want a single
//! error type.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),
}

// ---------------------------------------------------------------------------
// Alias errors
// ---------------------------------------------------------------------------

/// Errors from alias book mutations.
#[derive(Debug, Error)]
pub enum AliasError {
    /// The alias lists itself among its own handles.
    #[error("an alias cannot reference itself: '{alias}'")]
    SelfReference { alias: String },
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from locating, reading and writing the alias store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `$XDG_CONFIG_HOME` nor a home directory could be determined.
    #[error("could not determine a configuration directory")]
    PathUnavailable,

    /// TOML parse error.
    #[error("configuration parse error in '{}': {}", .path.display(), .detail)]
    ParseError { path: PathBuf, detail: String },

    /// TOML serialization error.
    #[error("configuration serialize error: {0}")]
    SerializeError(String),

    /// Could not create, read or write the file.
    #[error("configuration I/O error at '{}': {}", .path.display(), .source)]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// GitHub API errors
// ---------------------------------------------------------------------------

/// Errors from the GitHub GraphQL lookup.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// HTTP-level transport error (network, TLS, etc.).
    #[error("GitHub API call failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("GitHub API error (HTTP {status}): {body}")]
    ApiError { status: u16, body: String },

    /// Authentication token was rejected.
    #[error("GitHub authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The response had no `data` and the token lacks required scopes.
    #[error(
        "your token is missing required scopes. try running the following:\n\tgh auth refresh --scopes {}",
        .0.join(",")
    )]
    MissingScopes(Vec<String>),

    /// The response could not be interpreted.
    #[error("could not parse response: {0}")]
    ParseError(String),

    /// No credential was found for the host.
    #[error("no GitHub token found for {host}; set GH_TOKEN or run `gh auth login`")]
    TokenUnavailable { host: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = AliasError::SelfReference {
            alias: "buddies".into(),
        };
        assert!(err.to_string().contains("cannot reference itself"));

        let err = GitHubError::MissingScopes(vec!["read:user".into(), "user:email".into()]);
        assert!(err
            .to_string()
            .ends_with("gh auth refresh --scopes read:user,user:email"));

        let err = GitHubError::TokenUnavailable {
            host: "github.com".into(),
        };
        assert!(err.to_string().contains("github.com"));
    }

    #[test]
    fn test_core_error_from_subsystem() {
        let core_err: CoreError = AliasError::SelfReference { alias: "x".into() }.into();
        assert!(matches!(core_err, CoreError::Alias(_)));

        let core_err: CoreError = ConfigError::PathUnavailable.into();
        assert!(matches!(core_err, CoreError::Config(_)));
    }
}
