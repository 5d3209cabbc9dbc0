//! Asynchronous GitHub GraphQL client.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use tracing::{debug, info, instrument};

use super::query::query_body;
use super::response::interpret_response;
use crate::attribution::UserRecord;
use crate::errors::GitHubError;

/// Response header listing the scopes granted to the token.
const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";

const CLIENT_USER_AGENT: &str = concat!("pairing-with/", env!("CARGO_PKG_VERSION"));

/// Client for the batched user lookup.
#[derive(Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self, GitHubError> {
        let endpoint = endpoint.into();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        debug!(endpoint = %endpoint, "created GraphQlClient");
        Ok(Self {
            http,
            endpoint,
            token: token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up every login in a single request.
    ///
    /// Unknown logins are left out of the result; the rest come back in
    /// the order of `logins`.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn lookup_users(&self, logins: &[String]) -> Result<Vec<UserRecord>, GitHubError> {
        if logins.is_empty() {
            debug!("no logins to look up");
            return Ok(Vec::new());
        }

        let resp = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("bearer {}", self.token))
            .json(&query_body(logins))
            .send()
            .await?;

        let status = resp.status();
        let scopes = resp
            .headers()
            .get(OAUTH_SCOPES_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self::check_status(status)?;

        let text = resp.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| GitHubError::ParseError(format!("invalid JSON: {e}")))?;

        let users = interpret_response(&body, scopes.as_deref())?;
        info!(
            requested = logins.len(),
            found = users.len(),
            "looked up users"
        );
        Ok(users)
    }

    /// 403 falls through so that scope problems reach the `data` check.
    fn check_status(status: StatusCode) -> Result<(), GitHubError> {
        if status.is_success() || status == StatusCode::FORBIDDEN {
            return Ok(());
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(GitHubError::AuthenticationFailed(format!("HTTP {}", status)));
        }
        Err(GitHubError::ApiError {
            status: status.as_u16(),
            body: format!("HTTP {}", status),
        })
    }
}
