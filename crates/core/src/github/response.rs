//! Interpretation of GraphQL lookup responses.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use super::query::USER_ALIAS_PREFIX;
use crate::attribution::UserRecord;
use crate::errors::GitHubError;

/// OAuth scopes a token needs for the lookup query to return emails.
pub const REQUIRED_SCOPES: [&str; 2] = ["read:user", "user:email"];

/// Required scopes absent from an `X-OAuth-Scopes` header value.
pub fn missing_token_scopes(scopes_header: &str) -> BTreeSet<String> {
    let granted: BTreeSet<String> = scopes_header
        .split(',')
        .map(|s| s.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|s| !s.is_empty())
        .collect();

    REQUIRED_SCOPES
        .iter()
        .filter(|scope| !granted.contains(**scope))
        .map(|scope| scope.to_string())
        .collect()
}

/// Extract the user records from a response body.
///
/// Null entries (unknown logins) are skipped, as are entries that do not
/// decode as a user; the latter are logged. Records come back in request
/// order, taken from the `user_N` field aliases rather than the order the
/// fields appear in the response.
pub fn interpret_response(
    body: &Value,
    scopes_header: Option<&str>,
) -> Result<Vec<UserRecord>, GitHubError> {
    let Some(data) = body.get("data").and_then(Value::as_object) else {
        let missing = missing_token_scopes(scopes_header.unwrap_or_default());
        if !missing.is_empty() {
            warn!(?missing, "response has no data and token is missing scopes");
            return Err(GitHubError::MissingScopes(missing.into_iter().collect()));
        }
        return Err(GitHubError::ParseError(describe_errors(body)));
    };

    let mut indexed: Vec<(usize, UserRecord)> = Vec::with_capacity(data.len());
    for (key, entry) in data {
        if entry.is_null() {
            debug!(field = %key, "no user for requested login");
            continue;
        }
        match serde_json::from_value::<UserRecord>(entry.clone()) {
            Ok(user) => indexed.push((request_index(key), user)),
            Err(e) => warn!(field = %key, error = %e, "skipping malformed user entry"),
        }
    }

    indexed.sort_by_key(|(i, _)| *i);
    Ok(indexed.into_iter().map(|(_, user)| user).collect())
}

/// Numeric suffix of a `user_N` alias; unrecognised keys sort last.
fn request_index(key: &str) -> usize {
    key.strip_prefix(USER_ALIAS_PREFIX)
        .and_then(|n| n.parse().ok())
        .unwrap_or(usize::MAX)
}

fn describe_errors(body: &Value) -> String {
    let messages: Vec<&str> = body
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if messages.is_empty() {
        "response has no data".to_string()
    } else {
        messages.join("; ")
    }
}
