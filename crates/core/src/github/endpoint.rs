//! Host-aware GraphQL endpoint derivation.
//!
//! Lookups are configured with a REST API base URL (the same value `gh` and
//! most tooling use). The GraphQL endpoint and the host name used for token
//! lookup are both derived from it, which keeps GitHub Enterprise Server
//! usable with a single `--api-url`.

/// REST API base for github.com.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Derive the GraphQL endpoint from a REST API base URL.
///
/// - `https://api.github.com`  → `https://api.github.com/graphql`
/// - `https://<host>/api/v3`   → `https://<host>/api/graphql`
/// - anything else             → `{url}/graphql`
///
/// Trailing slashes are ignored.
pub fn graphql_endpoint(api_url: &str) -> String {
    let url = api_url.trim().trim_end_matches('/');

    if let Some(base) = url.strip_suffix("/api/v3") {
        return format!("{}/api/graphql", base);
    }
    if url.ends_with("/graphql") {
        return url.to_string();
    }

    format!("{}/graphql", url)
}

/// Host name credentials are stored under for `api_url`.
///
/// `https://api.github.com` maps to `github.com`; enterprise URLs map to
/// their own host.
pub fn api_host(api_url: &str) -> String {
    let url = api_url.trim();
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match host.as_str() {
        "api.github.com" => "github.com".to_string(),
        _ => host,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_com_default() {
        assert_eq!(
            graphql_endpoint(DEFAULT_API_URL),
            "https://api.github.com/graphql"
        );
    }

    #[test]
    fn test_github_com_trailing_slash() {
        assert_eq!(
            graphql_endpoint("https://api.github.com/"),
            "https://api.github.com/graphql"
        );
    }

    #[test]
    fn test_enterprise_api_v3() {
        assert_eq!(
            graphql_endpoint("https://github.company.com/api/v3"),
            "https://github.company.com/api/graphql"
        );
    }

    #[test]
    fn test_enterprise_api_v3_trailing_slash() {
        assert_eq!(
            graphql_endpoint("https://github.company.com/api/v3/"),
            "https://github.company.com/api/graphql"
        );
    }

    #[test]
    fn test_explicit_graphql_url_kept() {
        assert_eq!(
            graphql_endpoint("http://127.0.0.1:8080/graphql"),
            "http://127.0.0.1:8080/graphql"
        );
    }

    #[test]
    fn test_unknown_api_url_gets_suffix() {
        assert_eq!(
            graphql_endpoint("https://git.internal.io"),
            "https://git.internal.io/graphql"
        );
    }

    #[test]
    fn test_api_host() {
        assert_eq!(api_host("https://api.github.com"), "github.com");
        assert_eq!(api_host("HTTPS://API.GITHUB.COM/"), "github.com");
        assert_eq!(
            api_host("https://github.company.com/api/v3"),
            "github.company.com"
        );
        assert_eq!(api_host("git.internal.io"), "git.internal.io");
    }
}
