//! GraphQL document construction for batched user lookups.

use std::fmt::Write as _;

/// Prefix of the per-login field alias; the suffix is the request index.
pub const USER_ALIAS_PREFIX: &str = "user_";

/// Fields selected for every user.
const USER_FIELDS: [&str; 4] = ["name", "email", "login", "databaseId"];

/// Build one query that looks up every login, aliased `user_0`, `user_1`, …
/// in input order.
pub fn build_user_query<S: AsRef<str>>(logins: &[S]) -> String {
    let mut query = String::from("{\n");
    for (i, login) in logins.iter().enumerate() {
        let _ = writeln!(
            query,
            "  {USER_ALIAS_PREFIX}{i}: user(login: {}) {{",
            string_literal(login.as_ref())
        );
        for field in USER_FIELDS {
            let _ = writeln!(query, "    {field}");
        }
        query.push_str("  }\n");
    }
    query.push('}');
    query
}

/// JSON request body wrapping [`build_user_query`].
pub fn query_body<S: AsRef<str>>(logins: &[S]) -> serde_json::Value {
    serde_json::json!({ "query": build_user_query(logins) })
}

/// Quote `value` as a GraphQL string literal.
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_user_query() {
        let expected = r#"{
  user_0: user(login: "monalisa") {
    name
    email
    login
    databaseId
  }
  user_1: user(login: "hubot") {
    name
    email
    login
    databaseId
  }
}"#;
        assert_eq!(build_user_query(&["monalisa", "hubot"]), expected);
    }

    #[test]
    fn test_query_body_wraps_document() {
        let body = query_body(&["monalisa"]);
        let query = body["query"].as_str().unwrap();
        assert!(query.contains(r#"user_0: user(login: "monalisa")"#));
    }

    #[test]
    fn test_logins_are_escaped() {
        let query = build_user_query(&[r#"evil") { id } x: user(login: "y"#]);
        assert!(query.contains(r#"user(login: "evil\") { id } x: user(login: \"y")"#));
    }
}
