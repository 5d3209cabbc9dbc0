//! Extraction of pairing mentions from free-form commit messages.
//!
//! Recognised forms (case-insensitive):
//!
//! ```text
//! pairing with @username
//! Pairing with @username, @username2, and @username3
//! pairing with @username and @username2
//! ```
//!
//! A mention phrase ends at the next `.`, carriage return or newline.

use std::sync::OnceLock;

use regex_lite::Regex;

fn pairing_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)pairing with (@[^.\r\n]*)").expect("valid regex"))
}

/// Handles mentioned in `pairing with @...` phrases, without the leading `@`,
/// unique and in first-seen order.
///
/// Every trailing `,` `;` or `.` is stripped from a handle, not just the last
/// one; GitHub logins never end in punctuation.
pub fn parse_pairing_handles(message: &str) -> Vec<String> {
    let mut handles: Vec<String> = Vec::new();

    for caps in pairing_regex().captures_iter(message) {
        let Some(phrase) = caps.get(1) else { continue };
        for word in phrase.as_str().split_whitespace() {
            let Some(handle) = word.strip_prefix('@') else {
                continue;
            };
            let handle = handle.trim_end_matches([',', ';', '.']);
            if handle.is_empty() || handles.iter().any(|h| h == handle) {
                continue;
            }
            handles.push(handle.to_string());
        }
    }

    handles
}
