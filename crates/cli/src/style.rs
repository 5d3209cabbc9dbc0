//! Shared styling for status messages written to stderr.

use console::Style;

/// Create a success-styled string (green with checkmark).
pub fn success(msg: &str) -> String {
    let style = Style::new().for_stderr().green();
    format!("{} {}", style.apply_to("✓"), msg)
}

/// Create a warning-styled string (yellow).
pub fn warn(msg: &str) -> String {
    let style = Style::new().for_stderr().yellow();
    format!("{} {}", style.apply_to("⚠"), msg)
}

/// Create an alias name label (bold).
pub fn alias_name(name: &str) -> String {
    Style::new().bold().apply_to(name).to_string()
}
