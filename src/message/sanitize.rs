//! Characters that must never reach a CLI argument.

/// Characters removed from every artifact before display or publish.
pub const SHELL_BREAKERS: [char; 2] = ['"', '`'];

/// Remove double quotes and backticks.
pub fn strip_shell_breakers(text: &str) -> String {
    text.chars().filter(|c| !SHELL_BREAKERS.contains(c)).collect()
}
