//! Branch-name convention parsing.
//!
//! Branches named `<type>/<TICKET>-<number>` (e.g. `fix/abc-42`) carry the
//! change type and the ticket that scopes the generated messages.

use std::sync::LazyLock;

use regex_lite::Regex;

static BRANCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^/]+)/([A-Za-z]+-[0-9]+)").expect("branch pattern is a valid regex")
});

/// Change type and ticket parsed from the current branch name.
///
/// Both fields are empty when the branch does not follow the convention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchInfo {
    pub change_type: String,
    pub ticket_id: String,
}

impl BranchInfo {
    pub fn parse(branch_name: &str) -> Self {
        match BRANCH_PATTERN.captures(branch_name) {
            Some(caps) => Self {
                change_type: caps[1].to_string(),
                ticket_id: caps[2].to_uppercase(),
            },
            None => Self::default(),
        }
    }

    /// Whether the branch followed the `<type>/<TICKET>-<n>` convention.
    pub fn is_detected(&self) -> bool {
        !self.change_type.is_empty() && !self.ticket_id.is_empty()
    }
}
