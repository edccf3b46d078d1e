//! Pull request title/description assembly.

use crate::git::BranchInfo;
use crate::message::sanitize::strip_shell_breakers;

/// A pull request ready to be shown and created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub title: String,
    pub description: String,
}

impl PullRequestDraft {
    /// Build a draft from user-supplied text.
    ///
    /// The first line becomes the title, everything after it the description.
    pub fn manual(text: &str) -> Self {
        let text = strip_shell_breakers(text.trim());
        let (title, description) = match text.split_once('\n') {
            Some((title, rest)) => (title.trim().to_string(), rest.trim().to_string()),
            None => (text.clone(), String::new()),
        };
        Self { title, description }
    }
}

/// Combine the generated title and description with branch metadata.
///
/// The title is used as returned; a detected ticket adds a `Fixes: #<TICKET>`
/// trailer to the description.
pub fn assemble_pull_request(title: &str, description: &str, branch: &BranchInfo) -> PullRequestDraft {
    let mut description = description.trim().to_string();
    if branch.is_detected() {
        description.push_str(&format!("\n\nFixes: #{}", branch.ticket_id));
    }

    PullRequestDraft {
        title: strip_shell_breakers(title.trim()),
        description: strip_shell_breakers(&description),
    }
}
