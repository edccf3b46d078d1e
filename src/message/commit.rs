//! Commit message assembly.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::git::BranchInfo;
use crate::message::sanitize::strip_shell_breakers;

// type(scope)!: description, type!: description, type(scope): description, type: description
static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(?:\(([^)]*)\))?(!)?\s*:\s*(.*)$")
        .expect("subject pattern is a valid regex")
});

/// The first line of a conventional commit, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalSubject {
    pub commit_type: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
}

impl ConventionalSubject {
    /// Parse `type(scope)!: description`. `None` if the line lacks that shape
    /// or the description is empty.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = SUBJECT_PATTERN.captures(line.trim())?;
        let description = caps.get(4).map(|m| m.as_str().trim()).unwrap_or("");
        if description.is_empty() {
            return None;
        }

        Some(Self {
            commit_type: caps[1].to_string(),
            scope: caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty()),
            breaking: caps.get(3).is_some(),
            description: description.to_string(),
        })
    }
}

/// A commit message ready to be shown and committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDraft {
    pub message: String,
}

impl CommitDraft {
    /// Wrap user-supplied text, applying the same sanitization as generated text.
    pub fn manual(text: &str) -> Self {
        Self {
            message: strip_shell_breakers(text.trim()),
        }
    }
}

/// Combine raw model output with branch metadata.
///
/// With a detected ticket, the subject becomes `<type>(<TICKET>): <description>`
/// where the description is taken from the model's conventional subject, or
/// the whole first line when the model ignored the format. Without a ticket,
/// the output is used as is.
pub fn assemble_commit_message(raw: &str, branch: &BranchInfo) -> CommitDraft {
    // Models sometimes wrap the subject in backticks, which would hide the type.
    let cleaned = strip_shell_breakers(raw);
    let raw = cleaned.trim();

    let message = if branch.is_detected() {
        let (first_line, rest) = match raw.split_once('\n') {
            Some((first, rest)) => (first, Some(rest)),
            None => (raw, None),
        };

        let (description, breaking) = match ConventionalSubject::parse(first_line) {
            Some(subject) => (subject.description, subject.breaking),
            None => (first_line.trim().to_string(), false),
        };

        let mut message = format!(
            "{}({}){}: {}",
            branch.change_type,
            branch.ticket_id,
            if breaking { "!" } else { "" },
            description
        );
        if let Some(rest) = rest.map(str::trim_end).filter(|r| !r.trim().is_empty()) {
            message.push('\n');
            message.push_str(rest);
        }
        message
    } else {
        raw.to_string()
    };

    // Branch names may carry quotes too.
    CommitDraft {
        message: strip_shell_breakers(&message),
    }
}
