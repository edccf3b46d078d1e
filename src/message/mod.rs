//! Assembly of generated text into the final commit message or pull request.
//!
//! Every artifact leaving this module has had double quotes and backticks
//! stripped, so it can be passed to `git` or `gh` as a single argument.

pub mod commit;
pub mod pull_request;
pub mod sanitize;

pub use commit::{CommitDraft, ConventionalSubject, assemble_commit_message};
pub use pull_request::{PullRequestDraft, assemble_pull_request};
pub use sanitize::strip_shell_breakers;
