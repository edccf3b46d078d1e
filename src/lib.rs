//! diffscribe - A CLI tool that writes commit messages and pull request
//! descriptions from your diff.
//!
//! # Overview
//!
//! diffscribe reads the staged diff (or a branch's diff against its base),
//! asks a chat-completion endpoint for a conventional commit message or a pull
//! request title and description, lets you accept, regenerate, or rewrite it,
//! and then commits and pushes or opens the pull request with `gh`.

pub mod config;
pub mod confirm;
pub mod error;
pub mod git;
pub mod llm;
pub mod message;
pub mod publish;
pub mod workflow;

// Re-export commonly used types
pub use config::Config;
pub use confirm::{Outcome, Prompter, UnknownInputPolicy};
pub use error::{CompletionError, ConfigError, ConfirmError, GitError, PublishError, WorkflowError};
pub use git::BranchInfo;
pub use message::{CommitDraft, PullRequestDraft};
pub use workflow::WorkflowOutcome;
