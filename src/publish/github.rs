//! Pull request creation through the GitHub CLI.
//!
//! Authentication is left to `gh` itself (`gh auth login`).

use std::process::Command;

use tracing::debug;

use crate::error::PublishError;
use crate::message::PullRequestDraft;

/// The hosting CLI operations the pull request workflow depends on.
#[cfg_attr(test, mockall::automock)]
pub trait HostingCli {
    /// Whether the CLI is installed and runs.
    fn is_available(&self) -> bool;

    /// Open a pull request from `head` into `base`.
    fn create_pull_request(
        &self,
        base: &str,
        head: &str,
        draft: &PullRequestDraft,
    ) -> Result<(), PublishError>;
}

/// [`HostingCli`] backed by the `gh` binary.
#[derive(Debug, Default)]
pub struct GhCli;

impl HostingCli for GhCli {
    /// Uses the `which` crate to locate `gh`, then checks `gh --version` runs.
    fn is_available(&self) -> bool {
        if which::which("gh").is_err() {
            return false;
        }

        Command::new("gh")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn create_pull_request(
        &self,
        base: &str,
        head: &str,
        draft: &PullRequestDraft,
    ) -> Result<(), PublishError> {
        let args = pr_create_args(base, head, draft);
        debug!("gh pr create --base {} --head {}", base, head);

        let output = Command::new("gh")
            .args(&args)
            .output()
            .map_err(PublishError::GhSpawn)?;

        if !output.status.success() {
            return Err(PublishError::PullRequestFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let url = String::from_utf8_lossy(&output.stdout);
        if !url.trim().is_empty() {
            println!("{}", url.trim());
        }

        Ok(())
    }
}

fn pr_create_args<'a>(base: &'a str, head: &'a str, draft: &'a PullRequestDraft) -> [&'a str; 10] {
    [
        "pr",
        "create",
        "--base",
        base,
        "--head",
        head,
        "--title",
        &draft.title,
        "--body",
        &draft.description,
    ]
}
