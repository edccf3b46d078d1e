//! Commit workflow: stage, describe, confirm, commit, push.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::confirm::{ArtifactSource, Outcome, Prompter, UnknownInputPolicy, confirm_loop};
use crate::error::WorkflowError;
use crate::git::{BranchInfo, Vcs, collect_staged_diff};
use crate::llm::{CompletionBackend, PromptRequest, SHORT_RESPONSE_TOKENS, build_commit_prompt};
use crate::message::{CommitDraft, assemble_commit_message};
use crate::publish::publish_commit;
use crate::workflow::WorkflowOutcome;

const QUESTION: &str = "Use this commit message? [Y/n, or type your own message]";

/// Options for the commit workflow, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct CommitOptions {
    pub policy: UnknownInputPolicy,
    pub instructions: Option<String>,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            policy: UnknownInputPolicy::Override,
            instructions: None,
        }
    }
}

/// One completion request per generated commit message.
struct CommitSource<'a, B: ?Sized> {
    backend: &'a B,
    config: &'a Config,
    branch: &'a BranchInfo,
    prompt: String,
}

#[async_trait]
impl<B: CompletionBackend + ?Sized> ArtifactSource for CommitSource<'_, B> {
    type Output = CommitDraft;

    async fn generate(&mut self) -> Result<CommitDraft, WorkflowError> {
        let request = PromptRequest::new(
            &self.config.commit_model,
            self.prompt.clone(),
            self.config.sampling,
            SHORT_RESPONSE_TOKENS,
        );

        let raw = self
            .backend
            .complete(&request)
            .await
            .map_err(|source| WorkflowError::Generation {
                artifact: "commit message",
                source,
            })?;

        debug!("Raw commit message: {}", raw);
        Ok(assemble_commit_message(&raw, self.branch))
    }
}

/// Run the commit workflow.
///
/// Halts with [`WorkflowError::NoChanges`] before any remote call when there
/// is nothing staged after `git add .`.
pub async fn run<V, B, P>(
    vcs: &V,
    backend: &B,
    prompter: &mut P,
    config: &Config,
    workdir: &Path,
    options: &CommitOptions,
) -> Result<WorkflowOutcome, WorkflowError>
where
    V: Vcs + ?Sized,
    B: CompletionBackend + ?Sized,
    P: Prompter + ?Sized,
{
    if !vcs.is_repository() {
        return Err(WorkflowError::NotARepository(workdir.display().to_string()));
    }

    let branch = match vcs.current_branch() {
        Ok(name) => BranchInfo::parse(&name),
        Err(e) => {
            warn!("Could not read branch name, using unscoped messages: {e}");
            BranchInfo::default()
        }
    };
    if branch.is_detected() {
        debug!("Branch type={} ticket={}", branch.change_type, branch.ticket_id);
    }

    let diff = collect_staged_diff(vcs);
    if diff.trim().is_empty() {
        return Err(WorkflowError::NoChanges("No changes staged for commit."));
    }

    let prompt = build_commit_prompt(&diff, &branch, options.instructions.as_deref());
    debug!("Commit prompt length: {} chars", prompt.len());

    let mut source = CommitSource {
        backend,
        config,
        branch: &branch,
        prompt,
    };

    match confirm_loop(&mut source, prompter, options.policy, QUESTION).await? {
        Outcome::Accepted(draft) => {
            publish_commit(vcs, &draft)?;
            Ok(WorkflowOutcome::Published(draft.message))
        }
        Outcome::Aborted => Ok(WorkflowOutcome::Aborted),
    }
}
