//! Pull request workflow: describe the branch, confirm, open the PR.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use crate::config::Config;
use crate::confirm::{ArtifactSource, Outcome, Prompter, UnknownInputPolicy, confirm_loop};
use crate::error::WorkflowError;
use crate::git::{BranchInfo, DEFAULT_EXCLUDED_SUFFIXES, Vcs, collect_branch_diff};
use crate::llm::{
    CompletionBackend, DESCRIPTION_RESPONSE_TOKENS, PromptRequest, SHORT_RESPONSE_TOKENS,
    build_description_prompt, build_title_prompt,
};
use crate::message::{PullRequestDraft, assemble_pull_request};
use crate::publish::HostingCli;
use crate::workflow::WorkflowOutcome;

const QUESTION: &str = "Create the pull request with this title and description? [Y/n]";

/// Options for the pull request workflow, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct PrOptions {
    pub base: String,
    pub instructions: Option<String>,
    pub policy: UnknownInputPolicy,
    /// Diff every tracked file instead of applying suffix exclusion.
    pub include_all: bool,
}

impl PrOptions {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            instructions: None,
            policy: UnknownInputPolicy::Abort,
            include_all: false,
        }
    }
}

/// Two completion requests per draft: description from the diff, then title
/// from that description.
struct PullRequestSource<'a, B: ?Sized> {
    backend: &'a B,
    config: &'a Config,
    branch: &'a BranchInfo,
    instructions: Option<&'a str>,
    description_prompt: String,
}

impl<B: CompletionBackend + ?Sized> PullRequestSource<'_, B> {
    async fn complete(
        &self,
        prompt: String,
        max_tokens: u32,
        artifact: &'static str,
    ) -> Result<String, WorkflowError> {
        let request = PromptRequest::new(&self.config.pr_model, prompt, self.config.sampling, max_tokens);
        self.backend
            .complete(&request)
            .await
            .map_err(|source| WorkflowError::Generation { artifact, source })
    }
}

#[async_trait]
impl<B: CompletionBackend + ?Sized> ArtifactSource for PullRequestSource<'_, B> {
    type Output = PullRequestDraft;

    async fn generate(&mut self) -> Result<PullRequestDraft, WorkflowError> {
        let description = self
            .complete(
                self.description_prompt.clone(),
                DESCRIPTION_RESPONSE_TOKENS,
                "PR description",
            )
            .await?;

        let title_prompt = build_title_prompt(&description, self.branch, self.instructions);
        let title = self
            .complete(title_prompt, SHORT_RESPONSE_TOKENS, "PR title")
            .await?;

        Ok(assemble_pull_request(&title, &description, self.branch))
    }
}

/// Run the pull request workflow against `options.base`.
///
/// The hosting CLI is checked before anything else so no API credits are
/// spent when it is missing.
pub async fn run<V, H, B, P>(
    vcs: &V,
    hosting: &H,
    backend: &B,
    prompter: &mut P,
    config: &Config,
    workdir: &Path,
    options: &PrOptions,
) -> Result<WorkflowOutcome, WorkflowError>
where
    V: Vcs + ?Sized,
    H: HostingCli + ?Sized,
    B: CompletionBackend + ?Sized,
    P: Prompter + ?Sized,
{
    if !hosting.is_available() {
        return Err(WorkflowError::HostingCliMissing);
    }

    if !vcs.is_repository() {
        return Err(WorkflowError::NotARepository(workdir.display().to_string()));
    }

    let head = match vcs.current_branch() {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => return Err(WorkflowError::NoBranch),
        Err(e) => {
            eprintln!("Error getting current branch name: {e}");
            return Err(WorkflowError::NoBranch);
        }
    };
    let branch = BranchInfo::parse(&head);

    let exclusions: &[&str] = if options.include_all {
        &[]
    } else {
        DEFAULT_EXCLUDED_SUFFIXES
    };
    let diff = collect_branch_diff(vcs, &options.base, exclusions);
    if diff.trim().is_empty() {
        return Err(WorkflowError::NoChanges("No changes found for the pull request."));
    }

    let instructions = options.instructions.as_deref();
    let description_prompt = build_description_prompt(&diff, instructions);
    debug!("Description prompt length: {} chars", description_prompt.len());

    let mut source = PullRequestSource {
        backend,
        config,
        branch: &branch,
        instructions,
        description_prompt,
    };

    match confirm_loop(&mut source, prompter, options.policy, QUESTION).await? {
        Outcome::Accepted(draft) => {
            hosting.create_pull_request(&options.base, &head, &draft)?;
            Ok(WorkflowOutcome::Published(draft.title))
        }
        Outcome::Aborted => Ok(WorkflowOutcome::Aborted),
    }
}
