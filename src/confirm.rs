//! Interactive accept / regenerate / override loop.
//!
//! The loop presents the current artifact and reads one line. `y` (or an
//! empty line) accepts, `n` regenerates, and anything else is handled by the
//! [`UnknownInputPolicy`]: used verbatim as the artifact, or treated as abort.

use async_trait::async_trait;
use dialoguer::Input;

use crate::error::{ConfirmError, WorkflowError};
use crate::message::{CommitDraft, PullRequestDraft};

/// What to do with input that is neither accept nor regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UnknownInputPolicy {
    /// Use the input as the artifact text and accept it.
    Override,
    /// Stop without publishing.
    Abort,
}

/// The user's answer at the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Accept,
    Regenerate,
    Override(String),
    Abort,
}

/// Classify one line of user input.
pub fn interpret(input: &str, policy: UnknownInputPolicy) -> Response {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "y" {
        return Response::Accept;
    }
    if trimmed == "n" {
        return Response::Regenerate;
    }
    match policy {
        UnknownInputPolicy::Override => Response::Override(trimmed.to_string()),
        UnknownInputPolicy::Abort => Response::Abort,
    }
}

/// A generated artifact that can be displayed and replaced by user text.
pub trait Artifact: Sized {
    fn render(&self) -> String;
    fn from_override(text: &str) -> Self;
}

impl Artifact for CommitDraft {
    fn render(&self) -> String {
        self.message.clone()
    }

    fn from_override(text: &str) -> Self {
        CommitDraft::manual(text)
    }
}

impl Artifact for PullRequestDraft {
    fn render(&self) -> String {
        format!("Title: {}\n\nDescription:\n{}", self.title, self.description)
    }

    fn from_override(text: &str) -> Self {
        PullRequestDraft::manual(text)
    }
}

/// Produces a fresh artifact on every call (one or more completion requests).
#[async_trait]
pub trait ArtifactSource: Send {
    type Output: Artifact + Send;

    async fn generate(&mut self) -> Result<Self::Output, WorkflowError>;
}

/// Line-based user interaction.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Show the artifact under review.
    fn present(&mut self, artifact: &str);

    /// Show a diagnostic without ending the loop.
    fn report(&mut self, message: &str);

    /// Ask `question` and return the raw line typed by the user.
    fn ask(&mut self, question: &str) -> Result<String, ConfirmError>;
}

/// [`Prompter`] on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn present(&mut self, artifact: &str) {
        println!("\n{}\n", artifact);
    }

    fn report(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn ask(&mut self, question: &str) -> Result<String, ConfirmError> {
        Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(ConfirmError::Input)
    }
}

/// How the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    Accepted(A),
    Aborted,
}

/// Generate, present, and ask until the user accepts, overrides, or aborts.
///
/// A failed first generation ends the loop with its error. A failed
/// regeneration is reported and the previous artifact is presented again, so
/// the user can retry or accept what they already have.
pub async fn confirm_loop<S, P>(
    source: &mut S,
    prompter: &mut P,
    policy: UnknownInputPolicy,
    question: &str,
) -> Result<Outcome<S::Output>, WorkflowError>
where
    S: ArtifactSource,
    P: Prompter + ?Sized,
{
    let mut current = source.generate().await?;

    loop {
        prompter.present(&current.render());
        let answer = prompter.ask(question)?;

        match interpret(&answer, policy) {
            Response::Accept => return Ok(Outcome::Accepted(current)),
            Response::Override(text) => return Ok(Outcome::Accepted(S::Output::from_override(&text))),
            Response::Abort => return Ok(Outcome::Aborted),
            Response::Regenerate => match source.generate().await {
                Ok(next) => current = next,
                Err(e) => prompter.report(&e.to_string()),
            },
        }
    }
}
