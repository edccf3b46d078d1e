//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Repository, Signature};

use diffscribe::confirm::Prompter;
use diffscribe::error::{CompletionError, ConfirmError, GitError, PublishError};
use diffscribe::git::Vcs;
use diffscribe::llm::{CompletionBackend, PromptRequest};
use diffscribe::publish::HostingCli;
use diffscribe::PullRequestDraft;

/// A scratch git repository with a configured identity.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` relative to the repository root.
    pub fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(path, content).expect("Failed to write test file");
    }

    /// Stage everything and commit with `message` through git2.
    pub fn commit_all(&self, message: &str) {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit");
    }

    /// Run a git command in the repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Attach a bare `origin` and push the current branch with upstream tracking.
    pub fn with_bare_origin(&self) -> tempfile::TempDir {
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");
        let remote_path = remote_dir.path().to_str().expect("Invalid remote path");
        self.git(&["remote", "add", "origin", remote_path]);
        self.git(&["push", "-u", "origin", "HEAD"]);
        remote_dir
    }

    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or("").to_string())
            .expect("Failed to read HEAD commit")
    }
}

/// In-memory [`Vcs`] that records every call.
pub struct FakeVcs {
    pub repository: bool,
    pub branch: Option<String>,
    pub staged_diff: String,
    pub branch_diff: String,
    pub fail_push: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn new(branch: &str) -> Self {
        Self {
            repository: true,
            branch: Some(branch.to_string()),
            staged_diff: String::new(),
            branch_diff: String::new(),
            fail_push: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_staged_diff(mut self, diff: &str) -> Self {
        self.staged_diff = diff.to_string();
        self
    }

    pub fn with_branch_diff(mut self, diff: &str) -> Self {
        self.branch_diff = diff.to_string();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl Vcs for FakeVcs {
    fn is_repository(&self) -> bool {
        self.record("status");
        self.repository
    }

    fn current_branch(&self) -> Result<String, GitError> {
        self.record("branch");
        self.branch.clone().ok_or(GitError::NoCurrentBranch)
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        self.record("diff --cached");
        Ok(self.staged_diff.clone())
    }

    fn branch_diff(&self, base: &str, pathspecs: &[String]) -> Result<String, GitError> {
        self.record(format!("diff {}... {}", base, pathspecs.join(" ")).trim_end().to_string());
        Ok(self.branch_diff.clone())
    }

    fn stage_all(&self) -> Result<(), GitError> {
        self.record("add");
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.record(format!("commit {}", message));
        Ok(())
    }

    fn push(&self) -> Result<(), GitError> {
        self.record("push");
        if self.fail_push {
            return Err(GitError::CommandFailed {
                operation: "push".to_string(),
                stderr: "rejected".to_string(),
            });
        }
        Ok(())
    }
}

/// Completion backend that replays canned responses and records requests.
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    pub requests: Mutex<Vec<PromptRequest>>,
}

impl ScriptedBackend {
    pub fn new(responses: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message_text.clone())
            .collect()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &PromptRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::EmptyCompletion))
    }
}

/// Hosting CLI fake that records created pull requests.
pub struct FakeHosting {
    pub available: bool,
    pub created: RefCell<Vec<(String, String, PullRequestDraft)>>,
}

impl FakeHosting {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            created: RefCell::new(Vec::new()),
        }
    }
}

impl HostingCli for FakeHosting {
    fn is_available(&self) -> bool {
        self.available
    }

    fn create_pull_request(
        &self,
        base: &str,
        head: &str,
        draft: &PullRequestDraft,
    ) -> Result<(), PublishError> {
        self.created
            .borrow_mut()
            .push((base.to_string(), head.to_string(), draft.clone()));
        Ok(())
    }
}

/// Prompter that answers from a script and records what it showed.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub presented: Vec<String>,
    pub reported: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            presented: Vec::new(),
            reported: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn present(&mut self, artifact: &str) {
        self.presented.push(artifact.to_string());
    }

    fn report(&mut self, message: &str) {
        self.reported.push(message.to_string());
    }

    fn ask(&mut self, _question: &str) -> Result<String, ConfirmError> {
        Ok(self
            .answers
            .pop_front()
            .expect("prompter ran out of scripted answers"))
    }
}
