//! Version-control command runner.
//!
//! All operations shell out to the system `git` binary, inheriting the user's
//! existing git config, SSH agent, and credential store. Branch lookup goes
//! through git2 so detached HEADs are detected without parsing porcelain.

use std::path::PathBuf;
use std::process::Command;

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// The git operations the workflows depend on.
///
/// Implemented by [`SystemGit`]; mocked in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Whether the working directory is inside a git repository.
    fn is_repository(&self) -> bool;

    /// Short name of the checked-out branch.
    fn current_branch(&self) -> Result<String, GitError>;

    /// Diff of the index against HEAD.
    fn staged_diff(&self) -> Result<String, GitError>;

    /// Three-dot diff of the current branch against `base`, optionally
    /// limited by git `pathspecs`.
    fn branch_diff(&self, base: &str, pathspecs: &[String]) -> Result<String, GitError>;

    /// Stage every pending change (`git add .`).
    fn stage_all(&self) -> Result<(), GitError>;

    fn commit(&self, message: &str) -> Result<(), GitError>;

    /// Push the current branch to its tracking remote.
    fn push(&self) -> Result<(), GitError>;
}

/// [`Vcs`] backed by the `git` binary, rooted at a working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    root: PathBuf,
}

impl SystemGit {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Run a git command in the working directory and return its stdout.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::Spawn {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for SystemGit {
    fn is_repository(&self) -> bool {
        self.run_git(&["status"], "status").is_ok()
    }

    fn current_branch(&self) -> Result<String, GitError> {
        let repo = Repository::discover(&self.root).map_err(GitError::OpenRepository)?;
        let head = repo.head().map_err(GitError::OpenRepository)?;

        if !head.is_branch() {
            return Err(GitError::NoCurrentBranch);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(GitError::NoCurrentBranch)
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        self.run_git(&["--no-pager", "diff", "--cached"], "diff")
    }

    fn branch_diff(&self, base: &str, pathspecs: &[String]) -> Result<String, GitError> {
        let range = format!("{}...", base);
        let mut args = vec!["--no-pager", "diff", range.as_str()];
        if !pathspecs.is_empty() {
            args.push("--");
            args.extend(pathspecs.iter().map(String::as_str));
        }
        self.run_git(&args, "diff")
    }

    fn stage_all(&self) -> Result<(), GitError> {
        self.run_git(&["add", "."], "add").map(|_| ())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message], "commit").map(|_| ())
    }

    fn push(&self) -> Result<(), GitError> {
        self.run_git(&["push"], "push").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_repo() -> (tempfile::TempDir, SystemGit) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@test.com").unwrap();
        let git = SystemGit::new(dir.path());
        (dir, git)
    }

    #[test]
    fn test_run_git_version_succeeds() {
        let git = SystemGit::new(std::env::temp_dir());
        assert!(git.run_git(&["--version"], "version check").is_ok());
    }

    #[test]
    fn test_run_git_invalid_command_fails() {
        let git = SystemGit::new(std::env::temp_dir());
        let result = git.run_git(&["not-a-real-command"], "invalid");
        assert!(matches!(result, Err(GitError::CommandFailed { .. })));
    }

    #[test]
    fn test_is_repository_false_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!SystemGit::new(dir.path()).is_repository());
    }

    #[test]
    fn test_stage_commit_and_staged_diff() {
        let (dir, git) = init_repo();
        assert!(git.is_repository());

        std::fs::write(dir.path().join("a.txt"), "first\n").unwrap();
        git.stage_all().unwrap();
        let diff = git.staged_diff().unwrap();
        assert!(diff.contains("+first"));

        git.commit("feat: add a").unwrap();
        assert!(git.staged_diff().unwrap().is_empty());
    }

    #[test]
    fn test_current_branch_after_first_commit() {
        let (dir, git) = init_repo();
        std::fs::write(dir.path().join("a.txt"), "x\n").unwrap();
        git.stage_all().unwrap();
        git.commit("init").unwrap();
        git.run_git(&["checkout", "-b", "fix/abc-42"], "checkout").unwrap();

        assert_eq!(git.current_branch().unwrap(), "fix/abc-42");
    }

    #[test]
    fn test_branch_diff_honors_exclude_pathspecs() {
        let (dir, git) = init_repo();
        std::fs::write(dir.path().join("keep.rs"), "fn a() {}\n").unwrap();
        std::fs::write(dir.path().join("drop.json"), "{}\n").unwrap();
        git.stage_all().unwrap();
        git.commit("init").unwrap();
        let base = git.current_branch().unwrap();

        git.run_git(&["checkout", "-b", "feat/krx-1"], "checkout").unwrap();
        std::fs::write(dir.path().join("keep.rs"), "fn b() {}\n").unwrap();
        std::fs::write(dir.path().join("drop.json"), "{\"a\": 1}\n").unwrap();
        git.stage_all().unwrap();
        git.commit("change both").unwrap();

        let full = git.branch_diff(&base, &[]).unwrap();
        assert!(full.contains("keep.rs"));
        assert!(full.contains("drop.json"));

        let pathspecs = [".".to_string(), ":(exclude,glob)**/*.json".to_string()];
        let filtered = git.branch_diff(&base, &pathspecs).unwrap();
        assert!(filtered.contains("keep.rs"));
        assert!(!filtered.contains("drop.json"));
    }
}
