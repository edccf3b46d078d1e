//! Error types for diffscribe modules using thiserror.

use thiserror::Error;

/// Errors from reading configuration out of the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API key not found. Set MISTRAL_API_KEY in your environment or in a .env file")]
    MissingApiKey,

    #[error("Invalid API endpoint '{0}'")]
    InvalidEndpoint(String),
}

/// Errors from git command execution.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {operation}: {source}")]
    Spawn {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Could not determine the current branch (detached HEAD?)")]
    NoCurrentBranch,
}

/// Errors from the chat-completion endpoint.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Error calling completion API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Completion API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Error extracting completion from response: {0}")]
    MalformedResponse(String),

    #[error("Completion API returned an empty message")]
    EmptyCompletion,
}

/// Errors from the final commit/push or pull request step.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Error during git operations: {0}")]
    Git(#[from] GitError),

    #[error("Failed to run gh: {0}")]
    GhSpawn(#[source] std::io::Error),

    #[error("Error creating pull request: gh exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    PullRequestFailed { code: Option<i32>, stderr: String },
}

/// Errors from reading the user's answer at the confirmation prompt.
#[derive(Error, Debug)]
pub enum ConfirmError {
    #[error("Failed to read confirmation input: {0}")]
    Input(#[source] dialoguer::Error),
}

/// Errors that end a commit or pull request workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("{0} is not a Git repository")]
    NotARepository(String),

    #[error(
        "GitHub CLI (gh) is not installed. Install it from https://cli.github.com and run 'gh auth login'"
    )]
    HostingCliMissing,

    #[error("Could not determine the current branch")]
    NoBranch,

    #[error("{0}")]
    NoChanges(&'static str),

    #[error("Failed to generate {artifact}: {source}")]
    Generation {
        artifact: &'static str,
        #[source]
        source: CompletionError,
    },

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Confirm(#[from] ConfirmError),
}
