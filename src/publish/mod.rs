//! Applying an accepted artifact: commit + push, or pull request creation.

pub mod git;
pub mod github;

pub use git::publish_commit;
pub use github::{GhCli, HostingCli};
