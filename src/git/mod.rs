//! Git operations: branch metadata, diff collection, and the command runner.

pub mod branch;
pub mod diff;
pub mod runner;

pub use branch::BranchInfo;
pub use diff::{DEFAULT_EXCLUDED_SUFFIXES, collect_branch_diff, collect_staged_diff};
pub use runner::{SystemGit, Vcs};
