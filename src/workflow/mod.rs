//! End-to-end flows tying collection, generation, confirmation, and publish.
//!
//! Both flows are generic over the git runner, the hosting CLI, the
//! completion backend, and the prompter, so they run unchanged against fakes.

pub mod commit;
pub mod pr;

pub use commit::CommitOptions;
pub use pr::PrOptions;

/// How a workflow ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The artifact was published; carries the commit message or PR title.
    Published(String),
    /// The user declined at the confirmation prompt.
    Aborted,
}
