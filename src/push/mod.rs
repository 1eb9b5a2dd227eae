//! Push orchestration
//!
//! Sequences the remote calls that turn collected working-tree changes into
//! one signed commit: resolve the repository, settle the branch target,
//! submit the commit, optionally open a pull request.

mod execute;

pub use execute::{PushOutcome, PushRequest, execute_push};
