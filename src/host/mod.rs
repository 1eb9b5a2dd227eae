//! Remote commit host access
//!
//! Provides a unified interface over the remote operations the push flow
//! needs, so the same orchestration logic can run against the real GraphQL
//! client or a mock.

mod github;

pub use github::GitHubClient;

use crate::error::Result;
use crate::types::{
    CommitRequest, CreatedCommit, CreatedPullRequest, PullRequestRequest, RemoteRepository,
    RepositoryRef,
};
use async_trait::async_trait;

/// Remote operations used by the push flow
///
/// Each method is one round trip; there is no batching and no retry. Errors
/// are always fatal to the run.
#[async_trait]
pub trait CommitHost: Send + Sync {
    /// Resolve a repository to its id, default branch name, and default
    /// branch tip
    async fn resolve_repository(&self, repo: &RepositoryRef) -> Result<RemoteRepository>;

    /// Whether `refs/heads/<branch>` exists on the remote
    async fn branch_exists(&self, repo: &RepositoryRef, branch: &str) -> Result<bool>;

    /// Current tip object id of an existing remote branch
    async fn branch_tip(&self, repo: &RepositoryRef, branch: &str) -> Result<String>;

    /// Create `refs/heads/<branch>` pointing at `base_oid`
    async fn create_branch(&self, repository_id: &str, branch: &str, base_oid: &str)
    -> Result<()>;

    /// Create a signed commit on a branch, guarded by the expected head oid
    async fn create_commit(&self, request: &CommitRequest) -> Result<CreatedCommit>;

    /// Open a pull request into the default branch
    async fn open_pull_request(&self, request: &PullRequestRequest)
    -> Result<CreatedPullRequest>;
}
