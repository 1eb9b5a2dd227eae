//! Push execution against a commit host

use crate::error::{Error, Result};
use crate::host::CommitHost;
use crate::types::{
    CommitRequest, CreatedCommit, CreatedPullRequest, FileAddition, PullRequestRequest,
    RemoteRepository, RepositoryRef,
};

/// One requested push: target and message
#[derive(Debug, Clone)]
pub struct PushRequest {
    /// Target repository
    pub repository: RepositoryRef,
    /// Target branch, created on demand when absent
    pub branch: String,
    /// One-line commit message, also used as the pull request title
    pub message: String,
    /// Open a pull request after the commit lands
    pub open_pull_request: bool,
}

/// Result of a completed push
#[derive(Debug, Clone)]
pub struct PushOutcome {
    /// The commit created on the remote
    pub commit: CreatedCommit,
    /// The pull request, when one was requested
    pub pull_request: Option<CreatedPullRequest>,
}

/// Execute a push: one atomic commit carrying `changes`, built on the
/// revision resolved for `request.branch`
///
/// Every remote round trip completes (or fails fatally) before the next
/// begins. There is no partial recovery: a branch created here is not
/// rolled back when the subsequent commit fails.
pub async fn execute_push(
    host: &dyn CommitHost,
    request: &PushRequest,
    changes: Vec<FileAddition>,
) -> Result<PushOutcome> {
    let remote = host
        .resolve_repository(&request.repository)
        .await
        .map_err(|e| Error::wrap(e, "unable to resolve repository"))?;

    let expected_head_oid = resolve_expected_head(host, request, &remote).await?;

    let commit = host
        .create_commit(&CommitRequest {
            repository: request.repository.clone(),
            branch: request.branch.clone(),
            message: request.message.clone(),
            additions: changes,
            expected_head_oid,
        })
        .await
        .map_err(|e| Error::wrap(e, "unable to commit"))?;

    let pull_request = if request.open_pull_request {
        let pr = host
            .open_pull_request(&PullRequestRequest {
                repository_id: remote.id.clone(),
                base: remote.default_branch.clone(),
                head: request.branch.clone(),
                title: request.message.clone(),
            })
            .await
            .map_err(|e| Error::wrap(e, "unable to create pull request"))?;
        Some(pr)
    } else {
        None
    };

    Ok(PushOutcome {
        commit,
        pull_request,
    })
}

/// Settle the object id the commit must be built on
///
/// When the target branch exists its current remote tip is the expected
/// head; a failed tip lookup aborts the run rather than falling back to a
/// possibly-stale reference. When the branch is absent it is created at the
/// default branch tip, which then serves as the expected head.
async fn resolve_expected_head(
    host: &dyn CommitHost,
    request: &PushRequest,
    remote: &RemoteRepository,
) -> Result<String> {
    let exists = host
        .branch_exists(&request.repository, &request.branch)
        .await
        .map_err(|e| Error::wrap(e, "unable to lookup branch"))?;

    if exists {
        host.branch_tip(&request.repository, &request.branch)
            .await
            .map_err(|e| {
                Error::wrap(e, format!("unable to resolve head for branch {}", request.branch))
            })
    } else {
        host.create_branch(&remote.id, &request.branch, &remote.head_oid)
            .await
            .map_err(|e| Error::wrap(e, "unable to create branch"))?;
        Ok(remote.head_oid.clone())
    }
}
