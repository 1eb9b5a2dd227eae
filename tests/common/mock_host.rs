//! Mock commit host for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use github_signer::error::{Error, Result};
use github_signer::host::CommitHost;
use github_signer::types::{
    CommitRequest, CreatedCommit, CreatedPullRequest, PullRequestRequest, RemoteRepository,
    RepositoryRef,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `create_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchCall {
    pub repository_id: String,
    pub branch: String,
    pub base_oid: String,
}

/// Call record for `create_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommitCall {
    pub repository: String,
    pub branch: String,
    pub message: String,
    pub paths: Vec<String>,
    pub expected_head_oid: String,
}

/// Call record for `open_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPullRequestCall {
    pub repository_id: String,
    pub base: String,
    pub head: String,
    pub title: String,
}

/// Simple mock commit host for testing
///
/// Features:
/// - Configurable remote repository state and per-branch tips
/// - Call tracking for verification
/// - Error injection for failure path testing
///
/// `create_branch` registers the new branch at its base oid, so a created
/// branch reads as existing afterwards, the way the real remote behaves.
pub struct MockCommitHost {
    remote: RemoteRepository,
    branch_tips: Mutex<HashMap<String, String>>,
    next_pr_number: AtomicU64,
    // Call tracking
    resolve_calls: Mutex<u32>,
    branch_exists_calls: Mutex<Vec<String>>,
    branch_tip_calls: Mutex<Vec<String>>,
    create_branch_calls: Mutex<Vec<CreateBranchCall>>,
    create_commit_calls: Mutex<Vec<CreateCommitCall>>,
    open_pull_request_calls: Mutex<Vec<OpenPullRequestCall>>,
    // Error injection
    error_on_resolve: Mutex<Option<String>>,
    error_on_branch_tip: Mutex<Option<String>>,
    error_on_create_branch: Mutex<Option<String>>,
    error_on_create_commit: Mutex<Option<String>>,
    error_on_open_pull_request: Mutex<Option<String>>,
}

impl MockCommitHost {
    /// Create a mock backed by the given remote repository state
    pub fn with_remote(remote: RemoteRepository) -> Self {
        Self {
            remote,
            branch_tips: Mutex::new(HashMap::new()),
            next_pr_number: AtomicU64::new(1),
            resolve_calls: Mutex::new(0),
            branch_exists_calls: Mutex::new(Vec::new()),
            branch_tip_calls: Mutex::new(Vec::new()),
            create_branch_calls: Mutex::new(Vec::new()),
            create_commit_calls: Mutex::new(Vec::new()),
            open_pull_request_calls: Mutex::new(Vec::new()),
            error_on_resolve: Mutex::new(None),
            error_on_branch_tip: Mutex::new(None),
            error_on_create_branch: Mutex::new(None),
            error_on_create_commit: Mutex::new(None),
            error_on_open_pull_request: Mutex::new(None),
        }
    }

    /// Register an existing remote branch at the given tip
    pub fn set_branch_tip(&self, branch: &str, oid: &str) {
        self.branch_tips
            .lock()
            .unwrap()
            .insert(branch.to_string(), oid.to_string());
    }

    // === Error injection methods ===

    /// Make `resolve_repository` return an error
    pub fn fail_resolve(&self, msg: &str) {
        *self.error_on_resolve.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `branch_tip` return an error
    pub fn fail_branch_tip(&self, msg: &str) {
        *self.error_on_branch_tip.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_branch` return an error
    pub fn fail_create_branch(&self, msg: &str) {
        *self.error_on_create_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_commit` return an error
    pub fn fail_create_commit(&self, msg: &str) {
        *self.error_on_create_commit.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `open_pull_request` return an error
    pub fn fail_open_pull_request(&self, msg: &str) {
        *self.error_on_open_pull_request.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Number of `resolve_repository` calls
    pub fn get_resolve_calls(&self) -> u32 {
        *self.resolve_calls.lock().unwrap()
    }

    /// Branches `branch_exists` was called with
    pub fn get_branch_exists_calls(&self) -> Vec<String> {
        self.branch_exists_calls.lock().unwrap().clone()
    }

    /// Branches `branch_tip` was called with
    pub fn get_branch_tip_calls(&self) -> Vec<String> {
        self.branch_tip_calls.lock().unwrap().clone()
    }

    /// All `create_branch` calls
    pub fn get_create_branch_calls(&self) -> Vec<CreateBranchCall> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// All `create_commit` calls
    pub fn get_create_commit_calls(&self) -> Vec<CreateCommitCall> {
        self.create_commit_calls.lock().unwrap().clone()
    }

    /// All `open_pull_request` calls
    pub fn get_open_pull_request_calls(&self) -> Vec<OpenPullRequestCall> {
        self.open_pull_request_calls.lock().unwrap().clone()
    }

    /// Assert that `create_branch` was called with specific branch and base
    pub fn assert_create_branch_called(&self, branch: &str, base_oid: &str) {
        let calls = self.get_create_branch_calls();
        assert!(
            calls
                .iter()
                .any(|c| c.branch == branch && c.base_oid == base_oid),
            "Expected create_branch({branch}, {base_oid}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl CommitHost for MockCommitHost {
    async fn resolve_repository(&self, _repo: &RepositoryRef) -> Result<RemoteRepository> {
        *self.resolve_calls.lock().unwrap() += 1;

        if let Some(msg) = self.error_on_resolve.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(self.remote.clone())
    }

    async fn branch_exists(&self, _repo: &RepositoryRef, branch: &str) -> Result<bool> {
        self.branch_exists_calls
            .lock()
            .unwrap()
            .push(branch.to_string());

        Ok(self.branch_tips.lock().unwrap().contains_key(branch))
    }

    async fn branch_tip(&self, _repo: &RepositoryRef, branch: &str) -> Result<String> {
        self.branch_tip_calls
            .lock()
            .unwrap()
            .push(branch.to_string());

        if let Some(msg) = self.error_on_branch_tip.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        self.branch_tips
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::Api(format!("branch {branch} not found on remote")))
    }

    async fn create_branch(
        &self,
        repository_id: &str,
        branch: &str,
        base_oid: &str,
    ) -> Result<()> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(CreateBranchCall {
                repository_id: repository_id.to_string(),
                branch: branch.to_string(),
                base_oid: base_oid.to_string(),
            });

        if let Some(msg) = self.error_on_create_branch.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        self.set_branch_tip(branch, base_oid);
        Ok(())
    }

    async fn create_commit(&self, request: &CommitRequest) -> Result<CreatedCommit> {
        self.create_commit_calls
            .lock()
            .unwrap()
            .push(CreateCommitCall {
                repository: request.repository.to_string(),
                branch: request.branch.clone(),
                message: request.message.clone(),
                paths: request.additions.iter().map(|a| a.path.clone()).collect(),
                expected_head_oid: request.expected_head_oid.clone(),
            });

        if let Some(msg) = self.error_on_create_commit.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(CreatedCommit {
            url: format!(
                "https://github.com/{}/commit/new",
                request.repository
            ),
        })
    }

    async fn open_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest> {
        self.open_pull_request_calls
            .lock()
            .unwrap()
            .push(OpenPullRequestCall {
                repository_id: request.repository_id.clone(),
                base: request.base.clone(),
                head: request.head.clone(),
                title: request.title.clone(),
            });

        if let Some(msg) = self.error_on_open_pull_request.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedPullRequest {
            id: format!("PR_{number}"),
            number,
            url: format!("https://github.com/test/repo/pull/{number}"),
        })
    }
}
