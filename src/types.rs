//! Core types for github-signer

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A repository addressed as `owner/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A single file addition in the changeset
///
/// Serializes directly as the GraphQL `FileAddition` input object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAddition {
    /// Path relative to the repository root
    pub path: String,
    /// Base64-encoded file contents
    pub contents: String,
}

/// Remote repository state, fetched once per run and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    /// Opaque node id used by mutations
    pub id: String,
    /// Name of the repository's configured default branch
    pub default_branch: String,
    /// Current tip object id of the default branch
    pub head_oid: String,
}

/// The unit submitted to the commit host: one atomic commit
#[derive(Debug, Clone)]
pub struct CommitRequest {
    /// Target repository
    pub repository: RepositoryRef,
    /// Target branch name
    pub branch: String,
    /// One-line commit message (headline only, no body)
    pub message: String,
    /// File additions carried by the commit
    pub additions: Vec<FileAddition>,
    /// Object id the branch tip must still equal at commit time
    pub expected_head_oid: String,
}

/// Inputs for opening a pull request after the commit lands
#[derive(Debug, Clone)]
pub struct PullRequestRequest {
    /// Opaque repository node id
    pub repository_id: String,
    /// Base branch name (the repository's default branch)
    pub base: String,
    /// Head branch name (the branch the commit landed on)
    pub head: String,
    /// Pull request title (the commit message)
    pub title: String,
}

/// A commit created on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCommit {
    /// Web URL of the new commit
    pub url: String,
}

/// A pull request opened on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// Opaque pull request node id
    pub id: String,
    /// Pull request number
    pub number: u64,
    /// Web URL of the pull request
    pub url: String,
}
