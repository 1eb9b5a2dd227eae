//! Working-tree change collection
//!
//! Scans the local working tree and converts qualifying paths into the
//! base64-encoded file additions submitted with the remote commit.

use crate::error::{Error, Result};
use crate::types::FileAddition;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use git2::{Repository, Status, StatusOptions};
use std::fs;
use std::path::Path;

/// Collect the uncommitted changes eligible for a remote commit
///
/// A path qualifies if it is modified in the worktree, or added or modified
/// in the index. Untracked, deleted, and renamed paths are skipped. Paths
/// are sorted so the resulting changeset is deterministic across runs.
///
/// An empty result is a normal outcome, handled by the caller; an
/// unreadable qualifying file is a fatal error.
pub fn collect(workdir: &Path) -> Result<Vec<FileAddition>> {
    let repo = Repository::open(workdir)?;

    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false);

    let statuses = repo.statuses(Some(&mut options))?;

    let mut paths: Vec<String> = statuses
        .iter()
        .filter(|entry| qualifies(entry.status()))
        .filter_map(|entry| entry.path().map(ToString::to_string))
        .collect();
    paths.sort();

    let mut additions = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::info!("adding {path}");
        let bytes = fs::read(workdir.join(&path)).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;
        additions.push(FileAddition {
            path,
            contents: BASE64.encode(&bytes),
        });
    }

    Ok(additions)
}

/// Worktree-modified, index-added, or index-modified
fn qualifies(status: Status) -> bool {
    status.contains(Status::WT_MODIFIED)
        || status.contains(Status::INDEX_NEW)
        || status.contains(Status::INDEX_MODIFIED)
}
