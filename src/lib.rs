//! Push signed commits to GitHub without holding a local signing key.
//!
//! Commit creation is delegated to GitHub's server-side GraphQL
//! `createCommitOnBranch` mutation, which signs the resulting commit with
//! GitHub's own key. This crate collects the local working tree's
//! uncommitted changes, resolves the revision the commit must be built on,
//! creates the target branch when it does not exist yet, and submits the
//! changes as one atomic commit guarded by an optimistic-concurrency check.

pub mod auth;
pub mod changes;
pub mod error;
pub mod host;
pub mod push;
pub mod types;
