//! Push command for the `github-signer` binary

use anyhow::{Context, Result};
use github_signer::auth;
use github_signer::changes;
use github_signer::host::GitHubClient;
use github_signer::push::{PushRequest, execute_push};
use github_signer::types::RepositoryRef;
use std::path::Path;

/// Run the push flow for the current working directory
///
/// Returns successfully without any remote interaction when the working
/// tree holds no qualifying changes: the changeset is settled before a
/// client is even built.
pub async fn run_push(
    repository: &str,
    branch: &str,
    message: &str,
    open_pull_request: bool,
) -> Result<()> {
    let repository: RepositoryRef = repository.parse()?;

    let changes = changes::collect(Path::new("."))?;
    if changes.is_empty() {
        println!("no changes to commit");
        return Ok(());
    }

    let token = auth::github_token();
    if token.is_none() {
        tracing::warn!("no GitHub token found; requests will be unauthenticated");
    }
    let host = GitHubClient::new(token).context("unable to build GitHub client")?;

    let request = PushRequest {
        repository,
        branch: branch.to_string(),
        message: message.to_string(),
        open_pull_request,
    };

    let outcome = execute_push(&host, &request, changes).await?;

    println!("✓ Created commit {}", outcome.commit.url);
    if let Some(pr) = outcome.pull_request {
        println!("✓ Opened pull request #{} {}", pr.number, pr.url);
    }

    Ok(())
}
