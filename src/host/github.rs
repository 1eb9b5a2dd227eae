//! GitHub commit host over the GraphQL v4 API
//!
//! All operations go through a single endpoint. Commits created through
//! `createCommitOnBranch` are signed server-side with GitHub's key; the
//! mutation rejects the write when the branch tip no longer equals the
//! supplied `expectedHeadOid`.

use crate::error::{Error, Result};
use crate::host::CommitHost;
use crate::types::{
    CommitRequest, CreatedCommit, CreatedPullRequest, PullRequestRequest, RemoteRepository,
    RepositoryRef,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Public GitHub GraphQL endpoint
const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Environment variable overriding the endpoint for enterprise installs
const ENDPOINT_VAR: &str = "GITHUB_GRAPHQL_URL";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const RESOLVE_REPOSITORY: &str = "\
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    defaultBranchRef { name target { oid } }
  }
}";

const LOOKUP_REF: &str = "\
query($owner: String!, $name: String!, $qualifiedName: String!) {
  repository(owner: $owner, name: $name) {
    ref(qualifiedName: $qualifiedName) { name target { oid } }
  }
}";

const CREATE_REF: &str = "\
mutation($input: CreateRefInput!) {
  createRef(input: $input) { ref { name } }
}";

const CREATE_COMMIT_ON_BRANCH: &str = "\
mutation($input: CreateCommitOnBranchInput!) {
  createCommitOnBranch(input: $input) { commit { url } }
}";

const CREATE_PULL_REQUEST: &str = "\
mutation($input: CreatePullRequestInput!) {
  createPullRequest(input: $input) { pullRequest { id number url } }
}";

/// GitHub service speaking GraphQL over reqwest
pub struct GitHubClient {
    http: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct RepositoryData {
    repository: Option<RepositoryNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    id: String,
    default_branch_ref: Option<RefNode>,
}

#[derive(Deserialize)]
struct RefData {
    repository: Option<RefRepositoryNode>,
}

#[derive(Deserialize)]
struct RefRepositoryNode {
    #[serde(rename = "ref")]
    git_ref: Option<RefNode>,
}

#[derive(Deserialize)]
struct RefNode {
    name: String,
    target: Option<Target>,
}

#[derive(Deserialize)]
struct Target {
    oid: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitData {
    create_commit_on_branch: CommitPayload,
}

#[derive(Deserialize)]
struct CommitPayload {
    commit: CommitNode,
}

#[derive(Deserialize)]
struct CommitNode {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestData {
    create_pull_request: PullRequestPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestPayload {
    pull_request: PullRequestNode,
}

#[derive(Deserialize)]
struct PullRequestNode {
    id: String,
    number: u64,
    url: String,
}

impl GitHubClient {
    /// Create a client for the public endpoint, or the endpoint named by
    /// `GITHUB_GRAPHQL_URL` when set
    pub fn new(token: Option<String>) -> Result<Self> {
        let endpoint =
            std::env::var(ENDPOINT_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::with_endpoint(token, endpoint)
    }

    /// Create a client against a specific GraphQL endpoint
    pub fn with_endpoint(token: Option<String>, endpoint: String) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("github-signer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// Execute one GraphQL round trip and deserialize its `data` payload
    ///
    /// GitHub reports query/mutation failures as HTTP 200 with an `errors`
    /// array; those surface as [`Error::Api`] with the messages joined.
    async fn graphql<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response: GraphqlResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(errors) = response.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(Error::Api(message));
            }
        }

        let data = response
            .data
            .ok_or_else(|| Error::Api("response carried no data".to_string()))?;
        serde_json::from_value(data)
            .map_err(|e| Error::Api(format!("unexpected response shape: {e}")))
    }

    async fn lookup_ref(&self, repo: &RepositoryRef, branch: &str) -> Result<Option<RefNode>> {
        let data: RefData = self
            .graphql(
                LOOKUP_REF,
                json!({
                    "owner": repo.owner,
                    "name": repo.name,
                    "qualifiedName": format!("refs/heads/{branch}"),
                }),
            )
            .await?;

        Ok(data
            .repository
            .ok_or_else(|| Error::Api(format!("repository {repo} not found")))?
            .git_ref)
    }
}

#[async_trait]
impl CommitHost for GitHubClient {
    async fn resolve_repository(&self, repo: &RepositoryRef) -> Result<RemoteRepository> {
        let data: RepositoryData = self
            .graphql(
                RESOLVE_REPOSITORY,
                json!({ "owner": repo.owner, "name": repo.name }),
            )
            .await?;

        let node = data
            .repository
            .ok_or_else(|| Error::Api(format!("repository {repo} not found")))?;
        let head = node
            .default_branch_ref
            .ok_or_else(|| Error::Api(format!("repository {repo} has no default branch")))?;
        let oid = head
            .target
            .ok_or_else(|| Error::Api(format!("default branch {} has no target", head.name)))?
            .oid;

        Ok(RemoteRepository {
            id: node.id,
            default_branch: head.name,
            head_oid: oid,
        })
    }

    async fn branch_exists(&self, repo: &RepositoryRef, branch: &str) -> Result<bool> {
        match self.lookup_ref(repo, branch).await? {
            Some(found) if !found.name.is_empty() => {
                tracing::info!("branch found: {}", found.name);
                Ok(true)
            }
            _ => {
                tracing::info!("branch {branch} not found on remote");
                Ok(false)
            }
        }
    }

    async fn branch_tip(&self, repo: &RepositoryRef, branch: &str) -> Result<String> {
        self.lookup_ref(repo, branch)
            .await?
            .and_then(|r| r.target)
            .map(|t| t.oid)
            .ok_or_else(|| Error::Api(format!("branch {branch} not found on remote")))
    }

    async fn create_branch(
        &self,
        repository_id: &str,
        branch: &str,
        base_oid: &str,
    ) -> Result<()> {
        let _: serde_json::Value = self
            .graphql(
                CREATE_REF,
                json!({
                    "input": {
                        "repositoryId": repository_id,
                        "name": format!("refs/heads/{branch}"),
                        "oid": base_oid,
                    }
                }),
            )
            .await?;
        tracing::info!("created branch {branch}");
        Ok(())
    }

    async fn create_commit(&self, request: &CommitRequest) -> Result<CreatedCommit> {
        let data: CommitData = self
            .graphql(
                CREATE_COMMIT_ON_BRANCH,
                json!({
                    "input": {
                        "branch": {
                            "repositoryNameWithOwner": request.repository.to_string(),
                            "branchName": request.branch,
                        },
                        "message": { "headline": request.message },
                        "fileChanges": { "additions": request.additions },
                        "expectedHeadOid": request.expected_head_oid,
                    }
                }),
            )
            .await?;

        let commit = CreatedCommit {
            url: data.create_commit_on_branch.commit.url,
        };
        tracing::info!("created commit {}", commit.url);
        Ok(commit)
    }

    async fn open_pull_request(
        &self,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest> {
        let data: PullRequestData = self
            .graphql(
                CREATE_PULL_REQUEST,
                json!({
                    "input": {
                        "repositoryId": request.repository_id,
                        "baseRefName": request.base,
                        "headRefName": request.head,
                        "title": request.title,
                    }
                }),
            )
            .await?;

        let node = data.create_pull_request.pull_request;
        tracing::info!("opened pull request #{}", node.number);
        Ok(CreatedPullRequest {
            id: node.id,
            number: node.number,
            url: node.url,
        })
    }
}
