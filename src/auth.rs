//! GitHub authentication
//!
//! Reads a bearer token from the environment. A missing token is not a
//! local error: the client is built unauthenticated and the API rejects the
//! first request with an authorization error instead.

use std::env;

/// Environment variables consulted for the API token, in priority order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Look up the GitHub API token from the environment
///
/// Checks `GITHUB_TOKEN` first, then `GH_TOKEN`. Empty values are treated
/// as unset.
pub fn github_token() -> Option<String> {
    token_from(|var| env::var(var).ok())
}

fn token_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|token| !token.is_empty())
}
