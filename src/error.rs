//! Error types for github-signer

use thiserror::Error;

/// Result type alias for github-signer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all github-signer operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed `owner/name` repository identifier
    #[error("invalid repository identifier `{0}`: expected owner/name")]
    InvalidRepository(String),

    /// A changed file could not be read from disk
    #[error("unable to read {path}")]
    FileRead {
        /// Path of the unreadable file, relative to the repository root
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Local repository access failed
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Transport-level failure (connection, timeout, non-2xx status)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The GraphQL response carried an `errors` payload
    #[error("GitHub API error: {0}")]
    Api(String),

    /// An error wrapped with the stage at which it occurred
    #[error("{context}: {message}")]
    Wrapped {
        /// Orchestration stage description
        context: String,
        /// Underlying failure, rendered
        message: String,
    },
}

impl Error {
    /// Wrap an error with the orchestration stage it occurred at
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        Error::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}
