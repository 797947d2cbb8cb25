//! # Error Handling
//!
//! This module defines the centralized error type for `entity-catalog`. It
//! uses the `thiserror` library to build a single `Error` enum covering every
//! failure the resolver and its remote ports can report, with descriptive
//! messages and, where useful, a hint on how to fix the problem.
//!
//! ## Failure Kinds
//!
//! The variants fall into a few groups that callers are expected to tell
//! apart:
//!
//! - **Unresolvable reference**: `RepositoryNotFound`. Only raised when a
//!   caller asked about one specific repository. Bulk listing treats an
//!   unresolvable remote as "nothing found" instead.
//! - **Missing specification**: `EntityNotFound`. The repository exists but
//!   holds no spec file for the requested entity.
//! - **Malformed content**: `ConfigParse` and `SpecParse`. Fatal, the whole
//!   operation is aborted and no partial result is returned.
//! - **Port failures**: `GitCommand` and `GitClone`, plus wrapped I/O errors.
//! - **Rejected input**: `InvalidRepository`, for identifiers that `git`
//!   would read as an option.
//!   These are passed through untouched; the resolver never retries them.
//!
//! The `Result` type alias is used throughout the crate to return
//! `Result<T, Error>`.

use thiserror::Error;

/// Main error type for entity-catalog operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed into a set of remotes.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A specification file could not be parsed into an entity body.
    #[error("Specification parsing error in {path}: {message}")]
    SpecParse { path: String, message: String },

    /// A repository that was explicitly requested does not exist.
    #[error("Repository not found: {name}")]
    RepositoryNotFound { name: String },

    /// The repository has no specification file for the requested entity.
    #[error("Entity '{entity}' has no specification file in {repository}")]
    EntityNotFound { entity: String, repository: String },

    /// An error occurred while creating or refreshing a local mirror.
    ///
    /// Includes the repository URL, error message, and an optional hint for
    /// resolution.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// An error occurred while executing a Git command.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A repository identifier that cannot be handed to `git` safely.
    #[error("Invalid repository identifier '{name}': {reason}")]
    InvalidRepository { name: String, reason: String },

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// An error indicating that a mutex or other lock has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },
}

impl Error {
    /// Returns true for malformed configuration or specification content.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Error::ConfigParse { .. } | Error::SpecParse { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
