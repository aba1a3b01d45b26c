//! Error types for the gitcredits core library.
//!
//! Each subsystem has its own error type derived with `thiserror`, and a
//! top-level [`CoreError`] enum unifies them all for callers that want a
//! single error type.
//!
//! Only [`ConfigError`] and [`CredentialError`] are fatal to a run. Every
//! GitHub API failure is handled at the call site in the engine and degraded
//! into a partial-but-valid result.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Unified error type for the entire core library.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Hooks(#[from] HooksError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Generic I/O error reading the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Credential errors
// ---------------------------------------------------------------------------

/// Errors reading the API token file.
///
/// These abort the run before any network call is made.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The token file does not exist at the configured path.
    #[error("could not find credential file at {0}")]
    FileNotFound(String),

    /// The token file exists but could not be read.
    #[error("error reading credential file at {path}: {detail}")]
    Unreadable {
        path: String,
        detail: String,
    },
}

// ---------------------------------------------------------------------------
// GitHub API errors
// ---------------------------------------------------------------------------

/// Errors from GitHub REST API interactions.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// HTTP-level transport error (network, TLS, etc.).
    #[error("GitHub HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("GitHub API error (HTTP {status}): {body}")]
    ApiError {
        status: u16,
        body: String,
    },

    /// JSON deserialization failure.
    #[error("GitHub response parse error: {0}")]
    ParseError(String),

    /// The response parsed as JSON but had the wrong shape, usually an
    /// API-level error object where a list or profile was expected.
    #[error("unexpected GitHub payload: {0}")]
    UnexpectedPayload(String),
}

// ---------------------------------------------------------------------------
// Hook installer errors
// ---------------------------------------------------------------------------

/// Errors from the git hook installer.
#[derive(Debug, Error)]
pub enum HooksError {
    /// The target directory is not a git repository.
    #[error("this directory is not a git repository: '{0}' does not exist")]
    NotARepository(String),

    /// The hooks source directory does not exist.
    #[error("hooks source directory not found: {0}")]
    SourceNotFound(String),

    /// Generic I/O error while copying hook files.
    #[error("hooks I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
