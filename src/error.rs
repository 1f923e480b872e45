//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ScanError: issues locating or reading build.zig.zon files
//! - SourceError: issues recognizing or resolving a dependency URL

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest scanning related errors
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Dependency source related errors
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors related to locating and reading build.zig.zon files
#[derive(Error, Debug)]
pub enum ScanError {
    /// Root path is not a directory
    #[error("'{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// No build.zig.zon found at the root
    #[error("build.zig.zon not found in {path}")]
    ZonNotFound { path: PathBuf },

    /// Failed to read a file or directory
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to dependency source resolution
#[derive(Error, Debug)]
pub enum SourceError {
    /// No registered dependency kind recognizes the URL
    #[error("no known dependency source recognizes '{url}'")]
    UnrecognizedDependency { url: String },

    /// Upstream declined the request due to rate limiting
    #[error("API rate limit exceeded for {host}")]
    RateLimitExceeded { host: String },

    /// Network request failed
    #[error("failed to fetch '{dependency}': {message}")]
    NetworkError { dependency: String, message: String },

    /// Request timed out
    #[error("timeout while fetching '{dependency}'")]
    Timeout { dependency: String },

    /// Upstream returned an unexpected payload
    #[error("invalid response for '{dependency}': {message}")]
    InvalidResponse { dependency: String, message: String },

    /// Upstream kept redirecting past the enforced depth bound
    #[error("too many indirections (limit {limit}) while resolving '{dependency}'")]
    TooManyIndirections { dependency: String, limit: usize },

    /// A kind was asked to resolve a URL its recognizer rejects.
    /// Indicates a registry/recognizer contract violation, not a user error.
    #[error("URL '{url}' does not match the {kind} pattern")]
    PatternMismatch { kind: &'static str, url: String },
}

impl ScanError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::ReadError {
            path: path.into(),
            source,
        }
    }
}

impl SourceError {
    /// Creates a new UnrecognizedDependency error
    pub fn unrecognized(url: impl Into<String>) -> Self {
        SourceError::UnrecognizedDependency { url: url.into() }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(host: impl Into<String>) -> Self {
        SourceError::RateLimitExceeded { host: host.into() }
    }

    /// Creates a new NetworkError
    pub fn network_error(dependency: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::NetworkError {
            dependency: dependency.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(dependency: impl Into<String>) -> Self {
        SourceError::Timeout {
            dependency: dependency.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(dependency: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError::InvalidResponse {
            dependency: dependency.into(),
            message: message.into(),
        }
    }

    /// Creates a new PatternMismatch error
    pub fn pattern_mismatch(kind: &'static str, url: impl Into<String>) -> Self {
        SourceError::PatternMismatch {
            kind,
            url: url.into(),
        }
    }
}
