//! Error types for binary acquisition and verification.
//!
//! This module provides the single error type returned by every public
//! operation, keeping port-specific errors reachable through `#[from]`.

use std::path::PathBuf;
use thiserror::Error;

use crate::options::OptionsError;
use crate::ports::{DownloadError, ExtractionError};

/// Errors that can occur while ensuring a binary is installed and working.
#[derive(Debug, Error)]
pub enum BinWrapperError {
    // === Resolution ===
    /// No source matches the running OS/architecture.
    #[error("No binary found matching your system ({os}-{arch}). It's probably not supported.")]
    NoMatchingSource { os: String, arch: String },

    // === Acquisition ===
    /// Fetching a source failed.
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// Unpacking a downloaded archive failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// A filesystem operation on an installed file failed.
    #[error("Filesystem error on {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Verification ===
    /// The installed file is missing or lacks execute permission.
    #[error("{} is not executable", path.display())]
    NotExecutable { path: PathBuf },

    /// Invoking the installed file did not succeed.
    #[error("Probe of {} failed: {reason}", path.display())]
    ProbeFailed { path: PathBuf, reason: String },

    /// The installed version does not satisfy the constraint.
    #[error(
        "{} does not satisfy version constraint '{required}' (found {})",
        path.display(),
        found.as_deref().unwrap_or("no recognizable version")
    )]
    VersionMismatch {
        path: PathBuf,
        required: String,
        found: Option<String>,
    },

    /// The version constraint expression could not be parsed.
    #[error("Invalid version constraint '{constraint}': {reason}")]
    InvalidVersionConstraint { constraint: String, reason: String },

    // === Configuration ===
    /// Option values failed validation.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The handle was built without required fields.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl BinWrapperError {
    /// Create a `FileSystem` error for `path`.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a `ProbeFailed` error from any displayable cause.
    pub fn probe_failed(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for binwrap operations.
pub type BinWrapperResult<T> = Result<T, BinWrapperError>;
