//! Download port definition.
//!
//! The installer only needs one capability from the network layer: stream the
//! body of a URL into a local file, failing on anything but a success status.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while fetching a source.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The URL could not be parsed or has no file name to download into.
    #[error("Invalid download URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("Download of {url} failed: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("Download of {url} timed out")]
    Timeout { url: String },

    /// Connection or protocol level failure.
    #[error("Download of {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Writing the downloaded body to disk failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Create a `Transport` error from any displayable cause.
    pub fn transport(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Create an `Io` error for the given sink path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Port for fetching a remote artifact into a local file.
///
/// Implementations must not leave a file at `sink` when they return an error.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Stream the body of `url` into `sink`, replacing any existing file.
    async fn download(&self, url: &str, sink: &Path) -> Result<(), DownloadError>;
}
