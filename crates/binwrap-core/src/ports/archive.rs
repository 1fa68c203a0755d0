//! Archive extraction port definition.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions that mark a download as an archive to unpack.
///
/// Only the last extension is inspected, so `foo.tar.gz` counts through `gz`.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["rar", "zip", "phar", "tar", "gz", "bz2"];

/// Whether the last extension of `path` is one of [`ARCHIVE_EXTENSIONS`] (case-insensitive).
pub fn has_archive_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Errors raised while unpacking an archive.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The archive could not be read or decoded.
    #[error("Failed to extract {}: {message}", archive.display())]
    Corrupt { archive: PathBuf, message: String },

    /// An entry would be written outside the destination directory.
    #[error("Refusing to extract {entry} from {}: path escapes the destination", archive.display())]
    UnsafeEntry { archive: PathBuf, entry: String },

    /// Creating or writing an extracted file failed.
    #[error("I/O error while extracting {}: {source}", archive.display())]
    Io {
        archive: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl ExtractionError {
    /// Create a `Corrupt` error from any displayable cause.
    pub fn corrupt(archive: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Corrupt {
            archive: archive.into(),
            message: err.to_string(),
        }
    }

    /// Create an `Io` error for the given archive.
    pub fn io(archive: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            archive: archive.into(),
            source,
        }
    }
}

/// Port for unpacking downloaded archives.
///
/// Extraction is CPU and disk bound; callers run it on the blocking pool.
pub trait ArchiveExtractor: Send + Sync {
    /// Unpack `archive` into `dest_dir`.
    ///
    /// Returns `Ok(None)` when the archive format is not handled by this
    /// extractor (the file is left untouched), otherwise the paths of every
    /// regular file written.
    fn extract(&self, archive: &Path, dest_dir: &Path)
    -> Result<Option<Vec<PathBuf>>, ExtractionError>;
}
