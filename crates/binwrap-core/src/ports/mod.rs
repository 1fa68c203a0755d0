//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the install pipeline expects from
//! infrastructure. They contain no implementation details; concrete adapters
//! live in `binwrap-runtime`, and tests substitute in-memory doubles.
//!
//! # Design Rules
//!
//! - No HTTP, archive or process crate types in any signature
//! - Async only where the operation suspends (network, child processes)
//! - Errors are typed per port and folded into [`crate::BinWrapperError`]

pub mod archive;
pub mod download;
pub mod filesystem;
pub mod process;
pub mod version;

use std::sync::Arc;

pub use archive::{ARCHIVE_EXTENSIONS, ArchiveExtractor, ExtractionError, has_archive_extension};
pub use download::{DownloadError, Downloader};
pub use filesystem::{EXECUTABLE_MODE, FileSystem};
pub use process::{CommandOutput, CommandRunner};
#[cfg(test)]
pub use process::MockCommandRunner;
pub use version::{VersionError, VersionMatcher};

/// Container for all collaborator trait objects.
///
/// This struct provides one place to wire adapters into a
/// [`crate::BinaryHandle`] without coupling the core to concrete
/// implementations.
///
/// # Example
///
/// ```ignore
/// // In binwrap-runtime:
/// let collaborators = binwrap_runtime::default_collaborators(&options)?;
///
/// // In tests:
/// let collaborators = Collaborators::new(downloader, extractor, fs, runner, versions);
/// ```
#[derive(Clone)]
pub struct Collaborators {
    /// Fetches sources into sink files.
    pub downloader: Arc<dyn Downloader>,
    /// Unpacks downloaded archives.
    pub extractor: Arc<dyn ArchiveExtractor>,
    /// Existence checks, permission changes and deletion.
    pub fs: Arc<dyn FileSystem>,
    /// Runs installed executables.
    pub runner: Arc<dyn CommandRunner>,
    /// Reads and compares executable versions.
    pub versions: Arc<dyn VersionMatcher>,
}

impl Collaborators {
    /// Create a new Collaborators container.
    pub fn new(
        downloader: Arc<dyn Downloader>,
        extractor: Arc<dyn ArchiveExtractor>,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn CommandRunner>,
        versions: Arc<dyn VersionMatcher>,
    ) -> Self {
        Self {
            downloader,
            extractor,
            fs,
            runner,
            versions,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
