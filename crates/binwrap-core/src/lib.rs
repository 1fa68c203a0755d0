//! Core of binwrap: fetch, install and verify a platform-specific executable.
//!
//! A host tool describes the binary it depends on (candidate download URLs
//! tagged by OS/architecture, an install directory, an executable name and an
//! optional version range) and calls [`BinaryHandle::ensure`]. The first call
//! downloads every matching source, unpacks archives and marks the results
//! executable; every call then sanity-checks the executable.
//!
//! This crate holds the domain types, the orchestration services and the
//! [`ports`] they depend on. Concrete adapters (HTTP, archive formats,
//! processes, semver) live in `binwrap-runtime`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod handle;
pub mod options;
pub mod paths;
pub mod ports;
pub mod selector;
pub mod services;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use domain::{Arch, Fingerprint, Source, SourceScope, canonical_os};
pub use error::{BinWrapperError, BinWrapperResult};
pub use handle::{BinaryHandle, BinaryHandleBuilder, DEFAULT_PROBE_ARGS};
pub use options::{
    BinWrapperOptions, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENT_DOWNLOADS,
    DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, MAX_CONCURRENT_DOWNLOADS_LIMIT, OptionsError,
    TransportOptions, validate_options,
};
pub use ports::{
    ARCHIVE_EXTENSIONS, ArchiveExtractor, Collaborators, CommandOutput, CommandRunner,
    DownloadError, Downloader, EXECUTABLE_MODE, ExtractionError, FileSystem, VersionError,
    VersionMatcher, has_archive_extension,
};
pub use selector::{select_sources, source_matches};
pub use services::{DEFAULT_VERIFY_ARGS, ExecutableVerifier, Installer, VERSION_ARGS, sink_name};
