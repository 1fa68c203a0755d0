//! Default adapters for binwrap.
//!
//! `binwrap-core` defines what a download, an archive, a filesystem, a process
//! and a version matcher must do; this crate provides the implementations a
//! host tool normally wants and wires them into a ready builder:
//!
//! ```no_run
//! use binwrap_core::BinWrapperOptions;
//! use binwrap_runtime::BinWrapper;
//!
//! # async fn run() -> binwrap_core::BinWrapperResult<()> {
//! let gifsicle = BinWrapper::new(BinWrapperOptions::default())?
//!     .source_for("https://example.com/linux/x64/gifsicle", "linux", "x64")
//!     .source_for("https://example.com/macos/gifsicle", "darwin", "")
//!     .source_for("https://example.com/win/x64/gifsicle.exe", "win32", "x64")
//!     .destination("vendor")
//!     .executable_name("gifsicle")
//!     .version_constraint(">=1.71")
//!     .build()?;
//!
//! let path = gifsicle.ensure().await?;
//! # let _ = path;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod archive;
pub mod fs;
pub mod http;
pub mod process;
pub mod version;

use binwrap_core::{
    BinWrapperOptions, BinWrapperResult, BinaryHandleBuilder, Collaborators, validate_options,
};
use std::sync::Arc;

pub use archive::{ArchiveKind, DefaultArchiveExtractor};
pub use fs::LocalFileSystem;
pub use http::{DEFAULT_USER_AGENT, HttpDownloader};
pub use process::TokioCommandRunner;
pub use version::SemverMatcher;

// Used only by the integration tests under tests/
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio_test as _;
#[cfg(test)]
use tracing_subscriber as _;

/// Build the default adapters for `options`.
pub fn default_collaborators(options: &BinWrapperOptions) -> BinWrapperResult<Collaborators> {
    Ok(Collaborators::new(
        Arc::new(HttpDownloader::new(&options.transport)?),
        Arc::new(DefaultArchiveExtractor),
        Arc::new(LocalFileSystem),
        Arc::new(TokioCommandRunner::new(options.probe_timeout())),
        Arc::new(SemverMatcher),
    ))
}

/// Entry point producing [`BinaryHandleBuilder`]s.
#[derive(Debug, Clone, Copy)]
pub struct BinWrapper;

impl BinWrapper {
    /// Builder wired to the default adapters.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(options: BinWrapperOptions) -> BinWrapperResult<BinaryHandleBuilder> {
        validate_options(&options)?;
        let collaborators = default_collaborators(&options)?;
        Ok(BinaryHandleBuilder::new(options, collaborators))
    }

    /// Builder using caller-supplied adapters.
    pub fn with_collaborators(
        options: BinWrapperOptions,
        collaborators: Collaborators,
    ) -> BinaryHandleBuilder {
        BinaryHandleBuilder::new(options, collaborators)
    }
}
