//! The configured binary and its `ensure` entry point.
//!
//! A [`BinaryHandle`] ties together the candidate sources, the install
//! location and the optional version constraint for one executable. Calling
//! [`BinaryHandle::ensure`] installs it on first use and verifies it on every
//! call:
//!
//! ```text
//! path exists? ── yes ──────────────────────────────┐
//!      │ no                                          ▼
//!      └─ select sources ─ none → NoMatchingSource   verify (unless skip_check)
//!              │ some                                ▲
//!              └─ install ───────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::{Fingerprint, Source};
use crate::error::{BinWrapperError, BinWrapperResult};
use crate::options::{BinWrapperOptions, validate_options};
use crate::paths::{normalize_join, strip_trailing_separators};
use crate::ports::Collaborators;
use crate::selector::select_sources;
use crate::services::{ExecutableVerifier, Installer};

/// Probe arguments used by [`BinaryHandle::ensure`].
pub const DEFAULT_PROBE_ARGS: &[&str] = &["--version"];

/// Chained configuration for a [`BinaryHandle`].
#[derive(Debug)]
pub struct BinaryHandleBuilder {
    options: BinWrapperOptions,
    collaborators: Collaborators,
    sources: Vec<Source>,
    destination: Option<PathBuf>,
    executable_name: Option<String>,
    version_constraint: Option<String>,
    fingerprint: Option<Fingerprint>,
}

impl BinaryHandleBuilder {
    pub fn new(options: BinWrapperOptions, collaborators: Collaborators) -> Self {
        Self {
            options,
            collaborators,
            sources: Vec::new(),
            destination: None,
            executable_name: None,
            version_constraint: None,
            fingerprint: None,
        }
    }

    /// Add a source usable on every platform.
    #[must_use]
    pub fn source(mut self, url: impl Into<String>) -> Self {
        self.sources.push(Source::new(url));
        self
    }

    /// Add a source restricted to an OS and/or architecture (empty for any).
    #[must_use]
    pub fn source_for(mut self, url: impl Into<String>, os: &str, arch: &str) -> Self {
        self.sources.push(Source::for_platform(url, os, arch));
        self
    }

    /// Directory the executable is installed into.
    #[must_use]
    pub fn destination(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let dir = dir
            .to_str()
            .map_or_else(|| dir.to_path_buf(), |s| PathBuf::from(strip_trailing_separators(s)));
        self.destination = Some(dir);
        self
    }

    /// File name of the executable inside the destination.
    #[must_use]
    pub fn executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Semantic-version range the installed executable must report.
    #[must_use]
    pub fn version_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.version_constraint = Some(constraint.into());
        self
    }

    /// Resolve sources for this platform instead of the running one.
    #[must_use]
    pub fn platform(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Validate the configuration and produce an immutable handle.
    pub fn build(self) -> BinWrapperResult<BinaryHandle> {
        validate_options(&self.options)?;

        let destination = self
            .destination
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| {
                BinWrapperError::InvalidConfiguration("destination is required".to_string())
            })?;

        let executable_name = self
            .executable_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                BinWrapperError::InvalidConfiguration("executable name is required".to_string())
            })?;

        let version_constraint = self
            .version_constraint
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let installer = Installer::new(&self.collaborators, self.options.max_concurrent_downloads);
        let verifier = ExecutableVerifier::new(&self.collaborators);

        Ok(BinaryHandle {
            sources: self.sources,
            destination,
            executable_name,
            version_constraint,
            fingerprint: self.fingerprint,
            options: self.options,
            collaborators: self.collaborators,
            installer,
            verifier,
        })
    }
}

/// A native executable that is installed on demand.
#[derive(Debug)]
pub struct BinaryHandle {
    sources: Vec<Source>,
    destination: PathBuf,
    executable_name: String,
    version_constraint: Option<String>,
    fingerprint: Option<Fingerprint>,
    options: BinWrapperOptions,
    collaborators: Collaborators,
    installer: Installer,
    verifier: ExecutableVerifier,
}

impl BinaryHandle {
    /// Canonical install path: the destination joined with the executable name.
    pub fn path(&self) -> PathBuf {
        normalize_join(&self.destination, &self.executable_name)
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    pub fn version_constraint(&self) -> Option<&str> {
        self.version_constraint.as_deref()
    }

    pub const fn options(&self) -> &BinWrapperOptions {
        &self.options
    }

    /// Install if needed, then verify with [`DEFAULT_PROBE_ARGS`].
    pub async fn ensure(&self) -> BinWrapperResult<PathBuf> {
        self.ensure_with_args(&[]).await
    }

    /// Install if needed, then verify with `probe_args`.
    ///
    /// Empty `probe_args` fall back to [`DEFAULT_PROBE_ARGS`]. Returns the
    /// install path.
    pub async fn ensure_with_args(&self, probe_args: &[String]) -> BinWrapperResult<PathBuf> {
        let path = self.path();

        if self.collaborators.fs.exists(&path) {
            debug!(path = %path.display(), "Binary already present, skipping download");
        } else {
            self.install().await?;
        }

        if self.options.skip_check {
            debug!(path = %path.display(), "Verification skipped");
            return Ok(path);
        }

        let args: Vec<String> = if probe_args.is_empty() {
            DEFAULT_PROBE_ARGS.iter().map(ToString::to_string).collect()
        } else {
            probe_args.to_vec()
        };

        self.verifier
            .verify(&path, &args, self.version_constraint.as_deref())
            .await?;

        debug!(path = %path.display(), "Binary verified");
        Ok(path)
    }

    async fn install(&self) -> BinWrapperResult<()> {
        let fingerprint = self.fingerprint.clone().unwrap_or_else(Fingerprint::detect);
        let selected = select_sources(&self.sources, &fingerprint);

        debug!(
            platform = %fingerprint,
            candidates = self.sources.len(),
            selected = selected.len(),
            "Resolved sources"
        );

        if selected.is_empty() {
            return Err(BinWrapperError::NoMatchingSource {
                os: fingerprint.os,
                arch: fingerprint.arch.to_string(),
            });
        }

        info!(
            name = %self.executable_name,
            dest = %self.destination.display(),
            sources = selected.len(),
            "Installing binary"
        );
        self.installer.install(&selected, &self.destination).await
    }
}
