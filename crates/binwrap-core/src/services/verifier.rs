//! Post-install sanity checks for an executable.

use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{BinWrapperError, BinWrapperResult};
use crate::ports::{Collaborators, CommandRunner, FileSystem, VersionError, VersionMatcher};

/// Arguments used when a probe is requested without any.
pub const DEFAULT_VERIFY_ARGS: &[&str] = &["--help"];

/// Arguments used to ask an executable for its version.
pub const VERSION_ARGS: &[&str] = &["--version"];

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

/// Checks that an installed file is executable, runs cleanly and, when
/// asked, reports a version inside a constraint.
pub struct ExecutableVerifier {
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn CommandRunner>,
    versions: Arc<dyn VersionMatcher>,
}

impl ExecutableVerifier {
    pub fn new(collaborators: &Collaborators) -> Self {
        Self {
            fs: Arc::clone(&collaborators.fs),
            runner: Arc::clone(&collaborators.runner),
            versions: Arc::clone(&collaborators.versions),
        }
    }

    /// Verify the executable at `path`.
    ///
    /// An empty `probe_args` falls back to [`DEFAULT_VERIFY_ARGS`]. The probe
    /// only looks at the exit code; the version check, when a constraint is
    /// given, runs a separate `--version` invocation.
    pub async fn verify(
        &self,
        path: &Path,
        probe_args: &[String],
        version_constraint: Option<&str>,
    ) -> BinWrapperResult<()> {
        if !self.fs.is_executable(path) {
            return Err(BinWrapperError::NotExecutable {
                path: path.to_path_buf(),
            });
        }

        let args = if probe_args.is_empty() {
            to_args(DEFAULT_VERIFY_ARGS)
        } else {
            probe_args.to_vec()
        };

        debug!(path = %path.display(), args = ?args, "Probing executable");
        match self.runner.status(path, &args).await {
            Ok(Some(0)) => {}
            Ok(Some(code)) => {
                return Err(BinWrapperError::probe_failed(
                    path,
                    format!("exited with code {code}"),
                ));
            }
            Ok(None) => {
                return Err(BinWrapperError::probe_failed(
                    path,
                    "terminated by a signal",
                ));
            }
            Err(e) => return Err(BinWrapperError::probe_failed(path, e)),
        }

        match version_constraint {
            Some(constraint) => self.check_version(path, constraint).await,
            None => Ok(()),
        }
    }

    async fn check_version(&self, path: &Path, constraint: &str) -> BinWrapperResult<()> {
        let output = self
            .runner
            .output(path, &to_args(VERSION_ARGS))
            .await
            .map_err(|e| BinWrapperError::probe_failed(path, e))?;

        let mismatch = |found: Option<String>| BinWrapperError::VersionMismatch {
            path: path.to_path_buf(),
            required: constraint.to_string(),
            found,
        };

        let Some(version) = self.versions.extract_version(output.text()) else {
            return Err(mismatch(None));
        };

        debug!(path = %path.display(), %version, %constraint, "Checking version constraint");
        match self.versions.satisfies(&version, constraint) {
            Ok(true) => Ok(()),
            Ok(false) | Err(VersionError::InvalidVersion { .. }) => Err(mismatch(Some(version))),
            Err(VersionError::InvalidConstraint { constraint, reason }) => {
                Err(BinWrapperError::InvalidVersionConstraint { constraint, reason })
            }
        }
    }
}

impl std::fmt::Debug for ExecutableVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableVerifier").finish_non_exhaustive()
    }
}
