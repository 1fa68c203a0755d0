//! Version constraint port definition.

use thiserror::Error;

/// Errors raised by a version matcher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The constraint expression could not be parsed.
    #[error("Invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    /// The version string could not be parsed.
    #[error("Invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },
}

/// Port for reading and comparing executable versions.
pub trait VersionMatcher: Send + Sync {
    /// Pull the version number out of an executable's `--version` output.
    fn extract_version(&self, output: &str) -> Option<String>;

    /// Whether `version` satisfies the range expression `constraint`.
    fn satisfies(&self, version: &str, constraint: &str) -> Result<bool, VersionError>;
}
