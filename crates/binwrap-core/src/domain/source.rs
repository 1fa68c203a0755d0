//! Candidate download sources.

use serde::{Deserialize, Serialize};

/// One candidate download, optionally tagged with the OS and architecture it targets.
///
/// Tags are stored lower-cased. An empty tag matches any platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// URL the artifact is fetched from.
    pub url: String,
    /// OS family tag (e.g. `linux`, `darwin`, `win32`), empty for any.
    #[serde(default)]
    pub os: String,
    /// Architecture tag (`x64` or `x86`), empty for any.
    #[serde(default)]
    pub arch: String,
}

/// Which platform tags a source carries.
///
/// Every source falls in exactly one scope, which lets matching be an
/// exhaustive `match` instead of a chain of conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceScope<'a> {
    /// Neither OS nor architecture given.
    Universal,
    /// Only the OS is given.
    Os(&'a str),
    /// Only the architecture is given.
    Arch(&'a str),
    /// Both OS and architecture are given.
    OsArch(&'a str, &'a str),
}

impl Source {
    /// Create a source that matches every platform.
    pub fn new(url: impl Into<String>) -> Self {
        Self::for_platform(url, "", "")
    }

    /// Create a source restricted to an OS and/or architecture.
    ///
    /// Both tags are lower-cased; pass an empty string to leave one open.
    pub fn for_platform(url: impl Into<String>, os: &str, arch: &str) -> Self {
        Self {
            url: url.into(),
            os: os.trim().to_lowercase(),
            arch: arch.trim().to_lowercase(),
        }
    }

    /// Classify this source by the tags it carries.
    pub fn scope(&self) -> SourceScope<'_> {
        match (self.os.is_empty(), self.arch.is_empty()) {
            (true, true) => SourceScope::Universal,
            (false, true) => SourceScope::Os(self.os.as_str()),
            (true, false) => SourceScope::Arch(self.arch.as_str()),
            (false, false) => SourceScope::OsArch(self.os.as_str(), self.arch.as_str()),
        }
    }
}
