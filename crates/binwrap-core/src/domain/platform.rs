//! Platform fingerprinting.
//!
//! A [`Fingerprint`] is the normalized view of the running system used to
//! match download sources: a lower-cased OS family name and a coarse
//! architecture bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture bucket used for source matching.
///
/// Only word size is distinguished: anything whose architecture name
/// contains `64` is [`Arch::X64`], everything else is [`Arch::X86`].
/// ARM and x86 of the same width share a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X64,
    X86,
}

impl Arch {
    /// Bucket an architecture name such as `x86_64`, `aarch64` or `i686`.
    pub fn from_machine(machine: &str) -> Self {
        if machine.contains("64") {
            Self::X64
        } else {
            Self::X86
        }
    }

    /// Tag string compared against [`crate::Source::arch`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::X86 => "x86",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized OS family and architecture of a system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Canonical lower-cased OS family name.
    pub os: String,
    /// Architecture bucket.
    pub arch: Arch,
}

impl Fingerprint {
    /// Build a fingerprint from raw OS and architecture names.
    pub fn new(os: &str, machine: &str) -> Self {
        Self {
            os: canonical_os(os),
            arch: Arch::from_machine(machine),
        }
    }

    /// Fingerprint of the system this process is running on.
    pub fn detect() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Whether a source OS tag refers to this fingerprint's OS family.
    pub fn matches_os(&self, tag: &str) -> bool {
        canonical_os(tag) == self.os
    }

    /// Whether a source architecture tag refers to this fingerprint's bucket.
    pub fn matches_arch(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(self.arch.as_str())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Fold the common spellings of an OS family onto one name.
///
/// Rust reports `macos`/`windows` while download pages usually say
/// `darwin`/`win32`; both spellings are accepted in source tags.
pub fn canonical_os(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    match lower.as_str() {
        "darwin" | "macos" | "osx" | "mac" => "darwin".to_string(),
        "win32" | "windows" | "winnt" | "windows nt" | "win" => "win32".to_string(),
        _ => lower,
    }
}
