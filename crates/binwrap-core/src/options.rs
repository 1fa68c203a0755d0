//! Options controlling acquisition and verification.
//!
//! These are plain serde types so a host tool can embed them in its own
//! configuration file. Every field has a default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default whole-request timeout for downloads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default connect timeout for downloads.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default number of sources fetched at the same time.
pub const DEFAULT_MAX_CONCURRENT_DOWNLOADS: usize = 4;

/// Upper bound accepted for `max_concurrent_downloads`.
pub const MAX_CONCURRENT_DOWNLOADS_LIMIT: usize = 32;

/// Default upper bound on a verification probe.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 60;

/// Settings handed to the HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransportOptions {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// `User-Agent` header, `None` for the built-in value.
    pub user_agent: Option<String>,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: None,
            headers: BTreeMap::new(),
        }
    }
}

impl TransportOptions {
    /// Whole-request timeout as a `Duration`.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a `Duration`.
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Add a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Options fixed at construction of a binary handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BinWrapperOptions {
    /// Skip the post-install verification entirely.
    pub skip_check: bool,
    /// HTTP transport settings.
    pub transport: TransportOptions,
    /// How many sources may be fetched at the same time (1-32).
    pub max_concurrent_downloads: usize,
    /// Upper bound on a single probe invocation, in seconds.
    pub probe_timeout_secs: u64,
}

impl Default for BinWrapperOptions {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BinWrapperOptions {
    /// Create options with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            skip_check: false,
            transport: TransportOptions::default(),
            max_concurrent_downloads: DEFAULT_MAX_CONCURRENT_DOWNLOADS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }

    /// Toggle verification.
    #[must_use]
    pub const fn with_skip_check(mut self, skip: bool) -> Self {
        self.skip_check = skip;
        self
    }

    /// Replace the transport settings.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Set the download concurrency.
    #[must_use]
    pub const fn with_max_concurrent_downloads(mut self, max: usize) -> Self {
        self.max_concurrent_downloads = max;
        self
    }

    /// Probe timeout as a `Duration`.
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Options validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },

    #[error("Max concurrent downloads must be between 1 and 32, got {0}")]
    InvalidConcurrency(usize),

    #[error("Header names cannot be empty")]
    EmptyHeaderName,
}

/// Validate option values.
pub fn validate_options(options: &BinWrapperOptions) -> Result<(), OptionsError> {
    if options.transport.timeout_secs == 0 {
        return Err(OptionsError::ZeroTimeout {
            name: "timeout_secs",
        });
    }

    if options.transport.connect_timeout_secs == 0 {
        return Err(OptionsError::ZeroTimeout {
            name: "connect_timeout_secs",
        });
    }

    if options.probe_timeout_secs == 0 {
        return Err(OptionsError::ZeroTimeout {
            name: "probe_timeout_secs",
        });
    }

    if !(1..=MAX_CONCURRENT_DOWNLOADS_LIMIT).contains(&options.max_concurrent_downloads) {
        return Err(OptionsError::InvalidConcurrency(
            options.max_concurrent_downloads,
        ));
    }

    if options
        .transport
        .headers
        .keys()
        .any(|name| name.trim().is_empty())
    {
        return Err(OptionsError::EmptyHeaderName);
    }

    Ok(())
}
