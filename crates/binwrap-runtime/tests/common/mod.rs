//! Common test utilities.
//!
//! This module provides a local HTTP server for fixtures, archive and script
//! builders, and tracing setup.

#![allow(dead_code)]

pub mod fixtures;
pub mod server;

use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness once per binary.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("binwrap_core=debug,binwrap_runtime=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
