//! Install and verification services.
//!
//! These orchestrate between ports and domain logic without knowing about
//! concrete adapters.

mod installer;
mod verifier;

pub use installer::{Installer, sink_name};
pub use verifier::{DEFAULT_VERIFY_ARGS, ExecutableVerifier, VERSION_ARGS};
