//! Core domain types.

pub mod platform;
pub mod source;

pub use platform::{Arch, Fingerprint, canonical_os};
pub use source::{Source, SourceScope};
