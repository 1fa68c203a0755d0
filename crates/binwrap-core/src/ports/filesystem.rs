//! Filesystem port definition.

use std::io;
use std::path::Path;

/// Permission bits applied to every installed file.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Port for the handful of filesystem operations the installer and verifier need.
pub trait FileSystem: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Apply `mode` permission bits to `path` (no-op where unsupported).
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Whether `path` is a regular file the current user may execute.
    fn is_executable(&self, path: &Path) -> bool;

    /// Delete the file at `path`.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}
