//! Local filesystem adapter.

use binwrap_core::FileSystem;
use std::io;
use std::path::Path;

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(mode);
        std::fs::set_permissions(path, perms)
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, _mode: u32) -> io::Result<()> {
        std::fs::metadata(path).map(|_| ())
    }

    /// Regular file the calling user may execute, per `access(2)`.
    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use nix::unistd::{AccessFlags, access};
        std::fs::metadata(path).is_ok_and(|meta| meta.is_file())
            && access(path, AccessFlags::X_OK).is_ok()
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
