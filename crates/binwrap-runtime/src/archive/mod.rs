//! Archive adapter for the `ArchiveExtractor` port.
//!
//! Supported formats are picked from the file name:
//!
//! | Name ends with | Handling |
//! |---|---|
//! | `.zip` | every entry |
//! | `.tar` | every entry |
//! | `.tar.gz` | gzip, then every tar entry |
//! | `.tar.bz2` | bzip2, then every tar entry |
//! | `.gz`, `.bz2` | decompressed to the name without the extension |
//!
//! Anything else (`.rar`, `.phar`, ...) is reported as not handled. Entry
//! paths are kept as they are in the archive; absolute paths and `..`
//! components are refused.

mod single;
mod tarball;
mod zip_archive;

use binwrap_core::{ArchiveExtractor, ExtractionError};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Archive layouts this adapter can unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
    TarBz2,
    Gz,
    Bz2,
}

impl ArchiveKind {
    /// Detect the layout from a file name, case-insensitively.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        let kind = if name.ends_with(".tar.gz") {
            Self::TarGz
        } else if name.ends_with(".tar.bz2") {
            Self::TarBz2
        } else if name.ends_with(".tar") {
            Self::Tar
        } else if name.ends_with(".zip") {
            Self::Zip
        } else if name.ends_with(".gz") {
            Self::Gz
        } else if name.ends_with(".bz2") {
            Self::Bz2
        } else {
            return None;
        };
        Some(kind)
    }
}

/// Entry path relative to the destination, or `None` if it would escape it.
pub(crate) fn safe_relative(entry: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in entry.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!out.as_os_str().is_empty()).then_some(out)
}

/// Unpacks zip, tar (plain, gzip, bzip2) and single-file gzip/bzip2 downloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArchiveExtractor;

impl ArchiveExtractor for DefaultArchiveExtractor {
    fn extract(
        &self,
        archive: &Path,
        dest_dir: &Path,
    ) -> Result<Option<Vec<PathBuf>>, ExtractionError> {
        let Some(kind) = ArchiveKind::detect(archive) else {
            debug!(archive = %archive.display(), "No extractor for archive format");
            return Ok(None);
        };

        std::fs::create_dir_all(dest_dir).map_err(|e| ExtractionError::io(archive, e))?;

        debug!(archive = %archive.display(), ?kind, dest = %dest_dir.display(), "Extracting");
        let files = match kind {
            ArchiveKind::Zip => zip_archive::extract(archive, dest_dir)?,
            ArchiveKind::Tar => tarball::extract_tar(archive, dest_dir)?,
            ArchiveKind::TarGz => tarball::extract_tar_gz(archive, dest_dir)?,
            ArchiveKind::TarBz2 => tarball::extract_tar_bz2(archive, dest_dir)?,
            ArchiveKind::Gz => single::extract_gz(archive, dest_dir)?,
            ArchiveKind::Bz2 => single::extract_bz2(archive, dest_dir)?,
        };
        Ok(Some(files))
    }
}
