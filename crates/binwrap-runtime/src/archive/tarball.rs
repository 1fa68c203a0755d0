//! Tar archives, plain or wrapped in gzip/bzip2.

use binwrap_core::ExtractionError;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;

use super::safe_relative;

fn open(archive: &Path) -> Result<File, ExtractionError> {
    File::open(archive).map_err(|e| ExtractionError::io(archive, e))
}

pub fn extract_tar(archive: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    unpack(open(archive)?, archive, dest_dir)
}

pub fn extract_tar_gz(archive: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    unpack(GzDecoder::new(open(archive)?), archive, dest_dir)
}

pub fn extract_tar_bz2(archive: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    unpack(BzDecoder::new(open(archive)?), archive, dest_dir)
}

/// Unpack every entry of a tar stream, returning the regular files written.
fn unpack<R: Read>(
    reader: R,
    archive_path: &Path,
    dest_dir: &Path,
) -> Result<Vec<PathBuf>, ExtractionError> {
    std::fs::create_dir_all(dest_dir).map_err(|e| ExtractionError::io(archive_path, e))?;

    let mut archive = Archive::new(reader);
    let mut written = Vec::new();

    let entries = archive
        .entries()
        .map_err(|e| ExtractionError::corrupt(archive_path, e))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| ExtractionError::corrupt(archive_path, e))?;
        let entry_path = entry
            .path()
            .map_err(|e| ExtractionError::corrupt(archive_path, e))?
            .into_owned();

        let Some(relative) = safe_relative(&entry_path) else {
            // `./` on its own is a common first entry
            if entry.header().entry_type().is_dir() && entry_path.components().count() <= 1 {
                continue;
            }
            return Err(ExtractionError::UnsafeEntry {
                archive: archive_path.to_path_buf(),
                entry: entry_path.display().to_string(),
            });
        };

        let is_file = entry.header().entry_type().is_file();
        let unpacked = entry
            .unpack_in(dest_dir)
            .map_err(|e| ExtractionError::io(archive_path, e))?;
        if !unpacked {
            return Err(ExtractionError::UnsafeEntry {
                archive: archive_path.to_path_buf(),
                entry: entry_path.display().to_string(),
            });
        }

        if is_file {
            written.push(dest_dir.join(relative));
        }
    }

    Ok(written)
}
