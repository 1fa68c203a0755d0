//! Zip archives.

use binwrap_core::ExtractionError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::safe_relative;

pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let file = File::open(archive_path).map_err(|e| ExtractionError::io(archive_path, e))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractionError::corrupt(archive_path, e))?;

    let mut written = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ExtractionError::corrupt(archive_path, e))?;

        let relative = entry
            .enclosed_name()
            .and_then(|name| safe_relative(&name))
            .ok_or_else(|| ExtractionError::UnsafeEntry {
                archive: archive_path.to_path_buf(),
                entry: entry.name().to_string(),
            })?;
        let output_path = dest_dir.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&output_path)
                .map_err(|e| ExtractionError::io(archive_path, e))?;
            continue;
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ExtractionError::io(archive_path, e))?;
        }
        let mut out =
            File::create(&output_path).map_err(|e| ExtractionError::io(archive_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| ExtractionError::io(archive_path, e))?;

        written.push(output_path);
    }

    Ok(written)
}
