//! Single compressed files (`tool.gz`, `tool.bz2`).

use binwrap_core::ExtractionError;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub fn extract_gz(archive: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let file = File::open(archive).map_err(|e| ExtractionError::io(archive, e))?;
    decompress(GzDecoder::new(file), archive, dest_dir)
}

pub fn extract_bz2(archive: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let file = File::open(archive).map_err(|e| ExtractionError::io(archive, e))?;
    decompress(BzDecoder::new(file), archive, dest_dir)
}

fn decompress<R: Read>(
    mut reader: R,
    archive: &Path,
    dest_dir: &Path,
) -> Result<Vec<PathBuf>, ExtractionError> {
    let stem = archive
        .file_stem()
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ExtractionError::corrupt(archive, "no file name left after extension"))?;
    let output_path = dest_dir.join(stem);
    let partial = dest_dir.join(format!(".{}.partial", stem.to_string_lossy()));

    let result = File::create(&partial).and_then(|mut out| io::copy(&mut reader, &mut out));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&partial);
        return Err(if e.kind() == io::ErrorKind::InvalidInput
            || e.kind() == io::ErrorKind::InvalidData
        {
            ExtractionError::corrupt(archive, e)
        } else {
            ExtractionError::io(archive, e)
        });
    }

    std::fs::rename(&partial, &output_path).map_err(|e| ExtractionError::io(archive, e))?;
    Ok(vec![output_path])
}
