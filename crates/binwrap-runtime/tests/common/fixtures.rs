//! Archive and executable fixtures built in memory.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// Shell script printing `name version` and exiting with `exit_code`.
pub fn script(name: &str, version: &str, exit_code: i32) -> Vec<u8> {
    format!("#!/bin/sh\necho \"{name} {version}\"\nexit {exit_code}\n").into_bytes()
}

/// `.tar.gz` bytes holding `(name, contents)` entries.
pub fn tar_gz(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// `.zip` bytes holding `(name, contents)` entries.
pub fn zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
