//! Path helpers for install locations.

use std::path::{Component, Path, PathBuf};

/// Strip trailing `/` and `\` from a destination directory.
///
/// A destination made only of separators is kept as a single separator so
/// the filesystem root survives.
pub fn strip_trailing_separators(destination: &str) -> String {
    let trimmed = destination.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !destination.is_empty() {
        destination[..1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Join `name` onto `dir` and resolve `.`/`..` lexically.
///
/// The filesystem is never consulted, so symlinks are not followed. A `..`
/// that would climb above a root is dropped; one that would climb above the
/// start of a relative path is kept.
pub fn normalize_join(dir: &Path, name: &str) -> PathBuf {
    let joined = dir.join(name);
    let mut out = PathBuf::new();

    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
