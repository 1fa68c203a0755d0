//! Source selection for the running platform.

use crate::domain::{Fingerprint, Source, SourceScope};

/// Whether a single source applies to the given fingerprint.
pub fn source_matches(source: &Source, fingerprint: &Fingerprint) -> bool {
    match source.scope() {
        SourceScope::OsArch(os, arch) => {
            fingerprint.matches_os(os) && fingerprint.matches_arch(arch)
        }
        SourceScope::Os(os) => fingerprint.matches_os(os),
        SourceScope::Arch(arch) => fingerprint.matches_arch(arch),
        SourceScope::Universal => true,
    }
}

/// Filter `sources` down to the ones usable on `fingerprint`.
///
/// Order is preserved and every matching source is returned, not just the
/// first, so sidecar files listed next to the main binary are fetched too.
/// An empty result is not an error here.
pub fn select_sources<'a>(sources: &'a [Source], fingerprint: &Fingerprint) -> Vec<&'a Source> {
    sources
        .iter()
        .filter(|source| source_matches(source, fingerprint))
        .collect()
}
