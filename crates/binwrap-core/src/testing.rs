//! In-memory collaborators for unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::{
    ArchiveExtractor, CommandRunner, Collaborators, DownloadError, Downloader, ExtractionError,
    FileSystem, VersionError, VersionMatcher,
};

/// Filesystem that tracks files and their permission bits in a map.
#[derive(Debug, Default)]
pub struct FakeFs {
    files: Mutex<HashMap<PathBuf, u32>>,
    dirs: Mutex<HashSet<PathBuf>>,
}

impl FakeFs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, path: impl Into<PathBuf>, mode: u32) {
        self.files.lock().unwrap().insert(path.into(), mode);
    }

    pub fn mode(&self, path: &Path) -> Option<u32> {
        self.files.lock().unwrap().get(path).copied()
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl FileSystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.has_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        match self.files.lock().unwrap().get_mut(path) {
            Some(current) => {
                *current = mode;
                Ok(())
            }
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.mode(path).is_some_and(|mode| mode & 0o111 != 0)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

/// Downloader that writes an empty `0o644` file and counts calls.
///
/// URLs registered with [`FakeDownloader::fail_with`] answer with that HTTP
/// status and write nothing.
#[derive(Debug)]
pub struct FakeDownloader {
    fs: Arc<FakeFs>,
    failures: Mutex<HashMap<String, u16>>,
    calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl FakeDownloader {
    pub fn new(fs: Arc<FakeFs>) -> Arc<Self> {
        Arc::new(Self {
            fs,
            failures: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
        })
    }

    pub fn fail_with(&self, url: &str, status: u16) {
        self.failures
            .lock()
            .unwrap()
            .insert(url.to_string(), status);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download(&self, url: &str, sink: &Path) -> Result<(), DownloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failure = self.failures.lock().unwrap().get(url).copied();
        if let Some(status) = failure {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        self.fetched.lock().unwrap().push(url.to_string());
        self.fs.insert(sink, 0o644);
        Ok(())
    }
}

/// Extractor that "unpacks" a fixed list of entry names per archive file name.
///
/// Archives without a registered listing are reported as not handled.
#[derive(Debug)]
pub struct FakeExtractor {
    fs: Arc<FakeFs>,
    listings: Mutex<HashMap<String, Vec<String>>>,
}

impl FakeExtractor {
    pub fn new(fs: Arc<FakeFs>) -> Arc<Self> {
        Arc::new(Self {
            fs,
            listings: Mutex::new(HashMap::new()),
        })
    }

    pub fn with_listing(&self, archive_name: &str, entries: &[&str]) {
        self.listings.lock().unwrap().insert(
            archive_name.to_string(),
            entries.iter().map(ToString::to_string).collect(),
        );
    }
}

impl ArchiveExtractor for FakeExtractor {
    fn extract(
        &self,
        archive: &Path,
        dest_dir: &Path,
    ) -> Result<Option<Vec<PathBuf>>, ExtractionError> {
        let name = archive
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let Some(entries) = self.listings.lock().unwrap().get(&name).cloned() else {
            return Ok(None);
        };
        let written = entries
            .iter()
            .map(|entry| {
                let path = dest_dir.join(entry);
                self.fs.insert(&path, 0o644);
                path
            })
            .collect();
        Ok(Some(written))
    }
}

/// Version matcher understanding `N.N[.N]` versions and `>=`/`=` constraints.
#[derive(Debug, Default)]
pub struct FakeVersions;

fn parse_numeric(version: &str) -> Option<Vec<u64>> {
    version
        .split('.')
        .map(|part| part.parse().ok())
        .collect()
}

impl VersionMatcher for FakeVersions {
    fn extract_version(&self, output: &str) -> Option<String> {
        output
            .split_whitespace()
            .find(|word| parse_numeric(word).is_some())
            .map(ToString::to_string)
    }

    fn satisfies(&self, version: &str, constraint: &str) -> Result<bool, VersionError> {
        let found = parse_numeric(version).ok_or_else(|| VersionError::InvalidVersion {
            version: version.to_string(),
            reason: "not numeric".to_string(),
        })?;
        let invalid = || VersionError::InvalidConstraint {
            constraint: constraint.to_string(),
            reason: "expected >= or =".to_string(),
        };
        if let Some(min) = constraint.strip_prefix(">=") {
            let min = parse_numeric(min.trim()).ok_or_else(invalid)?;
            Ok(found >= min)
        } else if let Some(exact) = constraint.strip_prefix('=') {
            let exact = parse_numeric(exact.trim()).ok_or_else(invalid)?;
            Ok(found == exact)
        } else {
            Err(invalid())
        }
    }
}

/// Wire fakes together, with `runner` supplied by the test.
pub struct Harness {
    pub fs: Arc<FakeFs>,
    pub downloader: Arc<FakeDownloader>,
    pub extractor: Arc<FakeExtractor>,
}

impl Harness {
    pub fn new() -> Self {
        let fs = FakeFs::new();
        Self {
            downloader: FakeDownloader::new(Arc::clone(&fs)),
            extractor: FakeExtractor::new(Arc::clone(&fs)),
            fs,
        }
    }

    pub fn collaborators(&self, runner: impl CommandRunner + 'static) -> Collaborators {
        Collaborators::new(
            self.downloader.clone(),
            self.extractor.clone(),
            self.fs.clone(),
            Arc::new(runner),
            Arc::new(FakeVersions),
        )
    }
}
