//! Download, permission fix-up and archive unpacking for selected sources.

use futures_util::{TryStreamExt, stream};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::Source;
use crate::error::{BinWrapperError, BinWrapperResult};
use crate::ports::{
    ArchiveExtractor, Collaborators, DownloadError, Downloader, EXECUTABLE_MODE, ExtractionError,
    FileSystem, has_archive_extension,
};

/// Local file name a URL is downloaded into.
///
/// This is the last path segment, percent-decoded, with query and fragment
/// ignored.
pub fn sink_name(url: &str) -> Result<String, DownloadError> {
    let invalid = |reason: &str| DownloadError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| invalid("URL has no file name"))?;

    let decoded = urlencoding::decode(segment).map_err(|e| invalid(&e.to_string()))?;
    if decoded.is_empty() || decoded == "." || decoded == ".." || decoded.contains(['/', '\\']) {
        return Err(invalid("URL file name is not usable"));
    }
    Ok(decoded.into_owned())
}

/// Sources keyed by sink name, both in first-seen order.
fn group_by_sink<'a>(
    sources: &[&'a Source],
) -> Result<Vec<(String, Vec<&'a Source>)>, DownloadError> {
    let mut groups: Vec<(String, Vec<&'a Source>)> = Vec::new();
    for &source in sources {
        let name = sink_name(&source.url)?;
        match groups.iter_mut().find(|(sink, _)| *sink == name) {
            Some((_, group)) => group.push(source),
            None => groups.push((name, vec![source])),
        }
    }
    Ok(groups)
}

/// Acquires selected sources into a destination directory.
///
/// Every source is downloaded, made executable, and unpacked when its name
/// carries an archive extension. Sources writing to the same sink run one
/// after another in the order given, so the last one wins; distinct sinks
/// are processed concurrently up to `max_concurrent`.
///
/// The first failure cancels the rest and earlier writes are left in place.
/// A cancelled download removes its partial file, but an extraction already
/// running on the blocking pool finishes in the background and its files are
/// not made executable.
pub struct Installer {
    downloader: Arc<dyn Downloader>,
    extractor: Arc<dyn ArchiveExtractor>,
    fs: Arc<dyn FileSystem>,
    max_concurrent: usize,
}

impl Installer {
    /// Create an installer from the shared collaborators.
    pub fn new(collaborators: &Collaborators, max_concurrent: usize) -> Self {
        Self {
            downloader: Arc::clone(&collaborators.downloader),
            extractor: Arc::clone(&collaborators.extractor),
            fs: Arc::clone(&collaborators.fs),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Install every source into `destination`.
    pub async fn install(&self, sources: &[&Source], destination: &Path) -> BinWrapperResult<()> {
        if !self.fs.exists(destination) {
            debug!(dir = %destination.display(), "Creating destination directory");
            self.fs
                .create_dir_all(destination)
                .map_err(|e| BinWrapperError::file_system(destination, e))?;
        }

        let groups = group_by_sink(sources)?;
        if groups.len() < sources.len() {
            debug!(
                sources = sources.len(),
                sinks = groups.len(),
                "Sources share sinks, downloading those in order"
            );
        }

        stream::iter(groups.into_iter().map(Ok::<_, BinWrapperError>))
            .try_for_each_concurrent(self.max_concurrent, |(name, group)| async move {
                let sink = destination.join(name);
                for source in group {
                    self.acquire(source, &sink, destination).await?;
                }
                Ok::<_, BinWrapperError>(())
            })
            .await
    }

    async fn acquire(
        &self,
        source: &Source,
        sink: &Path,
        destination: &Path,
    ) -> BinWrapperResult<()> {
        info!(url = %source.url, sink = %sink.display(), "Downloading binary");
        self.downloader.download(&source.url, sink).await?;

        self.fs
            .set_mode(sink, EXECUTABLE_MODE)
            .map_err(|e| BinWrapperError::file_system(sink, e))?;

        if !has_archive_extension(sink) {
            debug!(path = %sink.display(), "Download is not an archive, keeping as-is");
            return Ok(());
        }

        let Some(files) = self.extract(sink, destination).await? else {
            warn!(
                archive = %sink.display(),
                "Archive format is not supported, keeping the download as-is"
            );
            return Ok(());
        };

        self.fs
            .remove_file(sink)
            .map_err(|e| BinWrapperError::file_system(sink, e))?;

        for file in &files {
            self.fs
                .set_mode(file, EXECUTABLE_MODE)
                .map_err(|e| BinWrapperError::file_system(file, e))?;
        }

        info!(
            archive = %sink.display(),
            files = files.len(),
            "Extracted archive"
        );
        Ok(())
    }

    async fn extract(
        &self,
        archive: &Path,
        destination: &Path,
    ) -> Result<Option<Vec<PathBuf>>, ExtractionError> {
        let extractor = Arc::clone(&self.extractor);
        let archive = archive.to_path_buf();
        let destination = destination.to_path_buf();

        tokio::task::spawn_blocking(move || extractor.extract(&archive, &destination))
            .await
            .map_err(|e| ExtractionError::Task(format!("spawn_blocking join error: {e}")))?
    }
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("max_concurrent", &self.max_concurrent)
            .finish_non_exhaustive()
    }
}
