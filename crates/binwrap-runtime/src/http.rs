//! HTTP adapter for the `Downloader` port.

use async_trait::async_trait;
use binwrap_core::{BinWrapperError, BinWrapperResult, DownloadError, Downloader, TransportOptions};
use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// `User-Agent` sent when the options leave it unset.
pub const DEFAULT_USER_AGENT: &str = concat!("binwrap/", env!("CARGO_PKG_VERSION"));

/// Temporary file a download is streamed into before it is renamed to `sink`.
pub fn part_path(sink: &Path) -> PathBuf {
    let mut name = sink
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".part");
    sink.with_file_name(name)
}

/// Removes the partial file when dropped unless the download completed.
///
/// This also covers a download future dropped mid-stream, which never reaches
/// the error path.
struct PartFile {
    path: PathBuf,
    keep: bool,
}

impl PartFile {
    const fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    const fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if !self.keep && std::fs::remove_file(&self.path).is_ok() {
            debug!(part = %self.path.display(), "Removed partial download");
        }
    }
}

fn classify(url: &str, err: &reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        DownloadError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_builder() {
        DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else {
        DownloadError::transport(url, err)
    }
}

/// Streams response bodies to disk with `reqwest`.
///
/// The body is written to `<sink>.part` and renamed on success, so a failed
/// or cancelled request never leaves anything at `sink` or `<sink>.part`.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Build a client applying timeouts, user agent and extra headers.
    pub fn new(options: &TransportOptions) -> BinWrapperResult<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| {
                BinWrapperError::InvalidConfiguration(format!("invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                BinWrapperError::InvalidConfiguration(format!("invalid value for header {name}: {e}"))
            })?;
            headers.insert(name, value);
        }

        let user_agent = options
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = Client::builder()
            .timeout(options.timeout())
            .connect_timeout(options.connect_timeout())
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                BinWrapperError::InvalidConfiguration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn write_body(
        response: reqwest::Response,
        url: &str,
        part: &Path,
    ) -> Result<u64, DownloadError> {
        let mut file = tokio::fs::File::create(part)
            .await
            .map_err(|e| DownloadError::io(part, e))?;

        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| classify(url, &e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(part, e))?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(|e| DownloadError::io(part, e))?;
        Ok(written)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, sink: &Path) -> Result<(), DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, &e))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Download response");
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut part = PartFile::new(part_path(sink));
        let bytes = Self::write_body(response, url, &part.path).await?;
        tokio::fs::rename(&part.path, sink)
            .await
            .map_err(|e| DownloadError::io(sink, e))?;
        part.keep();

        debug!(url, sink = %sink.display(), bytes, "Download complete");
        Ok(())
    }
}
