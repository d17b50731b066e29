//! Artifact download with progress tracking
//!
//! The response body is streamed into `<destination>.part` and renamed to the
//! destination only after every byte announced by `Content-Length` has been
//! written. The part file is removed on every failure path, including when
//! the download future is dropped mid-transfer.
//!
//! # Example
//!
//! ```no_run
//! use apkwatch_update::Downloader;
//! use std::path::Path;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> apkwatch_update::Result<()> {
//!     let downloader = Downloader::new(reqwest::Client::new(), Duration::from_secs(30))
//!         .with_progress(true);
//!     let result = downloader
//!         .download("https://cdn.example.com/x.apk", Path::new("dl/arcaea_5.0.3.apk"))
//!         .await?;
//!
//!     println!("Downloaded {} bytes to {:?}", result.file_size, result.file_path);
//!     Ok(())
//! }
//! ```

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::CONTENT_LENGTH;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{Result, UpdateError};
use crate::progress::{
    human_readable_size, BarReporter, DownloadProgress, NoOpReporter, ProgressReporter,
};
use crate::PART_SUFFIX;

/// Result of a download operation
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// Path to the downloaded file
    pub file_path: PathBuf,

    /// Size of the downloaded file in bytes
    pub file_size: u64,
}

/// Streams artifacts to disk
pub struct Downloader {
    /// HTTP client
    client: reqwest::Client,

    /// Deadline for receiving response headers
    timeout: Duration,

    /// Progress sink
    reporter: Arc<dyn ProgressReporter>,
}

impl Downloader {
    /// Create a downloader with progress output disabled
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            reporter: Arc::new(NoOpReporter),
        }
    }

    /// Enable or disable the terminal progress bar
    pub fn with_progress(self, show: bool) -> Self {
        if show {
            self.with_reporter(Arc::new(BarReporter::new()))
        } else {
            self.with_reporter(Arc::new(NoOpReporter))
        }
    }

    /// Use a custom progress reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Download `url` into `dest`
    ///
    /// The timeout bounds the wait for response headers only; a slow body is
    /// never failed for elapsed time alone.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<DownloadResult> {
        debug!("Requesting artifact from {}", url);

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| UpdateError::timeout(url, self.timeout))?
            .map_err(|e| UpdateError::from_reqwest(url, e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdateError::network(
                url,
                format!("Download failed with status: {}", status),
            ));
        }

        let total_size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|ct| ct.to_str().ok())
            .and_then(|ct| ct.parse::<u64>().ok());

        match total_size {
            Some(size) => info!("Downloading {} ({})", url, human_readable_size(size)),
            None => info!("Downloading {} (unknown size)", url),
        }

        self.save_stream(url, response.bytes_stream(), total_size, dest)
            .await
    }

    /// Write a stream of body chunks to `dest`
    ///
    /// `total_size` is the announced body length; a stream that ends short of
    /// it is a network failure.
    pub async fn save_stream<S, E>(
        &self,
        url: &str,
        stream: S,
        total_size: Option<u64>,
        dest: &Path,
    ) -> Result<DownloadResult>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: Display,
    {
        let mut part = PartFile::create(dest)?;
        let label = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dest.display().to_string());

        let mut progress = DownloadProgress::new(total_size);
        self.reporter.on_start(&label, total_size);

        if let Err(e) = copy_chunks(url, stream, &mut part, &mut progress, &*self.reporter).await
        {
            self.reporter.on_abort(&progress);
            return Err(e);
        }

        self.reporter.on_finish(&progress);
        let file_path = part.commit()?;

        debug!(
            "Saved {} ({}, {:.0} B/s)",
            file_path.display(),
            human_readable_size(progress.downloaded_bytes),
            progress.speed_bps()
        );

        Ok(DownloadResult {
            file_path,
            file_size: progress.downloaded_bytes,
        })
    }
}

/// Drain the chunk stream into the part file
async fn copy_chunks<S, E>(
    url: &str,
    stream: S,
    part: &mut PartFile,
    progress: &mut DownloadProgress,
    reporter: &dyn ProgressReporter,
) -> Result<()>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            UpdateError::network(url, format!("Failed to read download chunk: {}", e))
        })?;
        part.write_all(&chunk)?;

        progress.advance(chunk.len() as u64);
        reporter.on_progress(progress);
    }

    if let Some(total) = progress.total_bytes {
        if progress.downloaded_bytes != total {
            return Err(UpdateError::network(
                url,
                format!(
                    "Incomplete body: received {} of {} bytes",
                    progress.downloaded_bytes, total
                ),
            ));
        }
    }

    part.flush()
}

/// Path of the in-progress file for a destination
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    dest.with_file_name(name)
}

/// In-progress download file, removed on drop unless committed
struct PartFile {
    file: Option<File>,
    part_path: PathBuf,
    dest: PathBuf,
    committed: bool,
}

impl PartFile {
    fn create(dest: &Path) -> Result<Self> {
        let part_path = part_path(dest);
        let file = File::create(&part_path).map_err(|e| UpdateError::filesystem(&part_path, e))?;

        Ok(Self {
            file: Some(file),
            part_path,
            dest: dest.to_path_buf(),
            committed: false,
        })
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        match self.file.as_mut() {
            Some(file) => file
                .write_all(buf)
                .map_err(|e| UpdateError::filesystem(&self.part_path, e)),
            None => Err(UpdateError::filesystem(
                &self.part_path,
                std::io::Error::other("part file already closed"),
            )),
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()
                .and_then(|_| file.sync_all())
                .map_err(|e| UpdateError::filesystem(&self.part_path, e))?;
        }
        Ok(())
    }

    /// Close the file and move it to its final name
    fn commit(mut self) -> Result<PathBuf> {
        drop(self.file.take());
        fs::rename(&self.part_path, &self.dest)
            .map_err(|e| UpdateError::filesystem(&self.dest, e))?;
        self.committed = true;
        Ok(self.dest.clone())
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        drop(self.file.take());

        match fs::remove_file(&self.part_path) {
            Ok(()) => debug!("Removed partial download {}", self.part_path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove partial download {}: {}",
                self.part_path.display(),
                e
            ),
        }
    }
}
