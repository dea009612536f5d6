//! Download engine boundary
//!
//! The picker hands a URL and a target directory to a [`Downloader`] and
//! waits for one result. The transfer runs on its own thread; the event loop
//! polls a [`DownloadHandle`] each frame, so the UI thread never blocks on the
//! network. Progress reporting, retries and ranged transfers are left to the
//! engine.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Name used when the URL has no usable final segment
pub const FALLBACK_FILE_NAME: &str = "download";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    /// Directory the file is written into
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub url: String,
    /// The file that was written
    pub file: PathBuf,
    /// The directory it was written into
    pub dir: PathBuf,
    pub bytes_written: u64,
}

#[derive(Debug)]
pub enum DownloadError {
    /// No URL was entered
    EmptyUrl,
    /// The target path is missing or not a directory
    NotADirectory(PathBuf),
    /// The server or the connection failed
    Http(String),
    /// Writing the file failed
    Io(io::Error),
    /// The worker thread went away without reporting
    Disconnected,
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::EmptyUrl => write!(f, "no URL to download"),
            DownloadError::NotADirectory(path) => {
                write!(f, "{} is not a directory", path.display())
            }
            DownloadError::Http(msg) => write!(f, "request failed: {}", msg),
            DownloadError::Io(e) => write!(f, "write failed: {}", e),
            DownloadError::Disconnected => write!(f, "download worker stopped unexpectedly"),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DownloadError {
    fn from(err: io::Error) -> Self {
        DownloadError::Io(err)
    }
}

pub type DownloadResult = Result<DownloadOutcome, DownloadError>;

/// Something that can fetch a URL into a directory
pub trait Downloader: Send + Sync {
    fn download(&self, request: &DownloadRequest) -> DownloadResult;
}

/// Reject requests that cannot succeed before any network traffic
pub fn validate(request: &DownloadRequest) -> Result<(), DownloadError> {
    if request.url.trim().is_empty() {
        return Err(DownloadError::EmptyUrl);
    }
    if !request.dir.is_dir() {
        return Err(DownloadError::NotADirectory(request.dir.clone()));
    }
    Ok(())
}

/// Final path segment of `url`, without query or fragment.
///
/// Falls back to [`FALLBACK_FILE_NAME`] when the URL names no file or the
/// segment could escape the target directory.
pub fn file_name_from_url(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let without_query = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment);
    let after_scheme = match without_query.find("://") {
        Some(idx) => &without_query[idx + 3..],
        None => without_query,
    };

    // The first segment is the host
    let Some((_, path)) = after_scheme.split_once('/') else {
        return FALLBACK_FILE_NAME.to_string();
    };
    let name = path.rsplit('/').next().unwrap_or("");

    if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// HTTP(S) downloader over a blocking `ureq` agent
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        Self { agent }
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, request: &DownloadRequest) -> DownloadResult {
        validate(request)?;

        let url = request.url.trim();
        let file = request.dir.join(file_name_from_url(url));
        tracing::info!("Downloading {} to {:?}", url, file);

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| DownloadError::Http(e.to_string()))?;

        let bytes_written = match write_body(response.into_reader(), &file) {
            Ok(n) => n,
            Err(e) => {
                // Leave nothing half-written behind
                let _ = std::fs::remove_file(&file);
                return Err(e.into());
            }
        };

        tracing::info!("Downloaded {} bytes to {:?}", bytes_written, file);
        Ok(DownloadOutcome {
            url: url.to_string(),
            file,
            dir: request.dir.clone(),
            bytes_written,
        })
    }
}

fn write_body(mut body: impl io::Read, path: &Path) -> io::Result<u64> {
    let mut out = File::create(path)?;
    let written = io::copy(&mut body, &mut out)?;
    out.sync_all()?;
    Ok(written)
}

/// A download running on a worker thread
#[derive(Debug)]
pub struct DownloadHandle {
    request: DownloadRequest,
    receiver: mpsc::Receiver<DownloadResult>,
}

impl DownloadHandle {
    pub fn request(&self) -> &DownloadRequest {
        &self.request
    }

    /// The result if the worker has finished, without blocking
    pub fn try_recv(&self) -> Option<DownloadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(DownloadError::Disconnected)),
        }
    }

    /// Block until the worker reports (for headless use and tests)
    pub fn wait(self) -> DownloadResult {
        self.receiver
            .recv()
            .unwrap_or(Err(DownloadError::Disconnected))
    }
}

/// Validate `request` and start it on a worker thread
pub fn spawn(
    downloader: Arc<dyn Downloader>,
    request: DownloadRequest,
) -> Result<DownloadHandle, DownloadError> {
    validate(&request)?;

    let (sender, receiver) = mpsc::channel();
    let worker_request = request.clone();
    thread::Builder::new()
        .name("paraload-download".to_string())
        .spawn(move || {
            let result = downloader.download(&worker_request);
            if let Err(e) = &result {
                tracing::warn!("Download of {} failed: {}", worker_request.url, e);
            }
            // The receiver may be gone if the picker quit first
            let _ = sender.send(result);
        })?;

    Ok(DownloadHandle { request, receiver })
}
