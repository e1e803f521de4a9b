//! Sequential image downloader.
//!
//! Pulls images from an [`Images`] sequence one at a time and saves each under
//! the post folder. A file that already exists is skipped without touching the
//! network; a failed image is reported and the run moves on.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::extract::ImageReference;
use crate::http::HttpClient;

/// Result of one image.
#[derive(Debug)]
pub enum Outcome {
    Downloaded { bytes: u64 },
    Skipped,
    Failed(FetchError),
}

/// Per-outcome counts of a download run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DownloadReport {
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Downloaded { .. } => self.downloaded += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Saves images into one directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    http: HttpClient,
    dir: PathBuf,
}

impl Downloader {
    /// `dir` must already exist.
    pub fn new(http: HttpClient, dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Downloads every image in order, calling `on_outcome` after each one.
    pub fn download_all<I, F>(&self, images: I, mut on_outcome: F) -> DownloadReport
    where
        I: IntoIterator<Item = ImageReference>,
        F: FnMut(&ImageReference, &Outcome),
    {
        let mut report = DownloadReport::default();
        for image in images {
            let outcome = self.download_one(&image);
            if let Outcome::Failed(e) = &outcome {
                tracing::warn!(file = %image.filename, "{}", e);
            }
            report.record(&outcome);
            on_outcome(&image, &outcome);
        }
        tracing::info!(
            dir = %self.dir.display(),
            downloaded = report.downloaded,
            skipped = report.skipped,
            failed = report.failed,
            "download run finished"
        );
        report
    }

    /// Downloads one image unless its file already exists.
    pub fn download_one(&self, image: &ImageReference) -> Outcome {
        let target = self.dir.join(&image.filename);
        if target.is_file() {
            tracing::debug!(path = %target.display(), "already present, skipping");
            return Outcome::Skipped;
        }
        match self.fetch_and_write(&image.normalized_url, &target) {
            Ok(Some(bytes)) => {
                tracing::debug!(url = %image.normalized_url, bytes, "saved image");
                Outcome::Downloaded { bytes }
            }
            Ok(None) => Outcome::Skipped,
            Err(e) => Outcome::Failed(e),
        }
    }

    /// `Ok(None)` when another writer created the file first.
    fn fetch_and_write(&self, url: &str, target: &Path) -> Result<Option<u64>, FetchError> {
        let response = self
            .http
            .get(url)
            .map_err(|e| FetchError::download(url, e))?;
        if !response.is_success() {
            return Err(FetchError::download(url, format!("HTTP {}", response.status)));
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(target) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(None),
            Err(e) => {
                return Err(FetchError::download(
                    url,
                    format!("create {}: {e}", target.display()),
                ))
            }
        };
        write_body(&mut file, &response.body, url, target).map(Some)
    }
}

/// Writes the whole body. A write that fails part-way leaves what was written
/// in place; the next run sees the file and skips it.
fn write_body(
    out: &mut impl Write,
    body: &[u8],
    url: &str,
    target: &Path,
) -> Result<u64, FetchError> {
    out.write_all(body)
        .and_then(|()| out.flush())
        .map_err(|e| FetchError::download(url, format!("write {}: {e}", target.display())))?;
    Ok(body.len() as u64)
}
