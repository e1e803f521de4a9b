//! Error kinds surfaced by a fetch run.
//!
//! `UnsupportedUrl`, `Fetch` and `Io` end the run. `Download` is per image:
//! the downloader reports it and moves on to the next image.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No classifier pattern matched the input.
    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),

    /// The post page could not be retrieved.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A single image could not be downloaded or written.
    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    /// The output folder could not be prepared.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        FetchError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn download(url: &str, reason: impl ToString) -> Self {
        FetchError::Download {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors that end the whole run rather than a single image.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FetchError::Download { .. })
    }
}
