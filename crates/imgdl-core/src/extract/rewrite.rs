//! Thumbnail to full-resolution URL rewrites.

/// Naver serves resized copies from this host; the original lives on `NAVER_ORIGINAL_HOST`.
const NAVER_THUMBNAIL_HOST: &str = "postfiles.pstatic.net";
const NAVER_ORIGINAL_HOST: &str = "blogfiles.naver.net";

/// Per-site rule turning a scraped URL into the URL of the original image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Drop the `?type=wNNN` size marker and move to the original-file host.
    NaverFullSize,
    /// Drop the query string (size and crop parameters).
    StripQuery,
    /// The scraped URL already points at the original (or is signed).
    Identity,
}

impl Rewrite {
    pub fn apply(self, url: &str) -> String {
        match self {
            Rewrite::NaverFullSize => {
                strip_query(url).replacen(NAVER_THUMBNAIL_HOST, NAVER_ORIGINAL_HOST, 1)
            }
            Rewrite::StripQuery => strip_query(url).to_string(),
            Rewrite::Identity => url.to_string(),
        }
    }
}

/// Everything before the first `?` (and before any `#`).
pub(crate) fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
