//! Image extraction: per-site selectors over the retrieved page.
//!
//! Each site module returns candidates in document order, each tagged with the
//! rewrite that yields the full-resolution URL. [`Images`] turns them into
//! [`ImageReference`]s one at a time as the downloader pulls them.

mod berriz;
mod naver;
mod rewrite;
mod sbs;
mod weverse;

pub use rewrite::Rewrite;

use scraper::{ElementRef, Selector};
use std::collections::HashSet;
use std::vec;

use crate::site::{PostReference, Site};
use crate::url_model::image_filename;

/// A scraped image URL before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub raw_url: String,
    pub rewrite: Rewrite,
}

impl Candidate {
    pub fn new(raw_url: impl Into<String>, rewrite: Rewrite) -> Self {
        Self {
            raw_url: raw_url.into(),
            rewrite,
        }
    }
}

/// One image to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// URL as found in the page.
    pub raw_url: String,
    /// Full-resolution URL that is actually downloaded.
    pub normalized_url: String,
    /// Target file name inside the post folder.
    pub filename: String,
}

/// Parses a selector known at compile time.
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// First non-empty attribute among `names`, in order of preference.
fn first_attr(element: &ElementRef<'_>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| element.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Accumulates scraped URLs in order, dropping repeats of the same URL or of
/// the same image key (sites serve one image under several URLs).
#[derive(Debug, Default)]
struct UniqueUrls {
    keys: HashSet<String>,
    compared: HashSet<String>,
    urls: Vec<String>,
}

impl UniqueUrls {
    /// Adds `url` unless `key` or `compare_as` was already seen.
    fn push(&mut self, url: &str, compare_as: &str, key: Option<&str>) {
        if let Some(key) = key {
            if !self.keys.insert(key.to_string()) {
                return;
            }
        }
        if self.compared.insert(compare_as.to_string()) {
            self.urls.push(url.to_string());
        }
    }

    fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    fn into_candidates(self, rewrite: Rewrite) -> Vec<Candidate> {
        self.urls
            .into_iter()
            .map(|url| Candidate::new(url, rewrite))
            .collect()
    }
}

/// Collects candidates from `page` using the rules of `site`.
///
/// `page_url` is the address the page was loaded from; relative image
/// references are resolved against it.
pub fn candidates(site: Site, page: &str, page_url: &str) -> Vec<Candidate> {
    let found = match site {
        Site::NaverBlog | Site::NaverPost => naver::extract(page),
        Site::SbsKpop => sbs::extract_kpop(page),
        Site::SbsProgram => sbs::extract_program(page, page_url),
        Site::Weverse => weverse::extract(page),
        Site::Berriz => berriz::extract(page),
    };
    tracing::info!(?site, count = found.len(), "extracted image candidates");
    found
}

/// Extracts the images of a retrieved post page.
pub fn extract(post: &PostReference, page: &str) -> Images {
    Images::new(candidates(post.site, page, &post.page_url))
}

/// Lazy, finite sequence of images in document order.
///
/// URLs are normalized, de-duplicated and named as they are pulled; the
/// sequence cannot be restarted (retrieve and extract again instead).
#[derive(Debug)]
pub struct Images {
    candidates: vec::IntoIter<Candidate>,
    seen: HashSet<String>,
    index: usize,
}

impl Images {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: candidates.into_iter(),
            seen: HashSet::new(),
            index: 0,
        }
    }

    /// Candidates not yet pulled. Duplicates among them are still counted.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

impl Iterator for Images {
    type Item = ImageReference;

    fn next(&mut self) -> Option<ImageReference> {
        for candidate in self.candidates.by_ref() {
            let normalized_url = candidate.rewrite.apply(&candidate.raw_url);
            if !self.seen.insert(normalized_url.clone()) {
                continue;
            }
            self.index += 1;
            let filename = image_filename(&normalized_url, self.index);
            if normalized_url != candidate.raw_url {
                tracing::debug!(raw = %candidate.raw_url, full = %normalized_url, "rewrote image url");
            }
            return Some(ImageReference {
                raw_url: candidate.raw_url,
                normalized_url,
                filename,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.candidates.len()))
    }
}
