//! One fetch run: classify, retrieve, extract, download.

use std::path::{Path, PathBuf};

use crate::config::ImgdlConfig;
use crate::downloader::{DownloadReport, Downloader, Outcome};
use crate::error::FetchError;
use crate::extract::{self, ImageReference};
use crate::http::HttpClient;
use crate::retrieve::{PageFetcher, PageRequest, PageRetriever};
use crate::site::{self, PostReference};

/// Progress of a run, in the order it happens.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    Classified(&'a PostReference),
    Retrieving(&'a PageRequest),
    /// Images found on the page, before de-duplication.
    Found(usize),
    Image(&'a ImageReference, &'a Outcome),
}

/// What a finished run did.
#[derive(Debug)]
pub struct RunSummary {
    pub post: PostReference,
    /// Output folder; `None` when the page had no images.
    pub folder: Option<PathBuf>,
    pub report: DownloadReport,
}

pub struct Fetcher {
    http: HttpClient,
    pages: Box<dyn PageRetriever>,
    base_dir: PathBuf,
}

impl Fetcher {
    /// Builds a fetcher from config. `allow_render` off forces static GETs.
    pub fn new(cfg: &ImgdlConfig, base_dir: impl Into<PathBuf>, allow_render: bool) -> Self {
        let http = HttpClient::from_config(cfg);
        let pages = PageFetcher::from_config(cfg, http.clone(), allow_render);
        if !pages.renders() {
            tracing::debug!("rendered retrieval disabled for this run");
        }
        Self::with_retriever(http, Box::new(pages), base_dir)
    }

    pub fn with_retriever(
        http: HttpClient,
        pages: Box<dyn PageRetriever>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            http,
            pages,
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Fetches every image of the post at `url`.
    ///
    /// Fails on an unsupported URL, a page that cannot be retrieved, or an
    /// output folder that cannot be created. Individual image failures are
    /// reported through `on_event` and counted in the summary.
    pub fn run<F>(&self, url: &str, mut on_event: F) -> Result<RunSummary, FetchError>
    where
        F: FnMut(FetchEvent<'_>),
    {
        let post = site::classify(url)?;
        tracing::info!(site = %post.site, id = %post.identifier, page = %post.page_url, "classified");
        on_event(FetchEvent::Classified(&post));

        let request = PageRequest::for_post(&post);
        on_event(FetchEvent::Retrieving(&request));
        let page = self.pages.retrieve(&request)?;

        let images = extract::extract(&post, &page);
        let found = images.remaining();
        on_event(FetchEvent::Found(found));
        if found == 0 {
            tracing::info!(url, "no images found; nothing written");
            return Ok(RunSummary {
                post,
                folder: None,
                report: DownloadReport::default(),
            });
        }

        let folder = self.base_dir.join(&post.identifier);
        std::fs::create_dir_all(&folder).map_err(|source| FetchError::Io {
            path: folder.clone(),
            source,
        })?;

        let downloader = Downloader::new(self.http.clone(), &folder);
        let report = downloader.download_all(images, |image, outcome| {
            on_event(FetchEvent::Image(image, outcome))
        });

        Ok(RunSummary {
            post,
            folder: Some(folder),
            report,
        })
    }
}
