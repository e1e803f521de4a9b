//! Page retrieval: turn a post reference into page source for the extractor.
//!
//! Static sites are a plain GET. JS-heavy sites are rendered through a
//! WebDriver session when the `browser` feature is built and enabled; when it
//! is not (or the session fails) they fall back to the static GET, which still
//! finds images on some layouts.

#[cfg(feature = "browser")]
mod browser;

#[cfg(feature = "browser")]
pub use browser::BrowserRetriever;

use crate::config::ImgdlConfig;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::site::{PostReference, Retrieval};

/// What to load and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub retrieval: Retrieval,
}

impl PageRequest {
    pub fn for_post(post: &PostReference) -> Self {
        Self {
            url: post.page_url.clone(),
            retrieval: post.retrieval(),
        }
    }
}

/// Source of page content. Implementations never retry.
pub trait PageRetriever {
    fn retrieve(&self, request: &PageRequest) -> Result<String, FetchError>;
}

/// Plain HTTP GET; fails on transport errors and non-2xx statuses.
#[derive(Debug, Clone)]
pub struct StaticRetriever {
    http: HttpClient,
}

impl StaticRetriever {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

impl PageRetriever for StaticRetriever {
    fn retrieve(&self, request: &PageRequest) -> Result<String, FetchError> {
        let response = self
            .http
            .get(&request.url)
            .map_err(|e| FetchError::fetch(&request.url, e))?;
        if !response.is_success() {
            return Err(FetchError::fetch(
                &request.url,
                format!("HTTP {}", response.status),
            ));
        }
        Ok(response.text())
    }
}

/// Chooses static or rendered retrieval per request.
pub struct PageFetcher {
    static_pages: StaticRetriever,
    rendered: Option<Box<dyn PageRetriever>>,
}

impl PageFetcher {
    /// Static-only fetcher.
    pub fn new(http: HttpClient) -> Self {
        Self {
            static_pages: StaticRetriever::new(http),
            rendered: None,
        }
    }

    /// Builds the fetcher described by `cfg`. Rendering is attached only when
    /// compiled in, enabled in config and `allow_render` is set.
    pub fn from_config(cfg: &ImgdlConfig, http: HttpClient, allow_render: bool) -> Self {
        let mut fetcher = Self::new(http);
        let render = cfg.render_or_default();
        if allow_render && render.enabled {
            fetcher.rendered = rendered_retriever(cfg);
        }
        fetcher
    }

    /// Attaches a retriever for `Retrieval::Rendered` requests.
    pub fn with_rendered(mut self, rendered: Box<dyn PageRetriever>) -> Self {
        self.rendered = Some(rendered);
        self
    }

    pub fn renders(&self) -> bool {
        self.rendered.is_some()
    }
}

#[cfg(feature = "browser")]
fn rendered_retriever(cfg: &ImgdlConfig) -> Option<Box<dyn PageRetriever>> {
    match BrowserRetriever::new(&cfg.render_or_default(), &cfg.user_agent) {
        Ok(browser) => Some(Box::new(browser)),
        Err(e) => {
            tracing::warn!("browser retrieval unavailable: {:#}", e);
            None
        }
    }
}

#[cfg(not(feature = "browser"))]
fn rendered_retriever(_cfg: &ImgdlConfig) -> Option<Box<dyn PageRetriever>> {
    tracing::debug!("built without the `browser` feature; rendered pages use static GET");
    None
}

impl PageRetriever for PageFetcher {
    fn retrieve(&self, request: &PageRequest) -> Result<String, FetchError> {
        if let Retrieval::Rendered { .. } = request.retrieval {
            match &self.rendered {
                Some(rendered) => match rendered.retrieve(request) {
                    Ok(page) => return Ok(page),
                    Err(e) => {
                        tracing::warn!("rendered retrieval failed, falling back to GET: {}", e)
                    }
                },
                None => tracing::warn!(
                    url = %request.url,
                    "page needs JavaScript but rendering is off; using static GET"
                ),
            }
        }
        self.static_pages.retrieve(request)
    }
}
