//! Rendered-DOM retrieval through a WebDriver endpoint (e.g. chromedriver).
//!
//! The WebDriver client is async; the rest of the crate is blocking, so each
//! retrieval runs on a private current-thread runtime.

use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;

use super::{PageRequest, PageRetriever};
use crate::config::RenderConfig;
use crate::error::FetchError;
use crate::site::Retrieval;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const SCROLL_TO_TOP: &str = "window.scrollTo(0, 0);";

pub struct BrowserRetriever {
    webdriver_url: String,
    settle: Duration,
    scroll_passes: u32,
    scroll_pause: Duration,
    window: (u32, u32),
    user_agent: String,
    runtime: tokio::runtime::Runtime,
}

impl BrowserRetriever {
    /// Prepares the runtime. No session is opened until the first retrieval.
    pub fn new(cfg: &RenderConfig, user_agent: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build runtime for WebDriver client")?;
        Ok(Self {
            webdriver_url: cfg.webdriver_url.clone(),
            settle: cfg.settle(),
            scroll_passes: cfg.scroll_passes,
            scroll_pause: cfg.scroll_pause(),
            window: (cfg.window_width, cfg.window_height),
            user_agent: user_agent.to_string(),
            runtime,
        })
    }

    fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let (width, height) = self.window;
        let mut caps = serde_json::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": [
                    "--headless=new",
                    "--disable-gpu",
                    "--no-sandbox",
                    "--disable-dev-shm-usage",
                    format!("--window-size={width},{height}"),
                    format!("--user-agent={}", self.user_agent),
                ]
            }),
        );
        caps
    }

    async fn render(&self, request: &PageRequest) -> Result<String> {
        let mut builder = ClientBuilder::rustls().context("TLS setup for WebDriver client")?;
        builder.capabilities(self.capabilities());
        let client = builder
            .connect(&self.webdriver_url)
            .await
            .with_context(|| format!("connect to WebDriver at {}", self.webdriver_url))?;

        let scroll = matches!(request.retrieval, Retrieval::Rendered { scroll: true });
        let page = self.load(&client, &request.url, scroll).await;

        // The session must be closed even when loading failed.
        if let Err(e) = client.close().await {
            tracing::warn!("closing WebDriver session failed: {}", e);
        }
        page
    }

    async fn load(&self, client: &Client, url: &str, scroll: bool) -> Result<String> {
        client.goto(url).await.with_context(|| format!("navigate to {url}"))?;
        tokio::time::sleep(self.settle).await;

        if scroll {
            for _ in 0..self.scroll_passes {
                client.execute(SCROLL_TO_BOTTOM, vec![]).await?;
                tokio::time::sleep(self.scroll_pause).await;
            }
            client.execute(SCROLL_TO_TOP, vec![]).await?;
            tokio::time::sleep(self.scroll_pause).await;
        }

        let source = client.source().await.context("read rendered page source")?;
        tracing::debug!(url, bytes = source.len(), scroll, "rendered page");
        Ok(source)
    }
}

impl PageRetriever for BrowserRetriever {
    fn retrieve(&self, request: &PageRequest) -> Result<String, FetchError> {
        tracing::info!(url = %request.url, "rendering page via WebDriver");
        self.runtime
            .block_on(self.render(request))
            .map_err(|e| FetchError::fetch(&request.url, format!("{e:#}")))
    }
}
