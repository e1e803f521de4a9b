use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser user agent; several CDNs refuse the libcurl default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Rendered-page retrieval settings (optional `[render]` section in config.toml).
///
/// Only consulted when the crate is built with the `browser` feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Set to false to always use the static fetch, even for JS-heavy sites.
    pub enabled: bool,
    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    /// Seconds to wait after navigation for scripts to populate the page.
    pub settle_secs: u64,
    /// How many times to scroll to the bottom on sites with lazy image lists.
    pub scroll_passes: u32,
    /// Pause after each scroll, in milliseconds.
    pub scroll_pause_ms: u64,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            webdriver_url: "http://localhost:9515".to_string(),
            settle_secs: 5,
            scroll_passes: 3,
            scroll_pause_ms: 1000,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl RenderConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }
}

/// Global configuration loaded from `~/.config/imgdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImgdlConfig {
    /// User-Agent sent with every page and image request.
    pub user_agent: String,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (page or single image).
    pub request_timeout_secs: u64,
    /// Extra request headers (e.g. a Referer some CDNs want).
    #[serde(default)]
    pub extra_headers: HashMap<String, String>,
    /// Base directory for post folders; None = current working directory.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Optional rendered-page settings; if missing, built-in defaults are used.
    #[serde(default)]
    pub render: Option<RenderConfig>,
}

impl Default for ImgdlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            extra_headers: HashMap::new(),
            download_dir: None,
            render: None,
        }
    }
}

impl ImgdlConfig {
    /// Render settings with defaults filled in.
    pub fn render_or_default(&self) -> RenderConfig {
        self.render.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ImgdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ImgdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ImgdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ImgdlConfig::default();
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.request_timeout_secs, 60);
        assert!(cfg.extra_headers.is_empty());
        assert!(cfg.download_dir.is_none());
        assert!(cfg.render.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ImgdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ImgdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.user_agent, cfg.user_agent);
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
    }

    #[test]
    fn config_toml_minimal_uses_defaults_for_optional_sections() {
        let toml = r#"
            user_agent = "imgdl-test"
            connect_timeout_secs = 5
            request_timeout_secs = 20
        "#;
        let cfg: ImgdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.user_agent, "imgdl-test");
        assert_eq!(cfg.connect_timeout_secs, 5);
        assert_eq!(cfg.request_timeout_secs, 20);
        assert!(cfg.extra_headers.is_empty());
        let render = cfg.render_or_default();
        assert!(render.enabled);
        assert_eq!(render.webdriver_url, "http://localhost:9515");
        assert_eq!(render.settle(), Duration::from_secs(5));
    }

    #[test]
    fn config_toml_render_and_headers() {
        let toml = r#"
            user_agent = "ua"
            connect_timeout_secs = 10
            request_timeout_secs = 30
            download_dir = "/srv/pictures"

            [extra_headers]
            Referer = "https://blog.naver.com/"

            [render]
            enabled = false
            webdriver_url = "http://127.0.0.1:4444"
            settle_secs = 2
            scroll_passes = 5
            scroll_pause_ms = 250
            window_width = 1280
            window_height = 720
        "#;
        let cfg: ImgdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            cfg.extra_headers.get("Referer").map(String::as_str),
            Some("https://blog.naver.com/")
        );
        assert_eq!(cfg.download_dir, Some(PathBuf::from("/srv/pictures")));
        let render = cfg.render.as_ref().unwrap();
        assert!(!render.enabled);
        assert_eq!(render.webdriver_url, "http://127.0.0.1:4444");
        assert_eq!(render.scroll_passes, 5);
        assert_eq!(render.scroll_pause(), Duration::from_millis(250));
        assert_eq!((render.window_width, render.window_height), (1280, 720));
    }
}
