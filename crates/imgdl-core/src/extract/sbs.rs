//! SBS: the K-Pop magazine (Adobe Portfolio CDN) and program visual boards.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

use super::{first_attr, selector, Candidate, Rewrite, UniqueUrls};

/// `https://cdn.myportfolio.com/{project}/{image id}{_variant}?.{ext}?h={signature}`
static PORTFOLIO_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https://cdn\.myportfolio\.com/[a-f0-9-]+/([a-f0-9-]+)(_[^.]+)?(\.(jpg|png))\?h=[a-f0-9]+",
    )
    .unwrap_or_else(|e| panic!("portfolio pattern: {e}"))
});

/// Program board content images are named `{24 hex}-p.{jpg|png}`.
static PROGRAM_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^\s"'<>]+/[a-f0-9]{24}-p\.(?:jpg|png)"#)
        .unwrap_or_else(|e| panic!("program url pattern: {e}"))
});
static PROGRAM_IMAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-f0-9]{24}-p\.(?:jpg|png)$")
        .unwrap_or_else(|e| panic!("program name pattern: {e}"))
});

static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));

/// Priority of the untouched upload; beats any resized width.
const ORIGINAL_PRIORITY: u32 = 10_000;
const UNKNOWN_WIDTH_PRIORITY: u32 = 500;
const OTHER_VARIANT_PRIORITY: u32 = 50;

/// Ranks a portfolio variant suffix; `None` for cropped variants, which are never wanted.
fn variant_priority(suffix: &str) -> Option<u32> {
    if suffix.contains("_carw_") || suffix.contains("_rwc_") {
        return None;
    }
    if suffix.is_empty() {
        return Some(ORIGINAL_PRIORITY);
    }
    match suffix.strip_prefix("_rw_") {
        Some(rest) => {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            Some(digits.parse().unwrap_or(UNKNOWN_WIDTH_PRIORITY))
        }
        None => Some(OTHER_VARIANT_PRIORITY),
    }
}

/// Keeps the best variant of every image, in order of first appearance.
pub(super) fn extract_kpop(page: &str) -> Vec<Candidate> {
    let mut order: Vec<String> = Vec::new();
    let mut best: HashMap<String, (u32, String)> = HashMap::new();

    for caps in PORTFOLIO_IMAGE.captures_iter(page) {
        let url = &caps[0];
        let id = &caps[1];
        let suffix = caps.get(2).map_or("", |m| m.as_str());
        let Some(priority) = variant_priority(suffix) else {
            continue;
        };
        match best.get_mut(id) {
            Some(entry) => {
                if priority > entry.0 {
                    *entry = (priority, url.to_string());
                }
            }
            None => {
                order.push(id.to_string());
                best.insert(id.to_string(), (priority, url.to_string()));
            }
        }
    }

    let originals = best
        .values()
        .filter(|(priority, _)| *priority >= ORIGINAL_PRIORITY)
        .count();
    tracing::debug!(
        originals,
        resized = best.len() - originals,
        "portfolio images by best variant"
    );

    order
        .into_iter()
        .filter_map(|id| best.remove(&id))
        .map(|(_, url)| Candidate::new(url, Rewrite::Identity))
        .collect()
}

/// Content images of a program board: absolute URLs anywhere in the page
/// first, then `<img>` tags (possibly relative) with the content file name shape.
pub(super) fn extract_program(page: &str, page_url: &str) -> Vec<Candidate> {
    let mut found = UniqueUrls::default();
    for m in PROGRAM_IMAGE_URL.find_iter(page) {
        found.push(m.as_str(), m.as_str(), None);
    }

    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(page);
    for img in document.select(&IMG) {
        let Some(src) = first_attr(&img, &["src", "data-src"]) else {
            continue;
        };
        if src.starts_with("data:") {
            continue;
        }
        let name = src
            .rsplit('/')
            .next()
            .and_then(|last| last.split('?').next())
            .unwrap_or_default();
        if !PROGRAM_IMAGE_NAME.is_match(name) {
            continue;
        }
        let absolute = match &base {
            Some(base) => base.join(&src).map(String::from).unwrap_or(src),
            None => src,
        };
        found.push(&absolute, &absolute, None);
    }

    tracing::debug!(count = found.urls.len(), "program board content images");
    found.into_candidates(Rewrite::Identity)
}
