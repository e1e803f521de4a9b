//! Berriz media content: partner images on `statics.berriz.in`, named by numeric id.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::{first_attr, selector, Candidate, Rewrite, UniqueUrls};

const PARTNER_PATH: &str = "statics.berriz.in/cdn/partner";

/// The post body column; thumbnails of other posts live outside it.
static CONTENT_IMAGES: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[class*="xl:w-[880px]"] img"#));

static IMAGE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/(\d+)\.(?:jpg|jpeg|png|webp)$")
        .unwrap_or_else(|e| panic!("berriz id pattern: {e}"))
});
static ANY_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https://statics\.berriz\.in/cdn/partner/image/[^\s"<>]+\.(?:jpg|jpeg|png|webp)"#)
        .unwrap_or_else(|e| panic!("berriz url pattern: {e}"))
});

fn push(found: &mut UniqueUrls, url: &str) {
    let id = IMAGE_ID.captures(url).map(|caps| caps[1].to_string());
    found.push(url, url, id.as_deref());
}

pub(super) fn extract(page: &str) -> Vec<Candidate> {
    let document = Html::parse_document(page);
    let mut found = UniqueUrls::default();

    for img in document.select(&CONTENT_IMAGES) {
        if let Some(src) = first_attr(&img, &["src", "data-src"]) {
            if src.contains(PARTNER_PATH) {
                push(&mut found, &src);
            }
        }
    }

    if found.is_empty() {
        tracing::debug!("no content column images; scanning page for partner urls");
        for m in ANY_IMAGE_URL.find_iter(page) {
            push(&mut found, m.as_str());
        }
    }

    found.into_candidates(Rewrite::Identity)
}
