//! Weverse media posts: image list rendered client-side from `phinf.wevpstatic.net`.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::rewrite::strip_query;
use super::{first_attr, selector, Candidate, Rewrite, UniqueUrls};

const IMAGE_HOST: &str = "phinf.wevpstatic.net";

static LIST_IMAGES: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[class*="media-image-simple-list"] img"#));

/// Image id: the hex/dash file stem.
static IMAGE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/([a-f0-9-]+)\.(?:jpeg|jpg|png|webp)$")
        .unwrap_or_else(|e| panic!("weverse id pattern: {e}"))
});
static ANY_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https://phinf\.wevpstatic\.net/[^"\s<>]+\.(?:jpeg|jpg|png|webp)"#)
        .unwrap_or_else(|e| panic!("weverse url pattern: {e}"))
});

fn push(found: &mut UniqueUrls, url: &str) {
    let full = strip_query(url);
    let id = IMAGE_ID.captures(full).map(|caps| caps[1].to_string());
    found.push(url, full, id.as_deref());
}

pub(super) fn extract(page: &str) -> Vec<Candidate> {
    let document = Html::parse_document(page);
    let mut found = UniqueUrls::default();

    for img in document.select(&LIST_IMAGES) {
        if let Some(src) = first_attr(&img, &["src", "data-src"]) {
            if src.contains(IMAGE_HOST) {
                push(&mut found, &src);
            }
        }
    }

    // Layout changed or the list never rendered: sweep the whole page.
    if found.is_empty() {
        tracing::debug!("no media list images; scanning page for CDN urls");
        for m in ANY_IMAGE_URL.find_iter(page) {
            push(&mut found, m.as_str());
        }
    }

    found.into_candidates(Rewrite::StripQuery)
}
