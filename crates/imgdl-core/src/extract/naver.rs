//! Naver Blog / Naver Post.
//!
//! Three editor generations are tried in order; the first that has any
//! matching element decides the post's images.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::{first_attr, selector, Candidate, Rewrite};

/// SmartEditor ONE: lazy-loaded images carry the real URL in data attributes.
static SMART_EDITOR: LazyLock<Selector> = LazyLock::new(|| selector(".se-image-resource"));
static LEGACY_ATTACHED: LazyLock<Selector> =
    LazyLock::new(|| selector(".img_attachedfile.thumb"));
static LEGACY_MEDIA: LazyLock<Selector> =
    LazyLock::new(|| selector(".se_mediaImage.__se_img_el"));

const SMART_EDITOR_ATTRS: &[&str] = &["data-lazy-src", "data-src", "src"];

pub(super) fn extract(page: &str) -> Vec<Candidate> {
    let document = Html::parse_document(page);

    let smart: Vec<_> = document.select(&SMART_EDITOR).collect();
    if !smart.is_empty() {
        tracing::debug!(count = smart.len(), "SmartEditor image elements");
        return smart
            .iter()
            .filter_map(|el| first_attr(el, SMART_EDITOR_ATTRS))
            .map(|url| Candidate::new(url, Rewrite::NaverFullSize))
            .collect();
    }

    for (legacy, label) in [
        (&*LEGACY_ATTACHED, ".img_attachedfile.thumb"),
        (&*LEGACY_MEDIA, ".se_mediaImage.__se_img_el"),
    ] {
        let found: Vec<_> = document.select(legacy).collect();
        if found.is_empty() {
            continue;
        }
        tracing::debug!(count = found.len(), format = label, "legacy editor image elements");
        return found
            .iter()
            .filter_map(|el| first_attr(el, &["src"]))
            .map(|url| Candidate::new(url, Rewrite::StripQuery))
            .collect();
    }

    tracing::debug!("no known Naver editor image markup");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMART_EDITOR_PAGE: &str = r#"
        <div class="se-main-container">
          <div class="se-module se-module-image">
            <img src="https://postfiles.pstatic.net/MjAy/a.jpg?type=w80_blur"
                 data-lazy-src="https://postfiles.pstatic.net/MjAy/a.jpg?type=w966"
                 class="se-image-resource">
          </div>
          <img class="se-image-resource" data-src="https://postfiles.pstatic.net/MjAy/b.png?type=w80" src="">
          <img class="se-image-resource" src="https://postfiles.pstatic.net/MjAy/c.gif?type=w80">
          <img class="se-image-resource">
          <img class="img_attachedfile thumb" src="https://blogthumb.pstatic.net/legacy.jpg?type=s1">
        </div>"#;

    #[test]
    fn smart_editor_prefers_lazy_attributes() {
        let found = extract(SMART_EDITOR_PAGE);
        let urls: Vec<_> = found.iter().map(|c| c.raw_url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://postfiles.pstatic.net/MjAy/a.jpg?type=w966",
                "https://postfiles.pstatic.net/MjAy/b.png?type=w80",
                "https://postfiles.pstatic.net/MjAy/c.gif?type=w80",
            ]
        );
        assert!(found.iter().all(|c| c.rewrite == Rewrite::NaverFullSize));
    }

    #[test]
    fn legacy_attached_file_format() {
        let page = r#"
            <img class="img_attachedfile thumb" src="https://blogthumb.pstatic.net/x/1.jpg?type=w2">
            <img class="img_attachedfile" src="https://blogthumb.pstatic.net/x/not-thumb.jpg">
            <img class="se_mediaImage __se_img_el" src="https://blogthumb.pstatic.net/x/2.jpg?type=w2">"#;
        let found = extract(page);
        assert_eq!(
            found,
            vec![Candidate::new(
                "https://blogthumb.pstatic.net/x/1.jpg?type=w2",
                Rewrite::StripQuery
            )]
        );
    }

    #[test]
    fn legacy_media_image_format() {
        let page = r#"
            <p><img class="se_mediaImage __se_img_el" src="https://postfiles.pstatic.net/y/1.jpg?type=w773"></p>
            <p><img class="se_mediaImage __se_img_el" src="https://postfiles.pstatic.net/y/2.jpg?type=w773"></p>"#;
        let found = extract(page);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].raw_url, "https://postfiles.pstatic.net/y/2.jpg?type=w773");
        assert_eq!(
            found[1].rewrite.apply(&found[1].raw_url),
            "https://postfiles.pstatic.net/y/2.jpg"
        );
    }

    #[test]
    fn unrelated_page_has_no_candidates() {
        assert!(extract("<html><body><img src='/logo.png'></body></html>").is_empty());
    }
}
