//! Ordered URL pattern table. The first pattern whose shape matches wins.

use url::Url;

use super::{PostReference, Site};
use crate::error::FetchError;
use crate::url_model::{percent_decode, sanitize_filename};

/// Identifier used when a site matched but the URL carries no usable id.
const UNKNOWN: &str = "unknown";

const NAVER_POST_VIEW: &str = "https://blog.naver.com/PostView.naver";
const SBS_PROGRAM_MOBILE_HOST: &str = "m.programs.sbs.co.kr";

/// A site tag plus the shape a URL must have to belong to it.
struct SitePattern {
    site: Site,
    /// Returns `(identifier, page_url)` when the URL has this shape.
    matches: fn(&Url) -> Option<(String, String)>,
}

const PATTERNS: &[SitePattern] = &[
    SitePattern {
        site: Site::NaverBlog,
        matches: naver_blog_path,
    },
    SitePattern {
        site: Site::NaverBlog,
        matches: naver_blog_query,
    },
    SitePattern {
        site: Site::NaverPost,
        matches: naver_post,
    },
    SitePattern {
        site: Site::SbsKpop,
        matches: sbs_kpop,
    },
    SitePattern {
        site: Site::SbsProgram,
        matches: sbs_program,
    },
    SitePattern {
        site: Site::Weverse,
        matches: weverse,
    },
    SitePattern {
        site: Site::Berriz,
        matches: berriz,
    },
];

/// Classifies a post URL into the site that knows how to scrape it.
///
/// # Examples
///
/// - `https://blog.naver.com/jypentertainment/224072207277` → NaverBlog, `224072207277`
/// - `https://weverse.io/nmixx/media/4-123` → Weverse, `nmixx_4-123`
pub fn classify(input: &str) -> Result<PostReference, FetchError> {
    let input = input.trim();
    let unsupported = || FetchError::UnsupportedUrl(input.to_string());

    let url = Url::parse(input).map_err(|_| unsupported())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(unsupported());
    }

    for pattern in PATTERNS {
        if let Some((identifier, page_url)) = (pattern.matches)(&url) {
            let identifier = folder_name(&identifier);
            tracing::debug!(site = ?pattern.site, %identifier, %page_url, "classified url");
            return Ok(PostReference {
                site: pattern.site,
                identifier,
                page_url,
            });
        }
    }

    Err(unsupported())
}

/// Identifiers become directory names, so they must be one safe path segment.
fn folder_name(identifier: &str) -> String {
    let name = sanitize_filename(identifier);
    if name.is_empty() {
        UNKNOWN.to_string()
    } else {
        name
    }
}

fn host(url: &Url) -> &str {
    url.host_str().unwrap_or_default()
}

/// True when the host is `domain` or one of its subdomains.
fn on_domain(url: &Url, domain: &str) -> bool {
    let host = host(url);
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segs| {
            segs.filter(|s| !s.is_empty())
                .map(|s| percent_decode(s))
                .collect()
        })
        .unwrap_or_default()
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.into_owned())
}

fn is_naver_blog_host(url: &Url) -> bool {
    matches!(host(url), "blog.naver.com" | "m.blog.naver.com")
}

/// The post body of a Naver blog lives in this iframe document.
fn naver_post_view(blog_id: &str, log_no: &str) -> Option<String> {
    Url::parse_with_params(NAVER_POST_VIEW, &[("blogId", blog_id), ("logNo", log_no)])
        .ok()
        .map(String::from)
}

fn naver_blog_path(url: &Url) -> Option<(String, String)> {
    if !is_naver_blog_host(url) {
        return None;
    }
    match segments(url).as_slice() {
        [blog_id, log_no, ..]
            if !log_no.is_empty() && log_no.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Some((log_no.clone(), naver_post_view(blog_id, log_no)?))
        }
        _ => None,
    }
}

fn naver_blog_query(url: &Url) -> Option<(String, String)> {
    if !is_naver_blog_host(url) {
        return None;
    }
    let blog_id = query_value(url, "blogId")?;
    let log_no = query_value(url, "logNo")?;
    let page = naver_post_view(&blog_id, &log_no)?;
    Some((log_no, page))
}

fn naver_post(url: &Url) -> Option<(String, String)> {
    if !on_domain(url, "post.naver.com") {
        return None;
    }
    let volume_no = query_value(url, "volumeNo")?;
    Some((volume_no, url.to_string()))
}

fn sbs_kpop(url: &Url) -> Option<(String, String)> {
    if !on_domain(url, "sbskpop.kr") {
        return None;
    }
    let artist = segments(url)
        .into_iter()
        .next()
        .unwrap_or_else(|| UNKNOWN.to_string());
    Some((artist, url.to_string()))
}

fn sbs_program(url: &Url) -> Option<(String, String)> {
    if !on_domain(url, "programs.sbs.co.kr") {
        return None;
    }
    let board_no = query_value(url, "board_no").unwrap_or_else(|| UNKNOWN.to_string());
    // The desktop board is a frameset; the mobile page carries the images.
    let mut page = url.clone();
    if host(url) != SBS_PROGRAM_MOBILE_HOST {
        page.set_host(Some(SBS_PROGRAM_MOBILE_HOST)).ok()?;
    }
    Some((board_no, page.into()))
}

fn weverse(url: &Url) -> Option<(String, String)> {
    if !on_domain(url, "weverse.io") {
        return None;
    }
    let identifier = match segments(url).as_slice() {
        [artist, media, post_id, ..] if media == "media" => format!("{artist}_{post_id}"),
        [artist, ..] => artist.clone(),
        [] => UNKNOWN.to_string(),
    };
    Some((identifier, url.to_string()))
}

fn berriz(url: &Url) -> Option<(String, String)> {
    if !on_domain(url, "berriz.in") {
        return None;
    }
    let identifier = match segments(url).as_slice() {
        [_lang, artist, media, _, post_id, ..] if media == "media" => {
            format!("{artist}_{post_id}")
        }
        [_lang, artist, ..] => artist.clone(),
        _ => UNKNOWN.to_string(),
    };
    Some((identifier, url.to_string()))
}
