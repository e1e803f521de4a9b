//! Supported sites and the post reference parsed from an input URL.

mod classify;

pub use classify::classify;

use std::fmt;

/// A platform with its own page layout and image CDN conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    NaverBlog,
    NaverPost,
    SbsKpop,
    SbsProgram,
    Weverse,
    Berriz,
}

/// How a site's page has to be loaded before its images are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retrieval {
    /// Plain GET; images are in the served HTML.
    Static,
    /// Images are inserted by scripts. `scroll` sites also lazy-load on scroll.
    Rendered { scroll: bool },
}

impl Site {
    pub fn retrieval(self) -> Retrieval {
        match self {
            Site::NaverBlog | Site::SbsKpop => Retrieval::Static,
            Site::NaverPost | Site::SbsProgram => Retrieval::Rendered { scroll: false },
            Site::Weverse | Site::Berriz => Retrieval::Rendered { scroll: true },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Site::NaverBlog => "Naver Blog",
            Site::NaverPost => "Naver Post",
            Site::SbsKpop => "SBS K-Pop Magazine",
            Site::SbsProgram => "SBS Program",
            Site::Weverse => "Weverse",
            Site::Berriz => "Berriz",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying an input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostReference {
    pub site: Site,
    /// Post identifier; also the name of the output folder.
    pub identifier: String,
    /// Page the retriever should load (not always the input URL).
    pub page_url: String,
}

impl PostReference {
    pub fn retrieval(&self) -> Retrieval {
        self.site.retrieval()
    }
}
