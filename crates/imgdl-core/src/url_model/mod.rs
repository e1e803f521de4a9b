//! URL modeling and filename derivation.
//!
//! Derives safe local filenames for downloaded images from their URL path.

mod path;
mod percent;
mod sanitize;

pub use path::filename_from_url_path;
pub use percent::percent_decode;
pub use sanitize::sanitize_filename;

/// Name used when the URL path yields nothing that looks like a file.
fn indexed_filename(index: usize) -> String {
    format!("image_{index}.jpg")
}

/// Derives the local filename for the `index`-th image (1-based) of a post.
///
/// Uses the last path segment of `url` when it looks like a file name (has a
/// `.`), otherwise `image_{index}.jpg`. The result is sanitized.
///
/// # Examples
///
/// - `image_filename("https://blogfiles.naver.net/x/IMG_01.jpg", 1)` → `"IMG_01.jpg"`
/// - `image_filename("https://cdn.example.com/render/abc", 3)` → `"image_3.jpg"`
pub fn image_filename(url: &str, index: usize) -> String {
    let candidate = filename_from_url_path(url).filter(|name| name.contains('.'));

    let raw = match candidate {
        Some(c) => c,
        None => return indexed_filename(index),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        indexed_filename(index)
    } else {
        sanitized
    }
}
