//! Filename sanitization, safe on Linux and on Windows-mounted shares.

/// Characters rejected by common filesystems besides control characters.
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Sanitizes a candidate file or folder name.
///
/// - Replaces `< > : " / \ | ? *`, NUL and control characters with `_`
/// - Trims leading/trailing whitespace and dots
/// - Limits length to 255 bytes (Linux NAME_MAX), keeping the extension when possible
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_control() || RESERVED.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');

    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }

    let ext = trimmed
        .rfind('.')
        .map(|dot| &trimmed[dot..])
        .filter(|ext| ext.len() <= 16)
        .unwrap_or("");
    let mut take = NAME_MAX - ext.len();
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    format!("{}{}", &trimmed[..take], ext)
}
