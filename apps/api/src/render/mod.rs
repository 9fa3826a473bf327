//! Document renderers — pure transforms from `(TargetInfo, body text)` to an
//! output representation. Markdown is the identity view, LaTeX produces a
//! compilable source string, and the document tree feeds an external binary
//! packer. None of them perform I/O.

pub mod docx;
pub mod filename;
pub mod handlers;
pub mod latex;
pub mod markdown;

/// Display text for a portfolio link: protocol and a leading `www.` removed.
/// The underlying URL is kept intact wherever the format supports links.
pub(crate) fn display_url(url: &str) -> &str {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped.strip_prefix("www.").unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_url_strips_protocol_and_www() {
        assert_eq!(display_url("https://www.example.com/x"), "example.com/x");
        assert_eq!(display_url("http://example.com"), "example.com");
        assert_eq!(display_url("www.example.com"), "example.com");
        assert_eq!(display_url("example.com"), "example.com");
    }
}
