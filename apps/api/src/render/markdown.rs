//! Markdown renderer — the generated body text is itself the Markdown
//! representation. Emphasis markers stay intact so the UI can highlight
//! text quoted verbatim from content blocks.

pub fn render_markdown(body_text: &str) -> String {
    body_text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_is_the_identity_transform() {
        let body = "I shipped <mark>a payments service</mark> last year.\n\nSecond paragraph.";
        assert_eq!(render_markdown(body), body);
    }
}
