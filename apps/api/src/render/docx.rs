//! Word-processor document renderer — builds a structured paragraph tree
//! mirroring the LaTeX layout, for conversion into a binary document by an
//! external packer. Field gating matches the other renderers; LaTeX escaping
//! does not apply here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::target::TargetInfo;
use crate::render::{display_url, latex::format_long_date};

/// Half-point font size for the author name header (word-processor unit).
const NAME_SIZE_HALF_POINTS: u32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

/// A single styled text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRun {
    pub text: String,
    pub bold: bool,
    /// Font size in half-points; `None` inherits the document default.
    pub size: Option<u32>,
}

impl DocRun {
    fn plain(text: impl Into<String>) -> Self {
        DocRun {
            text: text.into(),
            bold: false,
            size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocParagraph {
    pub alignment: Alignment,
    pub runs: Vec<DocRun>,
}

impl DocParagraph {
    fn text(alignment: Alignment, text: impl Into<String>) -> Self {
        DocParagraph {
            alignment,
            runs: vec![DocRun::plain(text)],
        }
    }
}

/// The full paragraph tree handed to the external packer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub paragraphs: Vec<DocParagraph>,
}

/// Renders the letter as a paragraph tree: centered header, contact line,
/// date, addressee block, greeting, body paragraphs, sign-off, signature.
pub fn render_document(target: &TargetInfo, body_text: &str, date: NaiveDate) -> DocumentTree {
    let mut paragraphs = Vec::new();

    if !target.author_name.is_empty() {
        paragraphs.push(DocParagraph {
            alignment: Alignment::Center,
            runs: vec![DocRun {
                text: target.author_name.clone(),
                bold: true,
                size: Some(NAME_SIZE_HALF_POINTS),
            }],
        });
    }

    let contact = contact_line(target);
    if !contact.is_empty() {
        paragraphs.push(DocParagraph::text(Alignment::Center, contact));
    }
    if let Some(location) = target.visible_city_state() {
        paragraphs.push(DocParagraph::text(Alignment::Center, location));
    }

    paragraphs.push(DocParagraph::text(
        Alignment::Left,
        format_long_date(date),
    ));

    paragraphs.push(DocParagraph::text(
        Alignment::Left,
        target.greeting_name(),
    ));
    if !target.company_name.is_empty() {
        paragraphs.push(DocParagraph::text(
            Alignment::Left,
            target.company_name.clone(),
        ));
    }

    paragraphs.push(DocParagraph::text(
        Alignment::Left,
        format!("Dear {},", target.greeting_name()),
    ));

    for paragraph in body_paragraphs(body_text) {
        paragraphs.push(DocParagraph::text(Alignment::Left, paragraph));
    }

    paragraphs.push(DocParagraph::text(Alignment::Left, "Sincerely,"));
    if !target.author_name.is_empty() {
        paragraphs.push(DocParagraph::text(
            Alignment::Left,
            target.author_name.clone(),
        ));
    }

    DocumentTree { paragraphs }
}

/// Enabled contact fields joined with a middle dot glyph.
fn contact_line(target: &TargetInfo) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(email) = target.visible_email() {
        parts.push(email.to_string());
    }
    if let Some(phone) = target.visible_phone() {
        parts.push(phone.to_string());
    }
    if let Some(url) = target.visible_portfolio_url() {
        parts.push(display_url(url).to_string());
    }
    parts.join(" \u{00B7} ")
}

/// Splits the body on blank-line boundaries; line breaks inside a paragraph
/// collapse to spaces, since run text is single-line in the packed format.
fn body_paragraphs(body: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}
