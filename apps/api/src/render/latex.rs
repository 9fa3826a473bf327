//! LaTeX renderer — turns `(TargetInfo, body text)` into a complete,
//! compilable document source string.

use chrono::NaiveDate;

use crate::models::target::TargetInfo;
use crate::render::display_url;

/// Escapes LaTeX-significant characters in user-supplied text.
///
/// Single character-level pass. Backslash must map before the substitutions
/// that introduce braces, so the `{}` of `\textbackslash{}` are never
/// themselves re-escaped; a per-character match gives that ordering for
/// free and keeps the escape reversible.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full LaTeX document.
///
/// `date` is the render-time date — the HTTP handler passes today, so a
/// re-render later reflects the render date, not the original generation
/// time. Tests pass a fixed date.
pub fn render_latex(target: &TargetInfo, body_text: &str, date: NaiveDate) -> String {
    let mut doc = String::new();

    doc.push_str("\\documentclass[11pt]{article}\n");
    doc.push_str("\\usepackage[margin=1in]{geometry}\n");
    doc.push_str("\\usepackage[hidelinks]{hyperref}\n");
    doc.push_str("\\usepackage{parskip}\n");
    doc.push_str("\\pagestyle{empty}\n\n");
    doc.push_str("\\begin{document}\n\n");

    // Header: centered name, contact line, location line
    doc.push_str("\\begin{center}\n");
    doc.push_str(&format!(
        "{{\\LARGE \\textbf{{{}}}}}\\\\[4pt]\n",
        escape_latex(&target.author_name)
    ));
    let contact = contact_line(target);
    if !contact.is_empty() {
        doc.push_str(&contact);
        doc.push_str("\\\\\n");
    }
    if let Some(location) = target.visible_city_state() {
        doc.push_str(&escape_latex(location));
        doc.push('\n');
    }
    doc.push_str("\\end{center}\n\n");

    // Date line, long form, computed at render time
    doc.push_str(&format!("{}\n\n", format_long_date(date)));

    // Addressee block: one line per non-empty field, in this order
    let addressee_lines: Vec<String> = [
        &target.addressee,
        &target.company_name,
        &target.company_address,
    ]
    .iter()
    .filter(|v| !v.is_empty())
    .map(|v| escape_latex(v))
    .collect();
    if !addressee_lines.is_empty() {
        doc.push_str(&addressee_lines.join(" \\\\\n"));
        doc.push_str("\n\n");
    }

    // Subject line only when a role is named
    if !target.role_title.is_empty() {
        let mut subject = format!("RE: Application for {}", escape_latex(&target.role_title));
        if !target.job_id.is_empty() {
            subject.push_str(&format!(" ({})", escape_latex(&target.job_id)));
        }
        doc.push_str(&format!("\\textbf{{{subject}}}\n\n"));
    }

    doc.push_str(&format!(
        "Dear {},\n\n",
        escape_latex(target.greeting_name())
    ));

    doc.push_str(&render_body(body_text));
    doc.push_str("\n\n");

    doc.push_str(&format!(
        "Sincerely,\\\\[14pt]\n{}\n\n",
        escape_latex(&target.author_name)
    ));

    doc.push_str("\\end{document}\n");
    doc
}

/// Joins the enabled contact fields with a middle dot: email as a mail link,
/// phone as plain text, portfolio as a hyperlink with trimmed display text.
fn contact_line(target: &TargetInfo) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(email) = target.visible_email() {
        parts.push(format!(
            "\\href{{mailto:{email}}}{{{}}}",
            escape_latex(email)
        ));
    }
    if let Some(phone) = target.visible_phone() {
        parts.push(escape_latex(phone));
    }
    if let Some(url) = target.visible_portfolio_url() {
        parts.push(format!(
            "\\href{{{url}}}{{{}}}",
            escape_latex(display_url(url))
        ));
    }
    parts.join(" $\\cdot$ ")
}

/// Escapes the body line by line. Line breaks within a paragraph become
/// LaTeX line breaks; blank lines separate paragraphs.
fn render_body(body: &str) -> String {
    let mut paragraphs: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in body.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(escape_latex(line));
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
        .iter()
        .map(|p| p.join(" \\\\\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Long-form date, e.g. "January 5, 2025".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    /// Reverses `escape_latex` for the escaped character set. Test-only:
    /// proves the escape is non-lossy.
    fn unescape_latex(input: &str) -> String {
        // Sentinel keeps restored backslashes out of later replacements.
        const SENTINEL: char = '\u{0}';
        let mut s = input.replace("\\textbackslash{}", &SENTINEL.to_string());
        s = s.replace("\\textasciitilde{}", "~");
        s = s.replace("\\textasciicircum{}", "^");
        for c in ['&', '%', '$', '#', '_', '{', '}'] {
            s = s.replace(&format!("\\{c}"), &c.to_string());
        }
        s.replace(SENTINEL, "\\")
    }

    #[test]
    fn test_escape_maps_every_special_character() {
        assert_eq!(escape_latex("\\"), "\\textbackslash{}");
        assert_eq!(escape_latex("&"), "\\&");
        assert_eq!(escape_latex("%"), "\\%");
        assert_eq!(escape_latex("$"), "\\$");
        assert_eq!(escape_latex("#"), "\\#");
        assert_eq!(escape_latex("_"), "\\_");
        assert_eq!(escape_latex("{"), "\\{");
        assert_eq!(escape_latex("}"), "\\}");
        assert_eq!(escape_latex("~"), "\\textasciitilde{}");
        assert_eq!(escape_latex("^"), "\\textasciicircum{}");
    }

    #[test]
    fn test_escape_round_trip_is_lossless() {
        let input = r"a\b&c%d$e#f_g{h}i~j^k and 100% of $5 \& more";
        assert_eq!(unescape_latex(&escape_latex(input)), input);
    }

    #[test]
    fn test_escape_backslash_is_not_double_escaped() {
        // A lone backslash must not have its replacement braces re-escaped.
        assert_eq!(escape_latex("\\{"), "\\textbackslash{}\\{");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape_latex("Dear Hiring Manager,"), "Dear Hiring Manager,");
    }

    #[test]
    fn test_long_date_format() {
        assert_eq!(format_long_date(fixed_date()), "January 5, 2025");
        assert_eq!(
            format_long_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            "December 31, 2025"
        );
    }

    #[test]
    fn test_render_is_idempotent_under_a_fixed_date() {
        let target = TargetInfo {
            author_name: "Jane Doe".to_string(),
            company_name: "Acme".to_string(),
            role_title: "Engineer".to_string(),
            ..TargetInfo::default()
        };
        let a = render_latex(&target, "Body paragraph.", fixed_date());
        let b = render_latex(&target, "Body paragraph.", fixed_date());
        assert_eq!(a, b);
    }

    #[test]
    fn test_disabled_contact_fields_never_reach_the_header() {
        let target = TargetInfo {
            author_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            is_email_enabled: false,
            phone: "+1 555 0100".to_string(),
            is_phone_enabled: false,
            city_state: "Lisbon, Portugal".to_string(),
            is_city_state_enabled: false,
            portfolio_url: "https://janedoe.dev".to_string(),
            is_portfolio_url_enabled: false,
            ..TargetInfo::default()
        };
        let doc = render_latex(&target, "Body.", fixed_date());
        assert!(!doc.contains("jane@example.com"));
        assert!(!doc.contains("+1 555 0100"));
        assert!(!doc.contains("Lisbon"));
        assert!(!doc.contains("janedoe.dev"));
    }

    #[test]
    fn test_enabled_contact_fields_are_joined_with_a_middle_dot() {
        let target = TargetInfo {
            author_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            ..TargetInfo::default()
        };
        let doc = render_latex(&target, "Body.", fixed_date());
        assert!(doc.contains("\\href{mailto:jane@example.com}"));
        assert!(doc.contains(" $\\cdot$ "));
        assert!(doc.contains("+1 555 0100"));
    }

    #[test]
    fn test_portfolio_display_text_drops_protocol_and_www() {
        let target = TargetInfo {
            portfolio_url: "https://www.janedoe.dev".to_string(),
            ..TargetInfo::default()
        };
        let doc = render_latex(&target, "Body.", fixed_date());
        assert!(doc.contains("\\href{https://www.janedoe.dev}{janedoe.dev}"));
    }

    #[test]
    fn test_subject_line_only_when_role_present() {
        let without_role = render_latex(&TargetInfo::default(), "Body.", fixed_date());
        assert!(!without_role.contains("RE: Application"));

        let target = TargetInfo {
            role_title: "Senior Engineer".to_string(),
            ..TargetInfo::default()
        };
        let with_role = render_latex(&target, "Body.", fixed_date());
        assert!(with_role.contains("RE: Application for Senior Engineer"));
    }

    #[test]
    fn test_subject_line_appends_job_id_in_parentheses() {
        let target = TargetInfo {
            role_title: "Senior Engineer".to_string(),
            job_id: "REQ-42".to_string(),
            ..TargetInfo::default()
        };
        let doc = render_latex(&target, "Body.", fixed_date());
        assert!(doc.contains("RE: Application for Senior Engineer (REQ-42)"));
    }

    #[test]
    fn test_greeting_falls_back_to_hiring_manager() {
        let doc = render_latex(&TargetInfo::default(), "Body.", fixed_date());
        assert!(doc.contains("Dear Hiring Manager,"));
    }

    #[test]
    fn test_addressee_block_lines_in_order_and_omitted_when_empty() {
        let target = TargetInfo {
            addressee: "Dr. Chen".to_string(),
            company_name: "Acme".to_string(),
            ..TargetInfo::default()
        };
        let doc = render_latex(&target, "Body.", fixed_date());
        assert!(doc.contains("Dr. Chen \\\\\nAcme"));
        // company_address empty, so no trailing line break after Acme
        assert!(!doc.contains("Acme \\\\"));
    }

    #[test]
    fn test_body_line_breaks_become_latex_breaks_and_blank_lines_split_paragraphs() {
        let body = "first line\nsecond line\n\nsecond paragraph";
        let doc = render_latex(&TargetInfo::default(), body, fixed_date());
        assert!(doc.contains("first line \\\\\nsecond line"));
        assert!(doc.contains("second line\n\nsecond paragraph"));
    }

    #[test]
    fn test_body_special_characters_are_escaped() {
        let doc = render_latex(
            &TargetInfo::default(),
            "Cut costs by 40% at R&D",
            fixed_date(),
        );
        assert!(doc.contains("Cut costs by 40\\% at R\\&D"));
    }

    #[test]
    fn test_sign_off_and_signature() {
        let target = TargetInfo {
            author_name: "Jane Doe".to_string(),
            ..TargetInfo::default()
        };
        let doc = render_latex(&target, "Body.", fixed_date());
        assert!(doc.contains("Sincerely,"));
        let sincerely = doc.rfind("Sincerely,").unwrap();
        let signature = doc.rfind("Jane Doe").unwrap();
        assert!(signature > sincerely);
    }

    #[test]
    fn test_document_is_structurally_complete() {
        let doc = render_latex(&TargetInfo::default(), "Body.", fixed_date());
        assert!(doc.starts_with("\\documentclass"));
        assert!(doc.contains("\\begin{document}"));
        assert!(doc.trim_end().ends_with("\\end{document}"));
    }
}
