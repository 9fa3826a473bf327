//! Export filename convention: `<ISO date>_<company>_<role>.<ext>`.

use chrono::NaiveDate;

use crate::models::target::TargetInfo;

/// Replaces every character outside `[A-Za-z0-9]` with `_`, one-for-one.
/// An empty value falls back to the given literal instead.
pub fn sanitize_segment(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        return fallback.to_string();
    }
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Builds the download filename for an export in the given format.
pub fn export_filename(target: &TargetInfo, extension: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.{extension}",
        date.format("%Y-%m-%d"),
        sanitize_segment(&target.company_name, "Company"),
        sanitize_segment(&target.role_title, "Role"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    #[test]
    fn test_sanitize_replaces_each_non_alphanumeric_one_for_one() {
        assert_eq!(sanitize_segment("Acme & Co.", "Company"), "Acme___Co_");
        assert_eq!(sanitize_segment("Senior Dev/Ops", "Role"), "Senior_Dev_Ops");
    }

    #[test]
    fn test_empty_segments_fall_back_to_literals() {
        assert_eq!(sanitize_segment("", "Company"), "Company");
        assert_eq!(sanitize_segment("", "Role"), "Role");
    }

    #[test]
    fn test_export_filename_format() {
        let target = TargetInfo {
            company_name: "Acme & Co.".to_string(),
            role_title: "Senior Dev/Ops".to_string(),
            ..TargetInfo::default()
        };
        assert_eq!(
            export_filename(&target, "pdf", fixed_date()),
            "2025-01-05_Acme___Co__Senior_Dev_Ops.pdf"
        );
    }

    #[test]
    fn test_export_filename_with_empty_target() {
        assert_eq!(
            export_filename(&TargetInfo::default(), "tex", fixed_date()),
            "2025-01-05_Company_Role.tex"
        );
    }
}
