use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Per-letter metadata: the recipient company/role plus the author's contact
/// fields, each gated by its own visibility toggle.
///
/// A disabled field must never appear in prompt text or rendered output,
/// even when populated. The `visible_*` accessors are the single place that
/// rule is enforced; prompt builder and renderers go through them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetInfo {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub role_title: String,
    #[serde(default)]
    pub addressee: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city_state: String,
    #[serde(default)]
    pub portfolio_url: String,
    #[serde(default)]
    pub company_address: String,
    #[serde(default)]
    pub job_id: String,
    #[serde(default = "default_true")]
    pub is_email_enabled: bool,
    #[serde(default = "default_true")]
    pub is_phone_enabled: bool,
    #[serde(default = "default_true")]
    pub is_city_state_enabled: bool,
    #[serde(default = "default_true")]
    pub is_portfolio_url_enabled: bool,
}

impl Default for TargetInfo {
    fn default() -> Self {
        TargetInfo {
            company_name: String::new(),
            role_title: String::new(),
            addressee: String::new(),
            author_name: String::new(),
            email: String::new(),
            phone: String::new(),
            city_state: String::new(),
            portfolio_url: String::new(),
            company_address: String::new(),
            job_id: String::new(),
            is_email_enabled: true,
            is_phone_enabled: true,
            is_city_state_enabled: true,
            is_portfolio_url_enabled: true,
        }
    }
}

impl TargetInfo {
    pub fn visible_email(&self) -> Option<&str> {
        visible(self.is_email_enabled, &self.email)
    }

    pub fn visible_phone(&self) -> Option<&str> {
        visible(self.is_phone_enabled, &self.phone)
    }

    pub fn visible_city_state(&self) -> Option<&str> {
        visible(self.is_city_state_enabled, &self.city_state)
    }

    pub fn visible_portfolio_url(&self) -> Option<&str> {
        visible(self.is_portfolio_url_enabled, &self.portfolio_url)
    }

    /// Name used in the greeting and the addressee block when no explicit
    /// addressee is set.
    pub fn greeting_name(&self) -> &str {
        if self.addressee.is_empty() {
            "Hiring Manager"
        } else {
            &self.addressee
        }
    }
}

fn visible(enabled: bool, value: &str) -> Option<&str> {
    if enabled && !value.is_empty() {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_default_to_true() {
        let info: TargetInfo = serde_json::from_str(r#"{"company_name":"Acme"}"#).unwrap();
        assert!(info.is_email_enabled);
        assert!(info.is_phone_enabled);
        assert!(info.is_city_state_enabled);
        assert!(info.is_portfolio_url_enabled);
    }

    #[test]
    fn test_disabled_field_is_not_visible_even_when_populated() {
        let info = TargetInfo {
            email: "jane@example.com".to_string(),
            is_email_enabled: false,
            ..TargetInfo::default()
        };
        assert_eq!(info.visible_email(), None);
    }

    #[test]
    fn test_enabled_empty_field_is_not_visible() {
        let info = TargetInfo::default();
        assert_eq!(info.visible_phone(), None);
    }

    #[test]
    fn test_enabled_populated_field_is_visible() {
        let info = TargetInfo {
            phone: "+1 555 0100".to_string(),
            ..TargetInfo::default()
        };
        assert_eq!(info.visible_phone(), Some("+1 555 0100"));
    }

    #[test]
    fn test_greeting_name_falls_back_to_hiring_manager() {
        let info = TargetInfo::default();
        assert_eq!(info.greeting_name(), "Hiring Manager");

        let named = TargetInfo {
            addressee: "Dr. Chen".to_string(),
            ..TargetInfo::default()
        };
        assert_eq!(named.greeting_name(), "Dr. Chen");
    }
}
