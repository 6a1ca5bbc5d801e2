//! Form-level export metadata, independent of the document structure.

use crate::error::{FormError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBMIT_TITLE: &str = "Submit";
pub const DEFAULT_HEADING: &str = "Thank you!";
pub const DEFAULT_BODY: &str = "We have received your information and will get back to you shortly.";
pub const DEFAULT_PRIMARY_COLOR: &str = "#4f46e5";
pub const DEFAULT_SECONDARY_COLOR: &str = "#4338ca";
pub const DEFAULT_FORM_ACTION: &str = "/custom-confirmation.html";

/// Every settings key, in display order.
pub const KEYS: [&str; 12] = [
    "recaptcha-site-key",
    "recaptcha-secret-key",
    "form-name",
    "email-subject",
    "notification-emails",
    "submit-title",
    "enable-sms",
    "confirmation-heading",
    "confirmation-body",
    "primary-color",
    "secondary-color",
    "form-action",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfirmationSettings {
    pub recaptcha_site_key: String,
    pub recaptcha_secret_key: String,
    pub form_name: String,
    pub email_subject: String,
    /// Comma separated recipient list, passed through as typed.
    pub notification_emails: String,
    pub submit_title: String,
    pub enable_sms: bool,
    pub confirmation_heading: String,
    /// Markdown.
    pub confirmation_body: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub form_action: String,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            recaptcha_site_key: String::new(),
            recaptcha_secret_key: String::new(),
            form_name: String::new(),
            email_subject: String::new(),
            notification_emails: String::new(),
            submit_title: DEFAULT_SUBMIT_TITLE.to_string(),
            enable_sms: false,
            confirmation_heading: DEFAULT_HEADING.to_string(),
            confirmation_body: DEFAULT_BODY.to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            form_action: DEFAULT_FORM_ACTION.to_string(),
        }
    }
}

impl ConfirmationSettings {
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "recaptcha-site-key" => self.recaptcha_site_key.clone(),
            "recaptcha-secret-key" => self.recaptcha_secret_key.clone(),
            "form-name" => self.form_name.clone(),
            "email-subject" => self.email_subject.clone(),
            "notification-emails" => self.notification_emails.clone(),
            "submit-title" => self.submit_title.clone(),
            "enable-sms" => self.enable_sms.to_string(),
            "confirmation-heading" => self.confirmation_heading.clone(),
            "confirmation-body" => self.confirmation_body.clone(),
            "primary-color" => self.primary_color.clone(),
            "secondary-color" => self.secondary_color.clone(),
            "form-action" => self.form_action.clone(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "enable-sms" => {
                self.enable_sms = parse_bool(value)?;
                return Ok(());
            }
            "primary-color" | "secondary-color" if !is_color(value) => {
                return Err(FormError::Settings(format!(
                    "'{}' is not a color (expected #rgb or #rrggbb)",
                    value
                )));
            }
            "recaptcha-site-key" => &mut self.recaptcha_site_key,
            "recaptcha-secret-key" => &mut self.recaptcha_secret_key,
            "form-name" => &mut self.form_name,
            "email-subject" => &mut self.email_subject,
            "notification-emails" => &mut self.notification_emails,
            "submit-title" => &mut self.submit_title,
            "confirmation-heading" => &mut self.confirmation_heading,
            "confirmation-body" => &mut self.confirmation_body,
            "primary-color" => &mut self.primary_color,
            "secondary-color" => &mut self.secondary_color,
            "form-action" => &mut self.form_action,
            other => {
                return Err(FormError::Settings(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    other,
                    KEYS.join(", ")
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }

    /// Submit label, never blank.
    pub fn submit_label(&self) -> &str {
        let title = self.submit_title.trim();
        if title.is_empty() {
            DEFAULT_SUBMIT_TITLE
        } else {
            title
        }
    }
}

pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(FormError::Settings(format!(
            "'{}' is not a boolean (use true or false)",
            other
        ))),
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_theme() {
        let s = ConfirmationSettings::default();
        assert_eq!(s.submit_title, "Submit");
        assert_eq!(s.primary_color, "#4f46e5");
        assert_eq!(s.secondary_color, "#4338ca");
        assert!(!s.enable_sms);
    }

    #[test]
    fn set_and_get_round_trip_every_key() {
        let mut s = ConfirmationSettings::default();
        for key in KEYS {
            let value = match key {
                "enable-sms" => "true",
                "primary-color" | "secondary-color" => "#abc",
                _ => "value",
            };
            s.set(key, value).unwrap();
            assert_eq!(s.get(key).as_deref(), Some(value));
        }
        assert_eq!(s.list_all().len(), KEYS.len());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut s = ConfirmationSettings::default();
        assert!(matches!(s.set("colour", "x"), Err(FormError::Settings(_))));
        assert!(s.set("enable-sms", "maybe").is_err());
        assert!(s.set("primary-color", "red;}").is_err());
        assert_eq!(s.primary_color, DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn blank_submit_title_falls_back() {
        let mut s = ConfirmationSettings::default();
        s.set("submit-title", "  ").unwrap();
        assert_eq!(s.submit_label(), "Submit");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let s: ConfirmationSettings = serde_json::from_str(r#"{"form-name":"Signup"}"#).unwrap();
        assert_eq!(s.form_name, "Signup");
        assert_eq!(s.submit_title, "Submit");
    }
}
