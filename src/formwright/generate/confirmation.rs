use crate::error::Result;
use crate::generate::html::{escape_text, SMS_CONSENT_NAME};
use crate::generate::templates;
use crate::settings::{ConfirmationSettings, DEFAULT_BODY, DEFAULT_HEADING};
use pulldown_cmark::{html, Parser};
use serde::Serialize;

#[derive(Serialize)]
struct ConfirmationContext<'a> {
    secret_key: &'a str,
    form_name: &'a str,
    email_subject: &'a str,
    notification_emails: &'a str,
    heading: String,
    body: String,
    sms: bool,
    sms_field: &'static str,
}

/// Renders Markdown to an HTML fragment without a trailing newline.
fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out.trim_end().to_string()
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

pub fn render_confirmation(settings: &ConfirmationSettings) -> Result<String> {
    let context = ConfirmationContext {
        secret_key: &settings.recaptcha_secret_key,
        form_name: &settings.form_name,
        email_subject: &settings.email_subject,
        notification_emails: &settings.notification_emails,
        heading: escape_text(or_default(&settings.confirmation_heading, DEFAULT_HEADING).trim()),
        body: markdown_to_html(or_default(&settings.confirmation_body, DEFAULT_BODY)),
        sms: settings.enable_sms,
        sms_field: SMS_CONSENT_NAME,
    };
    templates::render("confirmation.php", &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ConfirmationSettings {
        let mut s = ConfirmationSettings::default();
        s.recaptcha_secret_key = "sec'ret".into();
        s.form_name = "Contact".into();
        s.email_subject = "New lead".into();
        s.notification_emails = "a@x.com, b@x.com".into();
        s
    }

    #[test]
    fn verifies_captcha_with_fixed_post_shape() {
        let php = render_confirmation(&configured()).unwrap();
        assert!(php.contains("https://www.google.com/recaptcha/api/siteverify"));
        assert!(php.contains("'secret' => 'sec\\'ret'"));
        assert!(php.contains("$_POST['g-recaptcha-response']"));
        assert!(php.contains("'remoteip' => $_SERVER['REMOTE_ADDR']"));
    }

    #[test]
    fn hands_settings_to_the_logger() {
        let php = render_confirmation(&configured()).unwrap();
        assert!(php.contains("$logger->setFormName('Contact');"));
        assert!(php.contains("$logger->setcustomEmailSubject('New lead');"));
        assert!(php.contains("$logger->setNotificationEmailAddresses('a@x.com, b@x.com');"));
        assert!(php.contains("$logger->setFormId('f_l_');"));
    }

    #[test]
    fn distinguishes_the_three_failure_paths() {
        let php = render_confirmation(&configured()).unwrap();
        assert!(php.contains("There was a problem verifying your submission."));
        assert!(php.contains("Please try your submission again or contact us for assistance."));
        assert!(php.contains("Looks like you forgot something!"));
    }

    #[test]
    fn custom_copy_is_escaped_and_rendered() {
        let mut s = configured();
        s.confirmation_heading = "Thanks <friend>".into();
        s.confirmation_body = "We'll call **soon**.".into();
        let php = render_confirmation(&s).unwrap();
        assert!(php.contains("<h1>Thanks &lt;friend&gt;</h1>"));
        assert!(php.contains("<p>We\\'ll call <strong>soon</strong>.</p>"));
    }

    #[test]
    fn sms_consent_is_forwarded_only_when_enabled() {
        let mut s = configured();
        assert!(!render_confirmation(&s).unwrap().contains(SMS_CONSENT_NAME));
        s.enable_sms = true;
        let php = render_confirmation(&s).unwrap();
        assert!(php.contains("$_POST['form_logger_sms_consent'] = !empty("));
    }

    #[test]
    fn blank_copy_uses_defaults() {
        let mut s = configured();
        s.confirmation_heading = " ".into();
        s.confirmation_body = String::new();
        let php = render_confirmation(&s).unwrap();
        assert!(php.contains("<h1>Thank you!</h1>"));
        assert!(php.contains("We have received your information"));
    }
}
