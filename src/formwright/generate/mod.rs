//! # Generation
//!
//! Turns a [`Document`] plus [`ConfirmationSettings`] into the exported
//! artifacts. Everything here is a pure function of its inputs: no ids are
//! generated, no clock is read, so generating twice yields identical bytes.
//!
//! The field plan ([`plan`]) is computed once per call and shared by the HTML
//! and the validator script, which keeps `name`/`id` attributes and the
//! script's field table in agreement.
//!
//! Field names are `form_logger_` followed by the label, trimmed, lowercased,
//! with whitespace runs replaced by `_`. That scheme is what the external log
//! ingestion keys on, so it must not drift between releases. Blank labels use
//! the element's 1-based position (`form_logger_field_3`); repeated labels get
//! a numeric suffix (`_2`, `_3`).

use crate::error::Result;
use crate::model::{Document, Element};
use crate::settings::ConfirmationSettings;
use crate::validation::{compile, RuleSet};
use std::collections::HashMap;

pub mod confirmation;
pub mod css;
pub mod html;
pub mod script;
pub mod templates;

pub const NAME_PREFIX: &str = "form_logger_";

/// One exported field: the element plus its resolved attributes and rules.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub element: &'a Element,
    pub name: String,
    pub id: String,
    pub rules: RuleSet,
}

impl Field<'_> {
    pub fn error_id(&self) -> String {
        format!("{}-error", self.id)
    }

    pub fn label_id(&self) -> String {
        format!("{}-label", self.id)
    }
}

/// All generated artifacts for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Artifacts {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }
}

fn slug(label: &str, separator: &str) -> String {
    label
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn id_slug(label: &str) -> String {
    slug(label, "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Hands out unique values, suffixing repeats with `{sep}2`, `{sep}3`, ...
struct Uniquifier {
    seen: HashMap<String, usize>,
    separator: &'static str,
}

impl Uniquifier {
    fn new(separator: &'static str, reserved: &[&str]) -> Self {
        let seen = reserved.iter().map(|r| (r.to_string(), 1)).collect();
        Self { seen, separator }
    }

    fn claim(&mut self, base: String) -> String {
        let mut count = self.seen.get(&base).copied().unwrap_or(0);
        loop {
            count += 1;
            let candidate = if count == 1 {
                base.clone()
            } else {
                format!("{}{}{}", base, self.separator, count)
            };
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(base.clone(), count);
                self.seen.insert(candidate.clone(), 1);
                return candidate;
            }
        }
    }
}

/// Exported rows in document order, placeholders dropped, empty rows dropped.
pub fn plan(document: &Document) -> Vec<Vec<Field<'_>>> {
    let mut names = Uniquifier::new("_", &[html::SMS_CONSENT_NAME]);
    let mut ids = Uniquifier::new(
        "-",
        &[html::FORM_ID, html::SMS_CONSENT_ID, html::RECAPTCHA_ERROR_ID],
    );
    let mut ordinal = 0;

    document
        .rows
        .iter()
        .map(|row| {
            row.real_elements()
                .map(|element| {
                    ordinal += 1;
                    let name_slug = slug(&element.label, "_");
                    let name = if name_slug.is_empty() {
                        format!("{}field_{}", NAME_PREFIX, ordinal)
                    } else {
                        format!("{}{}", NAME_PREFIX, name_slug)
                    };
                    let id_base = match id_slug(&element.label) {
                        s if s.is_empty() => format!("field-{}", ordinal),
                        s => s,
                    };
                    Field {
                        element,
                        name: names.claim(name),
                        id: ids.claim(id_base),
                        rules: compile(element),
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect()
}

pub fn generate_html(document: &Document, settings: &ConfirmationSettings) -> String {
    log::trace!("generating html for {} rows", document.rows.len());
    let rows = plan(document);
    if rows.is_empty() {
        return String::new();
    }
    html::render_form(&rows, settings)
}

pub fn generate_css(settings: &ConfirmationSettings) -> String {
    log::trace!("generating css");
    css::render_css(settings)
}

pub fn generate_javascript(document: &Document, settings: &ConfirmationSettings) -> Result<String> {
    log::trace!("generating validator script");
    let rows = plan(document);
    if rows.is_empty() {
        return Ok(String::new());
    }
    let fields: Vec<&Field<'_>> = rows.iter().flatten().collect();
    script::render_script(&fields, settings)
}

pub fn generate_confirmation_snippet(settings: &ConfirmationSettings) -> Result<String> {
    log::trace!("generating confirmation snippet");
    confirmation::render_confirmation(settings)
}

/// HTML, CSS and JS together; all three empty when the form has no fields.
pub fn generate(document: &Document, settings: &ConfirmationSettings) -> Result<Artifacts> {
    if !document.has_real_elements() {
        return Ok(Artifacts::default());
    }
    Ok(Artifacts {
        html: generate_html(document, settings),
        css: generate_css(settings),
        js: generate_javascript(document, settings)?,
    })
}

#[derive(serde::Serialize)]
struct PageContext {
    title: String,
    form: String,
}

/// A standalone page around the form, linking `form.css` and `form.js`.
pub fn generate_page(document: &Document, settings: &ConfirmationSettings) -> Result<String> {
    let form = generate_html(document, settings);
    let title = match settings.form_name.trim() {
        "" => "Form".to_string(),
        name => name.to_string(),
    };
    templates::render(
        "page.html",
        &PageContext {
            title,
            form: form.trim_end().to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_element::{self, Placement};
    use crate::commands::{add_row, update};
    use crate::model::{ColumnSpan, ElementPatch, ElementType};

    fn with_labels(labels: &[(ElementType, &str)]) -> Document {
        let mut doc = Document::new();
        for (kind, label) in labels {
            let result = add_element::run(&doc, *kind, Placement::default());
            let id = result.created_element().unwrap().id.clone();
            doc = update::run(&result.document, &id, &ElementPatch::new().label(*label)).document;
        }
        doc
    }

    #[test]
    fn names_follow_the_prefix_scheme() {
        let doc = with_labels(&[
            (ElementType::Text, "First  Name "),
            (ElementType::Email, "Email"),
            (ElementType::Text, ""),
        ]);
        let rows = plan(&doc);
        let names: Vec<_> = rows[0].iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["form_logger_first_name", "form_logger_email", "form_logger_field_3"]
        );
        assert_eq!(rows[0][0].id, "first-name");
        assert_eq!(rows[0][2].id, "field-3");
    }

    #[test]
    fn repeated_labels_get_suffixes() {
        let doc = with_labels(&[
            (ElementType::Text, "Name"),
            (ElementType::Text, "Name"),
            (ElementType::Text, "name"),
        ]);
        let rows = plan(&doc);
        let names: Vec<_> = rows[0].iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["form_logger_name", "form_logger_name_2", "form_logger_name_3"]
        );
        let ids: Vec<_> = rows[0].iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "name-2", "name-3"]);
    }

    #[test]
    fn reserved_ids_are_not_reused() {
        let doc = with_labels(&[(ElementType::Checkbox, "SMS consent")]);
        let rows = plan(&doc);
        assert_eq!(rows[0][0].id, "sms-consent-2");
        assert_eq!(rows[0][0].name, "form_logger_sms_consent_2");
    }

    #[test]
    fn placeholder_only_document_generates_nothing() {
        let doc = add_row::run(&Document::new(), ColumnSpan::Three).document;
        let settings = ConfirmationSettings::default();
        assert_eq!(generate_html(&doc, &settings), "");
        assert_eq!(generate_javascript(&doc, &settings).unwrap(), "");
        assert!(generate(&doc, &settings).unwrap().is_empty());
        assert!(generate(&Document::new(), &settings).unwrap().is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let doc = with_labels(&[
            (ElementType::Text, "Name"),
            (ElementType::Tel, "Phone"),
            (ElementType::Radio, "Size"),
        ]);
        let settings = ConfirmationSettings::default();
        let first = generate(&doc, &settings).unwrap();
        let second = generate(&doc, &settings).unwrap();
        assert_eq!(first, second);
        assert!(!first.html.contains("element-"));
    }

    #[test]
    fn scenario_two_column_row_with_one_required_text() {
        let doc = add_row::run(&Document::new(), ColumnSpan::Two).document;
        let row_id = doc.rows[0].id.clone();
        let result = add_element::run(&doc, ElementType::Text, Placement::at(row_id, 0));
        let id = result.created_element().unwrap().id.clone();
        let patch = ElementPatch::new().label("First Name").required(true);
        let doc = update::run(&result.document, &id, &patch).document;

        let html = generate_html(&doc, &ConfirmationSettings::default());
        assert_eq!(html.matches("<input").count(), 1);
        assert!(html.contains(
            "<input type=\"text\" id=\"first-name\" name=\"form_logger_first_name\" required"
        ));
        assert!(html.contains("First Name<span class=\"required\">*</span>"));
        assert_eq!(html.matches("class=\"form-col-2\"").count(), 1);
        assert!(!html.contains("Drop elements here"));
        assert!(!html.contains("placeholder-"));
    }

    #[test]
    fn html_carries_captcha_submit_and_error_containers() {
        let mut settings = ConfirmationSettings::default();
        settings.recaptcha_site_key = "site-key".into();
        settings.submit_title = "Send".into();
        let doc = with_labels(&[(ElementType::Email, "Email")]);
        let html = generate_html(&doc, &settings);
        assert!(html.contains("<div class=\"g-recaptcha\" data-sitekey=\"site-key\"></div>"));
        assert!(html.contains("<button type=\"submit\" class=\"submit-button\">Send</button>"));
        assert!(html.contains("id=\"email-error\""));
        assert!(html.contains("action=\"/custom-confirmation.html\" method=\"POST\""));
        assert!(!html.contains("sms-consent"));

        settings.enable_sms = true;
        let html = generate_html(&doc, &settings);
        assert!(html.contains("name=\"form_logger_sms_consent\""));
        assert!(html.contains("id=\"sms-consent-error\""));
    }

    #[test]
    fn choice_controls_use_data_attributes_for_required() {
        let doc = with_labels(&[(ElementType::Radio, "Size"), (ElementType::Checkbox, "Agree")]);
        let mut doc = doc;
        for row in &mut doc.rows {
            for el in &mut row.elements {
                el.required = true;
            }
        }
        let html = generate_html(&doc, &ConfirmationSettings::default());
        assert!(!html.contains(" required"));
        assert_eq!(html.matches("data-validate-required").count(), 3);
        assert!(html.contains("<input type=\"radio\" id=\"size-0\" name=\"form_logger_size\" value=\"Option 1\""));
    }

    #[test]
    fn radio_group_is_named_by_its_label() {
        let doc = with_labels(&[(ElementType::Radio, "Size")]);
        let html = generate_html(&doc, &ConfirmationSettings::default());
        assert!(html.contains("<label id=\"size-label\">Size</label>"));
        assert!(html.contains(
            "<div class=\"radio-group\" id=\"size\" role=\"radiogroup\" aria-labelledby=\"size-label\">"
        ));
        assert!(!html.contains("for=\"size\""));
        assert!(html.contains("<label for=\"size-0\">Option 1</label>"));
    }

    #[test]
    fn select_starts_with_a_disabled_prompt() {
        let mut doc = with_labels(&[(ElementType::Select, "Color")]);
        let id = doc.rows[0].elements[0].id.clone();
        doc = crate::commands::options::add(&doc, &id, "Red").document;
        let html = generate_html(&doc, &ConfirmationSettings::default());
        assert!(html.contains("<option value=\"\" disabled selected>Select an option</option>"));
        assert!(html.contains("<option value=\"Red\">Red</option>"));
    }

    #[test]
    fn script_registers_every_field_and_the_submit_gate() {
        let doc = with_labels(&[(ElementType::Tel, "Phone"), (ElementType::Email, "Email")]);
        let js = generate_javascript(&doc, &ConfirmationSettings::default()).unwrap();
        assert!(js.contains("\"name\": \"form_logger_phone\""));
        assert!(js.contains("\"errorId\": \"email-error\""));
        assert!(js.contains("\"format\": \"phone\""));
        assert!(js.contains("\"kind\": \"digitCount\""));
        assert!(js.contains("var REQUIRE_SMS_CONSENT = false;"));
        assert!(js.contains("addEventListener('submit'"));
        assert!(js.contains("document.getElementById('form-logger')"));
    }

    #[test]
    fn script_cannot_close_its_own_tag() {
        let doc = with_labels(&[(ElementType::Text, "</script><b>")]);
        let js = generate_javascript(&doc, &ConfirmationSettings::default()).unwrap();
        assert!(!js.contains("</script>"));
    }

    #[test]
    fn script_counts_length_in_code_points() {
        let doc = with_labels(&[(ElementType::Text, "Name")]);
        let js = generate_javascript(&doc, &ConfirmationSettings::default()).unwrap();
        assert!(js.contains("return Array.from(value).length >= rule.min;"));
        assert!(js.contains("return Array.from(value).length <= rule.max;"));
        assert!(!js.contains("return value.length >= rule.min;"));
    }

    #[test]
    fn page_links_the_other_artifacts() {
        let doc = with_labels(&[(ElementType::Text, "Name")]);
        let mut settings = ConfirmationSettings::default();
        settings.form_name = "Sign <up>".into();
        let page = generate_page(&doc, &settings).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Sign &lt;up&gt;</title>"));
        assert!(page.contains("<link rel=\"stylesheet\" href=\"form.css\">"));
        assert!(page.contains("<script src=\"form.js\"></script>"));
        assert!(page.contains("form_logger_name"));
    }
}
