//! Live preview validation.
//!
//! Mirrors what the exported validator does in the browser, so a session can
//! try values against a form before exporting it. Errors are data: a map from
//! element id to message, never an `Err`.

use crate::model::{Document, Element, ElementId};
use crate::validation::{check, compile, format_phone, FieldValue, InputFormat};
use std::collections::{BTreeMap, HashMap};

/// Outcome of one simulated input event on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveInput {
    /// The value after display formatting; what the input box shows.
    pub display: String,
    pub error: Option<String>,
}

/// Applies the field's display transform, then re-checks it.
pub fn live_input(element: &Element, raw: &str) -> LiveInput {
    let rules = compile(element);
    let display = match rules.format {
        Some(InputFormat::Phone) => format_phone(raw),
        None => raw.to_string(),
    };
    let error = check(&rules, &FieldValue::Text(display.clone()));
    LiveInput { display, error }
}

/// Validates every real element. Missing values count as blank.
pub fn validate_form(
    document: &Document,
    values: &HashMap<ElementId, FieldValue>,
) -> BTreeMap<ElementId, String> {
    let blank = FieldValue::default();
    document
        .all_elements()
        .into_iter()
        .filter_map(|element| {
            let rules = compile(element);
            let value = values.get(&element.id).unwrap_or(&blank);
            let value = match (rules.format, value) {
                (Some(InputFormat::Phone), FieldValue::Text(raw)) => {
                    FieldValue::Text(format_phone(raw))
                }
                _ => value.clone(),
            };
            check(&rules, &value).map(|message| (element.id.clone(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnSpan, ElementType, Row, Validation};

    fn element(kind: ElementType, label: &str) -> Element {
        let mut el = Element::new(kind, ColumnSpan::One);
        el.label = label.into();
        el
    }

    #[test]
    fn phone_input_is_formatted_before_validation() {
        let tel = element(ElementType::Tel, "Phone");
        let full = live_input(&tel, "5551234567");
        assert_eq!(full.display, "(555) 123-4567");
        assert_eq!(full.error, None);

        let short = live_input(&tel, "555-123");
        assert_eq!(short.display, "(555) 123");
        assert_eq!(short.error.as_deref(), Some("Phone number must be 10 digits"));
    }

    #[test]
    fn zip_live_check() {
        let mut zip = element(ElementType::Text, "Zip");
        zip.validation = Some(Validation::Zip);
        assert_eq!(live_input(&zip, "02134").error, None);
        assert!(live_input(&zip, "0213").error.is_some());
        assert!(live_input(&zip, "ABCDE").error.is_some());
    }

    #[test]
    fn whole_form_reports_per_field_messages() {
        let email = element(ElementType::Email, "Email");
        let mut name = element(ElementType::Text, "Name");
        name.required = true;
        let notes = element(ElementType::Textarea, "Notes");
        let doc = Document {
            rows: vec![
                Row::with_placeholders(ColumnSpan::Two),
                Row::new(vec![email.clone(), name.clone(), notes]),
            ],
        };

        let mut values = HashMap::new();
        values.insert(email.id.clone(), FieldValue::text("nope"));
        let errors = validate_form(&doc, &values);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&email.id], "Please enter a valid email address");
        assert_eq!(errors[&name.id], "Name is required");

        values.insert(email.id.clone(), FieldValue::text("a@b.io"));
        values.insert(name.id.clone(), FieldValue::text("Ada"));
        assert!(validate_form(&doc, &values).is_empty());
    }
}
