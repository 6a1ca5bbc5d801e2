use crate::validation::pattern;
use crate::validation::phone::digit_count;
use crate::validation::rules::{Rule, RuleSet};

/// A submitted value as the preview sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
    Choice(Option<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s.trim(),
            FieldValue::Checked(true) => "on",
            FieldValue::Checked(false) => "",
            FieldValue::Choice(choice) => choice.as_deref().map(str::trim).unwrap_or(""),
        }
    }

    fn is_checked(&self) -> bool {
        match self {
            FieldValue::Checked(b) => *b,
            other => !other.as_text().is_empty(),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Runs `rules` against `value` and returns the first failing message.
///
/// An empty value only fails a presence rule; the other rules are skipped so
/// optional fields may stay blank.
pub fn check(rules: &RuleSet, value: &FieldValue) -> Option<String> {
    let text = value.as_text();

    if text.is_empty() {
        return rules
            .rules
            .iter()
            .find(|rule| rule.is_presence())
            .map(|rule| rule.message().to_string());
    }

    rules
        .rules
        .iter()
        .find(|rule| !passes(rule, text, value))
        .map(|rule| rule.message().to_string())
}

fn passes(rule: &Rule, text: &str, value: &FieldValue) -> bool {
    match rule {
        Rule::Required { .. } => !text.is_empty(),
        Rule::Checked { .. } => value.is_checked(),
        Rule::MinLength { min, .. } => text.chars().count() >= *min,
        Rule::MaxLength { max, .. } => text.chars().count() <= *max,
        Rule::Pattern { pattern: source, .. } => pattern::matches(source, text),
        Rule::DigitCount { count, .. } => digit_count(text) == *count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnSpan, CustomValidation, Element, ElementType, Validation};
    use crate::validation::rules::compile;

    fn rules_for(kind: ElementType, validation: Option<Validation>) -> RuleSet {
        let mut el = Element::new(kind, ColumnSpan::One);
        el.label = "Field".into();
        el.validation = validation;
        compile(&el)
    }

    #[test]
    fn zip_accepts_five_digits_only() {
        let rules = rules_for(ElementType::Text, Some(Validation::Zip));
        assert_eq!(check(&rules, &FieldValue::text("02134")), None);
        assert!(check(&rules, &FieldValue::text("0213")).is_some());
        assert!(check(&rules, &FieldValue::text("ABCDE")).is_some());
    }

    #[test]
    fn tel_counts_digits() {
        let rules = rules_for(ElementType::Tel, None);
        assert_eq!(check(&rules, &FieldValue::text("(555) 123-4567")), None);
        assert_eq!(
            check(&rules, &FieldValue::text("555-123")).as_deref(),
            Some("Phone number must be 10 digits")
        );
    }

    #[test]
    fn email_syntax() {
        let rules = rules_for(ElementType::Email, None);
        assert_eq!(check(&rules, &FieldValue::text("a@b.co")), None);
        assert_eq!(
            check(&rules, &FieldValue::text("a@b")).as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            check(&rules, &FieldValue::text("  ")).as_deref(),
            Some("Field is required")
        );
    }

    #[test]
    fn optional_blank_field_passes() {
        let rules = rules_for(
            ElementType::Text,
            Some(Validation::Custom(CustomValidation {
                min_length: Some(3),
                ..Default::default()
            })),
        );
        assert_eq!(check(&rules, &FieldValue::text("")), None);
        assert!(check(&rules, &FieldValue::text("ab")).is_some());
        assert_eq!(check(&rules, &FieldValue::text("abc")), None);
    }

    #[test]
    fn name_rejects_digits() {
        let rules = rules_for(ElementType::Text, Some(Validation::Name));
        assert_eq!(check(&rules, &FieldValue::text("Mary-Ann O'Neil")), None);
        assert_eq!(
            check(&rules, &FieldValue::text("R2D2")).as_deref(),
            Some("Please enter a valid name")
        );
        assert_eq!(
            check(&rules, &FieldValue::text("J")).as_deref(),
            Some("Field must be at least 2 characters")
        );
    }

    #[test]
    fn checkbox_must_be_ticked() {
        let mut el = Element::new(ElementType::Checkbox, ColumnSpan::One);
        el.label = "Terms".into();
        el.required = true;
        let rules = compile(&el);
        assert!(check(&rules, &FieldValue::Checked(false)).is_some());
        assert_eq!(check(&rules, &FieldValue::Checked(true)), None);
    }

    #[test]
    fn choice_needs_a_selection() {
        let mut el = Element::new(ElementType::Select, ColumnSpan::One);
        el.label = "State".into();
        el.required = true;
        let rules = compile(&el);
        assert!(check(&rules, &FieldValue::Choice(None)).is_some());
        assert_eq!(
            check(&rules, &FieldValue::Choice(Some("Ohio".into()))),
            None
        );
    }

    #[test]
    fn lookahead_pattern_is_enforced() {
        let rules = rules_for(
            ElementType::Text,
            Some(Validation::Custom(CustomValidation {
                pattern: Some(r"^(?=.*\d).{8,}$".into()),
                pattern_message: Some("Needs a digit".into()),
                ..Default::default()
            })),
        );
        assert_eq!(check(&rules, &FieldValue::text("abcdefg1")), None);
        assert_eq!(
            check(&rules, &FieldValue::text("abcdefgh")).as_deref(),
            Some("Needs a digit")
        );
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let rules = rules_for(
            ElementType::Text,
            Some(Validation::Custom(CustomValidation {
                max_length: Some(3),
                ..Default::default()
            })),
        );
        assert_eq!(check(&rules, &FieldValue::text("日本語")), None);
        assert!(check(&rules, &FieldValue::text("日本語x")).is_some());
    }
}
