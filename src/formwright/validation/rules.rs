//! Compiles an [`Element`] into the constraint list enforced by the live
//! preview and by the exported client-side validator.
//!
//! An explicit `validation` on a text-like or select element wins over every
//! type-based default, including the built-in email and tel rules.

use crate::model::{CustomValidation, Element, ElementType, Validation};
use crate::validation::pattern::browser_pattern;
use serde::Serialize;

pub const NAME_PATTERN: &str = r"^[A-Za-z\s\-']+$";
pub const STREET_PATTERN: &str = r"^[A-Za-z0-9\s.,\-]+$";
pub const ZIP_PATTERN: &str = r"^[0-9]{5}$";
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const PHONE_DIGITS: usize = 10;

const FALLBACK_LABEL: &str = "This field";
const DEFAULT_PATTERN_MESSAGE: &str = "Invalid format";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rule {
    /// Non-empty after trimming; for choices, something selected.
    Required { message: String },
    /// Checkbox must be ticked.
    Checked { message: String },
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    Pattern { pattern: String, message: String },
    /// Exactly `count` digits, ignoring punctuation.
    DigitCount { count: usize, message: String },
}

impl Rule {
    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::Checked { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::DigitCount { message, .. } => message,
        }
    }

    pub fn is_presence(&self) -> bool {
        matches!(self, Rule::Required { .. } | Rule::Checked { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub label: String,
    pub rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<InputFormat>,
    /// `inputmode` hint for the rendered control.
    #[serde(skip)]
    pub input_mode: Option<&'static str>,
}

impl RuleSet {
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(Rule::is_presence)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The label used in messages; blank labels read as "This field".
pub fn display_label(element: &Element) -> String {
    let label = element.label.trim();
    if label.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label.to_string()
    }
}

/// Whether an explicit `validation` is honored for this element type.
pub fn accepts_explicit(kind: ElementType) -> bool {
    kind.is_plain_input() || matches!(kind, ElementType::Textarea | ElementType::Select)
}

pub fn compile(element: &Element) -> RuleSet {
    let label = display_label(element);
    let mut set = RuleSet {
        label: label.clone(),
        rules: Vec::new(),
        format: None,
        input_mode: None,
    };

    let explicit = element
        .validation
        .as_ref()
        .filter(|_| accepts_explicit(element.kind));

    if let Some(validation) = explicit {
        compile_explicit(validation, element, &label, &mut set);
        return set;
    }

    let required = Rule::Required {
        message: format!("{} is required", label),
    };
    match element.kind {
        ElementType::Placeholder => {}
        ElementType::Email => {
            set.rules.push(required);
            set.rules.push(Rule::Pattern {
                pattern: EMAIL_PATTERN.to_string(),
                message: "Please enter a valid email address".to_string(),
            });
        }
        ElementType::Tel => {
            set.rules.push(required);
            set.rules.push(Rule::DigitCount {
                count: PHONE_DIGITS,
                message: format!("Phone number must be {} digits", PHONE_DIGITS),
            });
            set.format = Some(InputFormat::Phone);
        }
        ElementType::Checkbox if element.required => {
            set.rules.push(Rule::Checked {
                message: format!("{} is required", label),
            });
        }
        _ if element.required => set.rules.push(required),
        _ => {}
    }
    set
}

fn compile_explicit(validation: &Validation, element: &Element, label: &str, set: &mut RuleSet) {
    let required = || Rule::Required {
        message: format!("{} is required", label),
    };
    let min = |min: usize| Rule::MinLength {
        min,
        message: format!("{} must be at least {} characters", label, min),
    };
    let pattern = |pattern: &str, message: &str| Rule::Pattern {
        pattern: pattern.to_string(),
        message: message.to_string(),
    };

    match validation {
        Validation::Name => {
            set.rules.push(required());
            set.rules.push(min(2));
            set.rules
                .push(pattern(NAME_PATTERN, "Please enter a valid name"));
        }
        Validation::Street => {
            set.rules.push(required());
            set.rules.push(min(5));
            set.rules
                .push(pattern(STREET_PATTERN, "Please enter a valid street address"));
        }
        Validation::City => {
            set.rules.push(required());
            set.rules.push(min(2));
            set.rules
                .push(pattern(NAME_PATTERN, "Please enter a valid city name"));
        }
        Validation::Zip => {
            set.rules.push(required());
            set.rules
                .push(pattern(ZIP_PATTERN, "Please enter a valid 5-digit ZIP code"));
            set.input_mode = Some("numeric");
        }
        Validation::State => set.rules.push(required()),
        Validation::Custom(custom) => {
            if element.required {
                set.rules.push(required());
            }
            compile_custom(custom, label, set);
        }
    }
}

fn compile_custom(custom: &CustomValidation, label: &str, set: &mut RuleSet) {
    if let Some(min) = custom.min_length {
        set.rules.push(Rule::MinLength {
            min,
            message: format!("{} must be at least {} characters", label, min),
        });
    }
    if let Some(max) = custom.max_length {
        set.rules.push(Rule::MaxLength {
            max,
            message: format!("{} must be at most {} characters", label, max),
        });
    }
    if let Some(pattern) = custom.pattern.as_deref().filter(|p| !p.is_empty()) {
        if browser_pattern(pattern).is_ok() {
            let message = custom
                .pattern_message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(DEFAULT_PATTERN_MESSAGE);
            set.rules.push(Rule::Pattern {
                pattern: pattern.to_string(),
                message: message.to_string(),
            });
        } else {
            log::debug!("skipping invalid pattern for {}: {}", label, pattern);
        }
    }
}

/// Author-facing problems with an element's validation settings.
pub fn diagnose(element: &Element) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(validation) = &element.validation else {
        return problems;
    };
    let label = display_label(element);

    if !accepts_explicit(element.kind) {
        problems.push(format!(
            "{} validation has no effect on {} elements",
            validation.kind(),
            element.kind
        ));
        return problems;
    }

    if let Validation::Custom(custom) = validation {
        if let Some(pattern) = custom.pattern.as_deref().filter(|p| !p.is_empty()) {
            if let Err(reason) = browser_pattern(pattern) {
                problems.push(format!(
                    "Pattern for {} will be ignored: {} ({})",
                    label, pattern, reason
                ));
            }
        }
        if let (Some(min), Some(max)) = (custom.min_length, custom.max_length) {
            if min > max {
                problems.push(format!(
                    "{} can never be valid: minimum length {} exceeds maximum {}",
                    label, min, max
                ));
            }
        }
    }
    problems
}
