//! Validation rules: compiled once per element, evaluated by the preview and
//! serialized into the exported client-side validator.

pub mod check;
pub mod pattern;
pub mod phone;
pub mod rules;

pub use check::{check, FieldValue};
pub use phone::format_phone;
pub use rules::{compile, diagnose, display_label, InputFormat, Rule, RuleSet};
