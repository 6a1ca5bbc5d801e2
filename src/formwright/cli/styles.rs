//! Terminal styles for the session output.
//!
//! Templates refer to semantic names (`address`, `kind`, `muted`...) through
//! the `style` filter; this module maps those names to console styles. Keeping
//! the mapping here lets the look change without touching templates.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const ADDRESS: &str = "address";
    pub const KIND: &str = "kind";
    pub const LABEL: &str = "label";
    pub const REQUIRED: &str = "required";
    pub const MUTED: &str = "muted";
    pub const SELECTED: &str = "selected";
    pub const KEY: &str = "key";
}

pub struct Theme {
    styles: HashMap<&'static str, Style>,
}

impl Theme {
    fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Styles `text` with the named style. Unknown names leave the text as is.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            _ => text.to_string(),
        }
    }
}

pub static FORM_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::ADDRESS, Style::new().yellow())
        .add(names::KIND, Style::new().cyan())
        .add(names::LABEL, Style::new().bold())
        .add(names::REQUIRED, Style::new().red())
        .add(names::MUTED, Style::new().dim())
        .add(names::SELECTED, Style::new().green().bold())
        .add(names::KEY, Style::new().cyan())
});
