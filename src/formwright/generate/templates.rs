//! Text templates for the generated artifacts.
//!
//! The artifacts are not HTML documents as far as minijinja is concerned, so
//! auto-escaping is off and every template escapes explicitly with the filter
//! matching its target language: `html` for markup text, `php_str` for the
//! inside of a single-quoted PHP string.

use crate::error::Result;
use crate::generate::html::escape_text;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

pub const VALIDATOR_TEMPLATE: &str = include_str!("templates/validator.js.j2");
pub const CONFIRMATION_TEMPLATE: &str = include_str!("templates/confirmation.php.j2");
pub const PAGE_TEMPLATE: &str = include_str!("templates/page.html.j2");

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.add_filter("html", |value: String| escape_text(&value));
    env.add_filter("php_str", |value: String| php_single_quoted(&value));

    env.add_template("validator.js", VALIDATOR_TEMPLATE)?;
    env.add_template("confirmation.php", CONFIRMATION_TEMPLATE)?;
    env.add_template("page.html", PAGE_TEMPLATE)?;
    Ok(env)
}

pub fn render<S: Serialize>(name: &str, context: &S) -> Result<String> {
    let env = environment()?;
    let template = env.get_template(name)?;
    Ok(template.render(context)?)
}

/// Escapes a value for a single-quoted PHP string literal.
pub fn php_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
