//! Stylesheet as a rule list. Only the two theme colors vary; they are
//! injected as custom properties on `:root` and referenced everywhere else.

use crate::settings::{
    is_color, ConfirmationSettings, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};

pub const PRIMARY_VAR: &str = "--form-primary-color";
pub const SECONDARY_VAR: &str = "--form-secondary-color";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    selectors: Vec<&'static str>,
    declarations: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Rule(Rule),
    Media(&'static str, Vec<Rule>),
}

fn rule(selectors: &[&'static str], declarations: &[(&'static str, &str)]) -> Rule {
    Rule {
        selectors: selectors.to_vec(),
        declarations: declarations
            .iter()
            .map(|(prop, value)| (*prop, value.to_string()))
            .collect(),
    }
}

impl Rule {
    fn write(&self, out: &mut String, indent: &str) {
        out.push_str(indent);
        out.push_str(&self.selectors.join(&format!(",\n{}", indent)));
        out.push_str(" {\n");
        for (prop, value) in &self.declarations {
            out.push_str(indent);
            out.push_str("  ");
            out.push_str(prop);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out.push_str(indent);
        out.push_str("}\n");
    }
}

fn theme_color<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if is_color(value) {
        value
    } else {
        log::debug!("ignoring invalid color {:?}, using {}", value, fallback);
        fallback
    }
}

fn stylesheet(settings: &ConfirmationSettings) -> Vec<Block> {
    let primary = theme_color(&settings.primary_color, DEFAULT_PRIMARY_COLOR);
    let secondary = theme_color(&settings.secondary_color, DEFAULT_SECONDARY_COLOR);
    let primary_ref = format!("var({})", PRIMARY_VAR);
    let secondary_ref = format!("var({})", SECONDARY_VAR);

    vec![
        Block::Rule(rule(
            &[":root"],
            &[(PRIMARY_VAR, primary), (SECONDARY_VAR, secondary)],
        )),
        Block::Rule(rule(
            &[".form-container"],
            &[
                ("max-width", "800px"),
                ("margin", "40px auto"),
                ("padding", "20px"),
                ("background-color", "white"),
                ("border-radius", "8px"),
                ("box-shadow", "0 2px 10px rgba(0, 0, 0, 0.1)"),
            ],
        )),
        Block::Rule(rule(
            &[".form-row"],
            &[
                ("display", "flex"),
                ("flex-wrap", "wrap"),
                ("margin", "0 -10px"),
                ("margin-bottom", "20px"),
            ],
        )),
        Block::Rule(rule(
            &[".form-col-1", ".form-col-2", ".form-col-3"],
            &[("padding", "0 10px"), ("width", "100%"), ("box-sizing", "border-box")],
        )),
        Block::Media(
            "(min-width: 768px)",
            vec![
                rule(&[".form-col-2"], &[("width", "50%")]),
                rule(&[".form-col-3"], &[("width", "33.333%")]),
            ],
        ),
        Block::Rule(rule(&[".form-group"], &[("margin-bottom", "20px")])),
        Block::Rule(rule(
            &["label"],
            &[
                ("display", "block"),
                ("margin-bottom", "5px"),
                ("font-weight", "500"),
            ],
        )),
        Block::Rule(rule(
            &[
                "input[type=\"text\"]",
                "input[type=\"email\"]",
                "input[type=\"tel\"]",
                "input[type=\"number\"]",
                "input[type=\"date\"]",
                "input[type=\"file\"]",
                "textarea",
                "select",
            ],
            &[
                ("width", "100%"),
                ("padding", "10px"),
                ("border", "1px solid #ddd"),
                ("border-radius", "4px"),
                ("font-size", "16px"),
                ("box-sizing", "border-box"),
            ],
        )),
        Block::Rule(rule(&["textarea"], &[("resize", "vertical")])),
        Block::Rule(rule(
            &["input:focus", "textarea:focus", "select:focus"],
            &[
                ("outline", "none"),
                ("border-color", primary_ref.as_str()),
            ],
        )),
        Block::Rule(rule(
            &[".checkbox-wrapper", ".radio-wrapper"],
            &[
                ("display", "flex"),
                ("align-items", "center"),
                ("gap", "8px"),
            ],
        )),
        Block::Rule(rule(
            &[".checkbox-wrapper label", ".radio-wrapper label"],
            &[("display", "inline"), ("margin-bottom", "0")],
        )),
        Block::Rule(rule(
            &[".radio-group"],
            &[
                ("display", "flex"),
                ("flex-direction", "column"),
                ("gap", "10px"),
            ],
        )),
        Block::Rule(rule(
            &[".required"],
            &[("color", "#e53e3e"), ("margin-left", "2px")],
        )),
        Block::Rule(rule(
            &[".error-message"],
            &[
                ("color", "#e53e3e"),
                ("font-size", "14px"),
                ("margin-top", "4px"),
                ("min-height", "1em"),
            ],
        )),
        Block::Rule(rule(
            &["input.is-invalid", "textarea.is-invalid", "select.is-invalid"],
            &[("border-color", "#e53e3e")],
        )),
        Block::Rule(rule(
            &["input.is-valid", "textarea.is-valid", "select.is-valid"],
            &[("border-color", "#38a169")],
        )),
        Block::Rule(rule(
            &[".sms-consent label"],
            &[("font-size", "13px"), ("font-weight", "400"), ("color", "#4a5568")],
        )),
        Block::Rule(rule(
            &[".submit-button"],
            &[
                ("background-color", primary_ref.as_str()),
                ("color", "white"),
                ("border", "none"),
                ("border-radius", "4px"),
                ("padding", "10px 16px"),
                ("font-size", "16px"),
                ("cursor", "pointer"),
                ("transition", "background-color 0.2s"),
            ],
        )),
        Block::Rule(rule(
            &[".submit-button:hover"],
            &[("background-color", secondary_ref.as_str())],
        )),
    ]
}

pub fn render_css(settings: &ConfirmationSettings) -> String {
    let blocks = stylesheet(settings);
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match block {
            Block::Rule(rule) => rule.write(&mut out, ""),
            Block::Media(query, rules) => {
                out.push_str("@media ");
                out.push_str(query);
                out.push_str(" {\n");
                for (j, rule) in rules.iter().enumerate() {
                    if j > 0 {
                        out.push('\n');
                    }
                    rule.write(&mut out, "  ");
                }
                out.push_str("}\n");
            }
        }
    }
    out
}
