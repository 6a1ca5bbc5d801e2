//! HTML tree and its renderer.
//!
//! Markup is built as a small tree of [`Tag`]s and rendered with a fixed
//! two-space indentation. Attribute values and text are escaped on output, so
//! labels and options can carry any characters. Tags whose children are all
//! text or phrasing content render on a single line.

use crate::generate::Field;
use crate::model::{ElementType, Validation};
use crate::settings::ConfirmationSettings;

const INDENT: &str = "  ";
const VOID_TAGS: [&str; 5] = ["input", "meta", "link", "br", "hr"];
const PHRASING_TAGS: [&str; 4] = ["span", "a", "strong", "em"];

pub const FORM_ID: &str = "form-logger";
pub const RECAPTCHA_ERROR_ID: &str = "recaptcha-error";
pub const SMS_CONSENT_ID: &str = "sms-consent";
pub const SMS_CONSENT_NAME: &str = "form_logger_sms_consent";
pub const RECAPTCHA_SCRIPT: &str = "https://www.google.com/recaptcha/api.js";
pub const SMS_DISCLAIMER: &str = "By checking this box, I agree to receive text messages about my \
inquiry at the phone number provided. Message and data rates may apply. Message frequency varies. \
Reply STOP to opt out or HELP for help.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Tag(Tag),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Node>,
}

impl Tag {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    pub fn attr_if(self, cond: bool, name: &'static str, value: impl Into<String>) -> Self {
        if cond {
            self.attr(name, value)
        } else {
            self
        }
    }

    /// Boolean attribute, rendered without a value.
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    pub fn flag_if(self, cond: bool, name: &'static str) -> Self {
        if cond {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, tag: Tag) -> Self {
        self.children.push(Node::Tag(tag));
        self
    }

    pub fn children(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.children.extend(tags.into_iter().map(Node::Tag));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn push(&mut self, tag: Tag) {
        self.children.push(Node::Tag(tag));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_block(&mut out, 0);
        out
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.name)
    }

    fn is_inline(&self) -> bool {
        self.children.iter().all(|child| match child {
            Node::Text(_) => true,
            Node::Tag(tag) => PHRASING_TAGS.contains(&tag.name) && tag.is_inline(),
        })
    }

    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        out.push('>');
    }

    fn write_close(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(self.name);
        out.push('>');
    }

    fn write_inline(&self, out: &mut String) {
        self.write_open(out);
        if self.is_void() {
            return;
        }
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape_text(text)),
                Node::Tag(tag) => tag.write_inline(out),
            }
        }
        self.write_close(out);
    }

    fn write_block(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        if self.is_void() || self.is_inline() {
            self.write_inline(out);
            out.push('\n');
            return;
        }

        self.write_open(out);
        out.push('\n');
        for child in &self.children {
            match child {
                Node::Tag(tag) => tag.write_block(out, depth + 1),
                Node::Text(text) => {
                    indent(out, depth + 1);
                    out.push_str(&escape_text(text));
                    out.push('\n');
                }
            }
        }
        indent(out, depth);
        self.write_close(out);
        out.push('\n');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The form markup: container, rows, the captcha widget, optional SMS consent
/// and the submit button, followed by the captcha loader script.
pub fn render_form(rows: &[Vec<Field<'_>>], settings: &ConfirmationSettings) -> String {
    let has_file = rows
        .iter()
        .flatten()
        .any(|f| f.element.kind == ElementType::File);

    let mut form = Tag::new("form")
        .attr("id", FORM_ID)
        .attr("action", settings.form_action.as_str())
        .attr("method", "POST")
        .attr_if(has_file, "enctype", "multipart/form-data")
        .flag("novalidate");

    for row in rows {
        form.push(Tag::new("div").class("form-row").children(row.iter().map(column)));
    }

    form.push(full_width_row(
        Tag::new("div")
            .class("form-group")
            .child(
                Tag::new("div")
                    .class("g-recaptcha")
                    .attr("data-sitekey", settings.recaptcha_site_key.as_str()),
            )
            .child(error_container(RECAPTCHA_ERROR_ID)),
    ));

    if settings.enable_sms {
        form.push(full_width_row(sms_consent()));
    }

    form.push(
        Tag::new("button")
            .attr("type", "submit")
            .class("submit-button")
            .text(settings.submit_label()),
    );

    let container = Tag::new("div").class("form-container").child(form);
    let loader = Tag::new("script")
        .attr("src", RECAPTCHA_SCRIPT)
        .flag("async")
        .flag("defer");

    let mut out = container.render();
    out.push_str(&loader.render());
    out
}

fn full_width_row(content: Tag) -> Tag {
    Tag::new("div")
        .class("form-row")
        .child(Tag::new("div").class("form-col-1").child(content))
}

fn column(field: &Field<'_>) -> Tag {
    Tag::new("div")
        .class(field.element.columns.css_class())
        .child(field_group(field))
}

fn field_group(field: &Field<'_>) -> Tag {
    let el = field.element;
    let mut group = Tag::new("div").class("form-group");

    if el.kind != ElementType::Checkbox {
        group.push(label(field, &el.label));
    }
    group.push(control(field));
    group.child(error_container(&field.error_id()))
}

fn label(field: &Field<'_>, text: &str) -> Tag {
    // a radiogroup div is not labelable, so it points back at the label
    let tag = if field.element.kind == ElementType::Radio {
        Tag::new("label").attr("id", field.label_id())
    } else {
        Tag::new("label").attr("for", field.id.as_str())
    };
    let tag = tag.text(text);
    if field.rules.is_required() {
        tag.child(Tag::new("span").class("required").text("*"))
    } else {
        tag
    }
}

fn error_container(id: &str) -> Tag {
    Tag::new("div")
        .class("error-message")
        .attr("id", id)
        .attr("aria-live", "polite")
}

/// `data-validate-*` marker for validators that key on attributes.
fn validate_marker(field: &Field<'_>) -> Option<&'static str> {
    let el = field.element;
    match &el.validation {
        Some(v) if crate::validation::rules::accepts_explicit(el.kind) => match v {
            Validation::Name => Some("data-validate-name"),
            Validation::Street => Some("data-validate-street"),
            Validation::City => Some("data-validate-city"),
            Validation::Zip => Some("data-validate-zip"),
            Validation::State => Some("data-validate-state"),
            Validation::Custom(_) => Some("data-validate-custom"),
        },
        _ => match el.kind {
            ElementType::Email => Some("data-validate-email"),
            ElementType::Tel => Some("data-validate-phone"),
            _ => None,
        },
    }
}

fn control(field: &Field<'_>) -> Tag {
    let el = field.element;
    let required = field.rules.is_required();
    let placeholder = el.placeholder_text.trim();

    let tag = match el.kind {
        ElementType::Textarea => Tag::new("textarea")
            .attr("id", field.id.as_str())
            .attr("name", field.name.as_str())
            .attr_if(!placeholder.is_empty(), "placeholder", placeholder)
            .attr("rows", el.rows.max(1).to_string())
            .flag_if(required, "required"),
        ElementType::Select => {
            let prompt = if placeholder.is_empty() {
                "Select an option"
            } else {
                placeholder
            };
            Tag::new("select")
                .attr("id", field.id.as_str())
                .attr("name", field.name.as_str())
                .flag_if(required, "required")
                .child(
                    Tag::new("option")
                        .attr("value", "")
                        .flag("disabled")
                        .flag("selected")
                        .text(prompt),
                )
                .children(
                    el.options
                        .iter()
                        .map(|opt| Tag::new("option").attr("value", opt.as_str()).text(opt.as_str())),
                )
        }
        ElementType::Checkbox => {
            let input = Tag::new("input")
                .attr("type", "checkbox")
                .attr("id", field.id.as_str())
                .attr("name", field.name.as_str())
                .attr("value", "yes")
                .attr("data-label", field.rules.label.as_str())
                .flag_if(required, "data-validate-required");
            return Tag::new("div")
                .class("checkbox-wrapper")
                .child(input)
                .child(label(field, &el.label));
        }
        ElementType::Radio => {
            let options = el.options.iter().enumerate().map(|(i, opt)| {
                let option_id = format!("{}-{}", field.id, i);
                Tag::new("div")
                    .class("radio-wrapper")
                    .child(
                        Tag::new("input")
                            .attr("type", "radio")
                            .attr("id", option_id.as_str())
                            .attr("name", field.name.as_str())
                            .attr("value", opt.as_str())
                            .attr("data-label", field.rules.label.as_str())
                            .flag_if(required, "data-validate-required"),
                    )
                    .child(Tag::new("label").attr("for", option_id).text(opt.as_str()))
            });
            return Tag::new("div")
                .class("radio-group")
                .attr("id", field.id.as_str())
                .attr("role", "radiogroup")
                .attr("aria-labelledby", field.label_id())
                .children(options);
        }
        kind => Tag::new("input")
            .attr("type", kind.as_str())
            .attr("id", field.id.as_str())
            .attr("name", field.name.as_str())
            .attr_if(!placeholder.is_empty(), "placeholder", placeholder)
            .attr_if(
                field.rules.input_mode.is_some(),
                "inputmode",
                field.rules.input_mode.unwrap_or_default(),
            )
            .flag_if(required, "required"),
    };

    let tag = tag.attr("data-label", field.rules.label.as_str());
    match validate_marker(field) {
        Some(marker) => tag.flag(marker),
        None => tag,
    }
}

fn sms_consent() -> Tag {
    let input = Tag::new("input")
        .attr("type", "checkbox")
        .attr("id", SMS_CONSENT_ID)
        .attr("name", SMS_CONSENT_NAME)
        .attr("value", "yes")
        .attr("data-label", "SMS consent")
        .flag("data-validate-required");

    Tag::new("div")
        .class("form-group sms-consent")
        .child(
            Tag::new("div")
                .class("checkbox-wrapper")
                .child(input)
                .child(
                    Tag::new("label")
                        .attr("for", SMS_CONSENT_ID)
                        .text(SMS_DISCLAIMER),
                ),
        )
        .child(error_container(&format!("{}-error", SMS_CONSENT_ID)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_blocks_with_indentation() {
        let tree = Tag::new("div")
            .class("outer")
            .child(Tag::new("p").text("hi"))
            .child(Tag::new("input").attr("type", "text").flag("required"));
        assert_eq!(
            tree.render(),
            "<div class=\"outer\">\n  <p>hi</p>\n  <input type=\"text\" required>\n</div>\n"
        );
    }

    #[test]
    fn phrasing_children_stay_inline() {
        let label = Tag::new("label")
            .attr("for", "x")
            .text("Name")
            .child(Tag::new("span").class("required").text("*"));
        assert_eq!(
            label.render(),
            "<label for=\"x\">Name<span class=\"required\">*</span></label>\n"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let tag = Tag::new("option")
            .attr("value", "\"A&B\" <c>")
            .text("<script>");
        assert_eq!(
            tag.render(),
            "<option value=\"&quot;A&amp;B&quot; &lt;c&gt;\">&lt;script&gt;</option>\n"
        );
    }

    #[test]
    fn empty_elements_render_open_and_close() {
        assert_eq!(
            Tag::new("textarea").attr("rows", "3").render(),
            "<textarea rows=\"3\"></textarea>\n"
        );
    }
}
