//! # Rendering Module
//!
//! Turns library values into terminal text. The outline and settings views go
//! through minijinja templates with a `style` filter backed by
//! [`FORM_THEME`]; command messages are colored by level.
//!
//! Width calculations stay in Rust because they have to be Unicode aware:
//! labels and keys are padded by display width, not by byte or char count.

use super::styles::{names, FORM_THEME};
use super::templates::{OUTLINE_TEMPLATE, SETTINGS_TEMPLATE};
use colored::Colorize;
use console::Term;
use formwright::commands::{CmdMessage, MessageLevel};
use formwright::index::Address;
use formwright::model::{Document, Element, ElementId, Row};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const EMPTY_OUTLINE: &str = "The form is empty. Start with add-row or add.";
pub const SELECTED_MARKER: &str = "◂ selected";
const UNSET: &str = "(not set)";
const NO_LABEL: &str = "(no label)";
const EMPTY_SLOT: &str = "empty";

#[derive(Serialize)]
struct SlotLine {
    address: String,
    kind: String,
    kind_style: &'static str,
    label: String,
    label_style: &'static str,
    required: String,
    notes: String,
    selected: String,
}

#[derive(Serialize)]
struct RowLine {
    address: String,
    summary: String,
    slots: Vec<SlotLine>,
}

#[derive(Serialize)]
struct OutlineData {
    empty: bool,
    empty_message: &'static str,
    rows: Vec<RowLine>,
}

#[derive(Serialize)]
struct SettingLine {
    key: String,
    padding: String,
    value: String,
    value_style: &'static str,
}

#[derive(Serialize)]
struct SettingsData {
    items: Vec<SettingLine>,
}

fn environment(use_color: bool) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("style", move |value: Value, name: String| -> String {
        FORM_THEME.apply(&name, &value.to_string(), use_color)
    });
    env
}

fn render_with_color<T: Serialize>(template: &str, data: &T, use_color: bool) -> String {
    environment(use_color)
        .render_str(template, data)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn use_color() -> bool {
    Term::stdout().features().colors_supported()
}

fn pad_to(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

fn row_summary(row: &Row) -> String {
    let empty = row.elements.iter().filter(|el| el.is_placeholder).count();
    let mut summary = match row.column_count {
        Some(columns) if columns.count() == 1 => "1 column".to_string(),
        Some(columns) => format!("{} columns", columns.count()),
        None if row.elements.len() == 1 => "1 element".to_string(),
        None => format!("{} elements", row.elements.len()),
    };
    if empty > 0 {
        summary.push_str(&format!(", {} empty", empty));
    }
    summary
}

fn element_notes(element: &Element) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(validation) = &element.validation {
        notes.push(format!("validation: {}", validation.kind()));
    }
    if element.kind.has_options() {
        match element.options.len() {
            1 => notes.push("1 option".to_string()),
            n => notes.push(format!("{} options", n)),
        }
    }
    if element.kind == formwright::model::ElementType::Textarea {
        notes.push(format!("{} rows", element.rows));
    }
    notes
}

fn build_outline(document: &Document, selection: Option<&ElementId>) -> OutlineData {
    let mut address_width = 0;
    let mut kind_width = EMPTY_SLOT.width();
    let mut label_width = 0;
    for (r, row) in document.rows.iter().enumerate() {
        for (s, element) in row.elements.iter().enumerate() {
            address_width = address_width.max(Address::Slot(r + 1, s + 1).to_string().width());
            kind_width = kind_width.max(element.kind.as_str().width());
            label_width = label_width.max(display_label(element).width() + required_marker(element).width());
        }
    }

    let rows = document
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| RowLine {
            address: Address::Row(r + 1).to_string(),
            summary: row_summary(row),
            slots: row
                .elements
                .iter()
                .enumerate()
                .map(|(s, element)| {
                    let address = pad_to(&Address::Slot(r + 1, s + 1).to_string(), address_width);
                    if element.is_placeholder {
                        return SlotLine {
                            address,
                            kind: pad_to(EMPTY_SLOT, kind_width),
                            kind_style: names::MUTED,
                            label: element.label.clone(),
                            label_style: names::MUTED,
                            required: String::new(),
                            notes: String::new(),
                            selected: String::new(),
                        };
                    }

                    let label = display_label(element);
                    let required = required_marker(element);
                    let is_selected = selection == Some(&element.id);
                    let notes = element_notes(element);
                    let gap = " ".repeat(
                        label_width.saturating_sub(label.width() + required.width()) + 2,
                    );
                    let notes_cell = if notes.is_empty() {
                        String::new()
                    } else {
                        format!("{}{}", gap, notes.join(", "))
                    };
                    let selected = match (is_selected, notes.is_empty()) {
                        (false, _) => String::new(),
                        (true, true) => format!("{}{}", gap, SELECTED_MARKER),
                        (true, false) => format!("  {}", SELECTED_MARKER),
                    };

                    SlotLine {
                        address,
                        kind: pad_to(element.kind.as_str(), kind_width),
                        kind_style: names::KIND,
                        label_style: if element.label.trim().is_empty() {
                            names::MUTED
                        } else {
                            names::LABEL
                        },
                        label,
                        required: required.to_string(),
                        notes: notes_cell,
                        selected,
                    }
                })
                .collect(),
        })
        .collect();

    OutlineData {
        empty: document.rows.is_empty(),
        empty_message: EMPTY_OUTLINE,
        rows,
    }
}

fn display_label(element: &Element) -> String {
    let label = element.label.trim();
    if label.is_empty() {
        NO_LABEL.to_string()
    } else {
        label.to_string()
    }
}

fn required_marker(element: &Element) -> &'static str {
    if element.required {
        " *"
    } else {
        ""
    }
}

fn render_outline_with_color(
    document: &Document,
    selection: Option<&ElementId>,
    use_color: bool,
) -> String {
    let data = build_outline(document, selection);
    render_with_color(OUTLINE_TEMPLATE, &data, use_color)
}

/// The document as an indented outline of rows and slots with their addresses.
pub fn render_outline(document: &Document, selection: Option<&ElementId>) -> String {
    render_outline_with_color(document, selection, use_color())
}

fn render_settings_with_color(settings: &[(&str, String)], use_color: bool) -> String {
    let key_width = settings.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let items = settings
        .iter()
        .map(|(key, value)| SettingLine {
            key: key.to_string(),
            padding: " ".repeat(key_width.saturating_sub(key.width())),
            value: if value.is_empty() {
                UNSET.to_string()
            } else {
                value.replace('\n', " ")
            },
            value_style: if value.is_empty() {
                names::MUTED
            } else {
                ""
            },
        })
        .collect();
    render_with_color(SETTINGS_TEMPLATE, &SettingsData { items }, use_color)
}

/// Key/value listing with the values aligned.
pub fn render_settings(settings: &[(&str, String)]) -> String {
    render_settings_with_color(settings, use_color())
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
