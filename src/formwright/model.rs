//! Core data types: [`Element`], [`Row`], [`Document`] and the partial update
//! record [`ElementPatch`].
//!
//! A document is an ordered list of rows, each an ordered list of elements.
//! Order is significant everywhere: rows top to bottom, elements left to right
//! (which is also the tab order of the generated form).
//!
//! Placeholders are elements too. A freshly added N-column row holds N of them,
//! each reserving a slot of width 1/N until a real element replaces it. They
//! never reach the preview or the exported markup; [`Document::all_elements`]
//! is the canonical projection that skips them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_TEXTAREA_ROWS: u32 = 3;

const PLACEHOLDER_HINT: &str = "Drop elements here";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn generate() -> Self {
        Self(format!("element-{}", Uuid::new_v4().simple()))
    }

    fn generate_placeholder() -> Self {
        Self(format!("placeholder-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn generate() -> Self {
        Self(format!("row-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Textarea,
    Select,
    Checkbox,
    Radio,
    File,
    Placeholder,
}

impl ElementType {
    /// Every type a user can place on the canvas, in palette order.
    pub const PALETTE: [ElementType; 10] = [
        ElementType::Text,
        ElementType::Email,
        ElementType::Tel,
        ElementType::Number,
        ElementType::Date,
        ElementType::Textarea,
        ElementType::Select,
        ElementType::Checkbox,
        ElementType::Radio,
        ElementType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Email => "email",
            ElementType::Tel => "tel",
            ElementType::Number => "number",
            ElementType::Date => "date",
            ElementType::Textarea => "textarea",
            ElementType::Select => "select",
            ElementType::Checkbox => "checkbox",
            ElementType::Radio => "radio",
            ElementType::File => "file",
            ElementType::Placeholder => "placeholder",
        }
    }

    /// Types whose `options` list is rendered.
    pub fn has_options(&self) -> bool {
        matches!(self, ElementType::Select | ElementType::Radio)
    }

    /// Types rendered as a plain `<input type="...">`.
    pub fn is_plain_input(&self) -> bool {
        matches!(
            self,
            ElementType::Text
                | ElementType::Email
                | ElementType::Tel
                | ElementType::Number
                | ElementType::Date
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ElementType::Text),
            "email" => Ok(ElementType::Email),
            "tel" | "phone" => Ok(ElementType::Tel),
            "number" => Ok(ElementType::Number),
            "date" => Ok(ElementType::Date),
            "textarea" => Ok(ElementType::Textarea),
            "select" => Ok(ElementType::Select),
            "checkbox" => Ok(ElementType::Checkbox),
            "radio" => Ok(ElementType::Radio),
            "file" => Ok(ElementType::File),
            "placeholder" => Ok(ElementType::Placeholder),
            other => Err(format!("unknown element type '{}'", other)),
        }
    }
}

/// How many columns the element's row is split into; the element takes one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ColumnSpan {
    #[default]
    One,
    Two,
    Three,
}

impl ColumnSpan {
    pub fn count(self) -> u8 {
        match self {
            ColumnSpan::One => 1,
            ColumnSpan::Two => 2,
            ColumnSpan::Three => 3,
        }
    }

    /// Width class used by the generated stylesheet: full, half or third.
    pub fn css_class(self) -> &'static str {
        match self {
            ColumnSpan::One => "form-col-1",
            ColumnSpan::Two => "form-col-2",
            ColumnSpan::Three => "form-col-3",
        }
    }
}

impl TryFrom<u8> for ColumnSpan {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ColumnSpan::One),
            2 => Ok(ColumnSpan::Two),
            3 => Ok(ColumnSpan::Three),
            other => Err(format!("column span must be 1, 2 or 3, got {}", other)),
        }
    }
}

impl From<ColumnSpan> for u8 {
    fn from(span: ColumnSpan) -> Self {
        span.count()
    }
}

impl FromStr for ColumnSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("column span must be 1, 2 or 3, got '{}'", s))?;
        ColumnSpan::try_from(n)
    }
}

impl fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Explicit validation refinement for text-like and select elements.
///
/// The named kinds carry built-in rules; only `Custom` carries user-supplied
/// constraints, so e.g. a pattern on a `Name` validation cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Validation {
    Name,
    Street,
    City,
    Zip,
    State,
    Custom(CustomValidation),
}

impl Validation {
    pub fn kind(&self) -> &'static str {
        match self {
            Validation::Name => "name",
            Validation::Street => "street",
            Validation::City => "city",
            Validation::Zip => "zip",
            Validation::State => "state",
            Validation::Custom(_) => "custom",
        }
    }
}

impl FromStr for Validation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Validation::Name),
            "street" => Ok(Validation::Street),
            "city" => Ok(Validation::City),
            "zip" => Ok(Validation::Zip),
            "state" => Ok(Validation::State),
            "custom" => Ok(Validation::Custom(CustomValidation::default())),
            other => Err(format!("unknown validation type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementType,
    pub label: String,
    pub placeholder_text: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default)]
    pub columns: ColumnSpan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
    #[serde(default)]
    pub is_placeholder: bool,
}

fn default_rows() -> u32 {
    DEFAULT_TEXTAREA_ROWS
}

impl Element {
    /// A fresh element with an unused id, empty texts and `required = false`.
    /// Radios start with two seeded options.
    pub fn new(kind: ElementType, columns: ColumnSpan) -> Self {
        let options = if kind == ElementType::Radio {
            vec!["Option 1".to_string(), "Option 2".to_string()]
        } else {
            Vec::new()
        };

        Self {
            id: ElementId::generate(),
            kind,
            label: String::new(),
            placeholder_text: String::new(),
            required: false,
            options,
            rows: DEFAULT_TEXTAREA_ROWS,
            columns,
            validation: None,
            is_placeholder: kind == ElementType::Placeholder,
        }
    }

    /// An empty column slot; `slot` is its zero-based position in the row.
    pub fn placeholder(slot: usize, columns: ColumnSpan) -> Self {
        Self {
            id: ElementId::generate_placeholder(),
            kind: ElementType::Placeholder,
            label: format!("Column {}", slot + 1),
            placeholder_text: PLACEHOLDER_HINT.to_string(),
            required: false,
            options: Vec::new(),
            rows: DEFAULT_TEXTAREA_ROWS,
            columns,
            validation: None,
            is_placeholder: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: RowId,
    pub elements: Vec<Element>,
    /// How many placeholder columns the row was created with. A hint only:
    /// editing may leave the row with more or fewer elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<ColumnSpan>,
}

impl Row {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            id: RowId::generate(),
            elements,
            column_count: None,
        }
    }

    /// A row of `columns` placeholders, each `columns` wide.
    pub fn with_placeholders(columns: ColumnSpan) -> Self {
        let elements = (0..columns.count() as usize)
            .map(|slot| Element::placeholder(slot, columns))
            .collect();
        Self {
            id: RowId::generate(),
            elements,
            column_count: Some(columns),
        }
    }

    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|el| &el.id == id)
    }

    pub fn first_placeholder(&self) -> Option<usize> {
        self.elements.iter().position(|el| el.is_placeholder)
    }

    pub fn real_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| !el.is_placeholder)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub rows: Vec<Row>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// All real elements, top to bottom by row, left to right within a row.
    pub fn all_elements(&self) -> Vec<&Element> {
        self.rows.iter().flat_map(|row| row.real_elements()).collect()
    }

    pub fn has_real_elements(&self) -> bool {
        self.rows.iter().any(|row| row.real_elements().next().is_some())
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.id == id)
    }

    pub fn row_index(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    /// Finds `(row index, element index)` by scanning row membership.
    pub fn locate(&self, id: &ElementId) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.position(id).map(|c| (r, c)))
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.locate(id).map(|(r, c)| &self.rows[r].elements[c])
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        let (r, c) = self.locate(id)?;
        Some(&mut self.rows[r].elements[c])
    }
}

/// Free-function form of [`Document::all_elements`].
pub fn all_elements(document: &Document) -> Vec<&Element> {
    document.all_elements()
}

/// Partial update merged into an element by `update_element`.
///
/// `None` leaves a field untouched. `validation` is doubly optional so a
/// patch can clear an existing validation (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementPatch {
    pub label: Option<String>,
    pub placeholder_text: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub rows: Option<u32>,
    pub columns: Option<ColumnSpan>,
    pub validation: Option<Option<Validation>>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = Some(text.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn columns(mut self, columns: ColumnSpan) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(Some(validation));
        self
    }

    pub fn clear_validation(mut self) -> Self {
        self.validation = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(&self, element: &mut Element) {
        if let Some(label) = &self.label {
            element.label = label.clone();
        }
        if let Some(text) = &self.placeholder_text {
            element.placeholder_text = text.clone();
        }
        if let Some(required) = self.required {
            element.required = required;
        }
        if let Some(options) = &self.options {
            element.options = options.clone();
        }
        if let Some(rows) = self.rows {
            // rows must stay positive
            element.rows = if rows == 0 { DEFAULT_TEXTAREA_ROWS } else { rows };
        }
        if let Some(columns) = self.columns {
            element.columns = columns;
        }
        if let Some(validation) = &self.validation {
            element.validation = validation.clone();
        }
    }
}
