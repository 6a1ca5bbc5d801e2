use crate::model::{Document, Element, ElementId, RowId};

pub mod add_element;
pub mod add_row;
pub mod drop;
pub mod helpers;
pub mod move_element;
pub mod options;
pub mod remove_element;
pub mod remove_row;
pub mod reorder_rows;
pub mod reset;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of an editing command: the new document plus what changed.
///
/// Commands are total. A stale reference yields the input document unchanged,
/// `changed = false` and an `Info` message.
#[derive(Debug, Clone, Default)]
pub struct CmdResult {
    pub document: Document,
    pub changed: bool,
    pub affected_elements: Vec<Element>,
    pub removed_ids: Vec<ElementId>,
    pub created_row: Option<RowId>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            changed: true,
            ..Default::default()
        }
    }

    pub fn unchanged(document: Document) -> Self {
        Self {
            document,
            changed: false,
            ..Default::default()
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_elements(mut self, elements: Vec<Element>) -> Self {
        self.affected_elements = elements;
        self
    }

    pub fn with_removed_ids(mut self, ids: Vec<ElementId>) -> Self {
        self.removed_ids = ids;
        self
    }

    pub fn with_created_row(mut self, row: RowId) -> Self {
        self.created_row = Some(row);
        self
    }

    /// The element a creating command just placed, if any.
    pub fn created_element(&self) -> Option<&Element> {
        self.affected_elements.first()
    }
}
