use crate::commands::helpers::{describe, insert_position, stale};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ColumnSpan, Document, Element, ElementType, Row, RowId};

/// Where a new element goes. All parts are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub row: Option<RowId>,
    pub index: Option<usize>,
    pub width: Option<ColumnSpan>,
}

impl Placement {
    pub fn in_row(row: RowId) -> Self {
        Self {
            row: Some(row),
            ..Default::default()
        }
    }

    pub fn at(row: RowId, index: usize) -> Self {
        Self {
            row: Some(row),
            index: Some(index),
            width: None,
        }
    }

    pub fn with_width(mut self, width: ColumnSpan) -> Self {
        self.width = Some(width);
        self
    }
}

/// Creates a fresh element of `kind` and places it.
///
/// Without a row the element goes to the last row, or to a new single-column
/// row when the document is empty. With a row but no index it is appended.
/// With an index it is inserted there; if the slot at that index holds a
/// placeholder, the placeholder is replaced in place and its width is kept.
pub fn run(document: &Document, kind: ElementType, placement: Placement) -> CmdResult {
    if kind == ElementType::Placeholder {
        return CmdResult::unchanged(document.clone()).with_message(CmdMessage::warning(
            "Placeholders are created by adding rows, not elements",
        ));
    }

    let mut doc = document.clone();

    let row_index = match &placement.row {
        Some(row_id) => match doc.row_index(row_id) {
            Some(idx) => idx,
            None => return stale(document, format!("row {} not found", row_id)),
        },
        None if doc.rows.is_empty() => {
            let element = Element::new(kind, placement.width.unwrap_or_default());
            let message = format!("Added {} to new row r1", describe(&element));
            doc.rows.push(Row::new(vec![element.clone()]));
            return CmdResult::new(doc)
                .with_affected_elements(vec![element])
                .with_message(CmdMessage::success(message));
        }
        None => doc.rows.len() - 1,
    };

    let row = &mut doc.rows[row_index];
    let element = match placement.index {
        Some(index) if row.elements.get(index).is_some_and(|el| el.is_placeholder) => {
            let slot_width = row.elements[index].columns;
            let element = Element::new(kind, placement.width.unwrap_or(slot_width));
            row.elements[index] = element.clone();
            element
        }
        Some(index) => {
            let element = Element::new(kind, placement.width.unwrap_or_default());
            let at = insert_position(row.elements.len(), index);
            row.elements.insert(at, element.clone());
            element
        }
        None => {
            let element = Element::new(kind, placement.width.unwrap_or_default());
            row.elements.push(element.clone());
            element
        }
    };

    let message = format!("Added {} to r{}", describe(&element), row_index + 1);
    CmdResult::new(doc)
        .with_affected_elements(vec![element])
        .with_message(CmdMessage::success(message))
}
