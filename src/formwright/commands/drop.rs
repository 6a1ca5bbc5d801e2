use crate::commands::helpers::{describe, stale};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ColumnSpan, Document, Element, ElementType, RowId};

/// A palette item dropped onto a row.
///
/// The first placeholder of the row is replaced by the new element, which
/// inherits the placeholder's width. A row without placeholders gets the
/// element appended instead.
pub fn run(document: &Document, kind: ElementType, row_id: &RowId) -> CmdResult {
    if kind == ElementType::Placeholder {
        return CmdResult::unchanged(document.clone())
            .with_message(CmdMessage::warning("A placeholder cannot be dropped"));
    }

    let mut doc = document.clone();
    let Some(row_index) = doc.row_index(row_id) else {
        return stale(document, format!("row {} not found", row_id));
    };
    let row = &mut doc.rows[row_index];

    let (element, verb) = match row.first_placeholder() {
        Some(slot) => {
            let element = Element::new(kind, row.elements[slot].columns);
            row.elements[slot] = element.clone();
            (element, "placed in")
        }
        None => {
            let element = Element::new(kind, ColumnSpan::One);
            row.elements.push(element.clone());
            (element, "appended to")
        }
    };

    let message = format!("{} {} r{}", describe(&element), verb, row_index + 1);
    CmdResult::new(doc)
        .with_affected_elements(vec![element])
        .with_message(CmdMessage::success(message))
}
