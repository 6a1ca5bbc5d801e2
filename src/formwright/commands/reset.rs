use crate::commands::{CmdMessage, CmdResult};
use crate::model::Document;

/// Clears the document unconditionally.
pub fn run(document: &Document) -> CmdResult {
    let removed = document
        .rows
        .iter()
        .flat_map(|row| row.elements.iter().map(|el| el.id.clone()))
        .collect();

    CmdResult::new(Document::new())
        .with_removed_ids(removed)
        .with_message(CmdMessage::success("Form reset"))
}
