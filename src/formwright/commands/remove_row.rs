use crate::commands::helpers::stale;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Document, RowId};

/// Deletes a whole row. `removed_ids` lists every element it held so the
/// caller can drop a selection that pointed into it.
pub fn run(document: &Document, row_id: &RowId) -> CmdResult {
    let Some(row_index) = document.row_index(row_id) else {
        return stale(document, format!("row {} not found", row_id));
    };

    let mut doc = document.clone();
    let row = doc.rows.remove(row_index);
    let removed = row.elements.iter().map(|el| el.id.clone()).collect();
    let real: Vec<_> = row.real_elements().cloned().collect();
    let message = format!(
        "Removed row r{} ({} element{})",
        row_index + 1,
        real.len(),
        if real.len() == 1 { "" } else { "s" }
    );

    CmdResult::new(doc)
        .with_removed_ids(removed)
        .with_affected_elements(real)
        .with_message(CmdMessage::success(message))
}
