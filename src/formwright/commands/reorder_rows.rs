use crate::commands::helpers::stale;
use crate::commands::{CmdMessage, CmdResult};
use crate::model::Document;

/// Moves the row at `from` so it ends up at `to`. A `to` past the end moves
/// the row to the bottom.
pub fn run(document: &Document, from: usize, to: usize) -> CmdResult {
    if from >= document.rows.len() {
        return stale(document, format!("no row at position {}", from + 1));
    }

    let mut doc = document.clone();
    let to = to.min(doc.rows.len() - 1);
    if from == to {
        return CmdResult::unchanged(doc)
            .with_message(CmdMessage::info(format!("Row r{} stays in place", from + 1)));
    }

    let row = doc.rows.remove(from);
    doc.rows.insert(to, row);

    CmdResult::new(doc).with_message(CmdMessage::success(format!(
        "Row r{} moved to r{}",
        from + 1,
        to + 1
    )))
}
