use crate::commands::{CmdMessage, CmdResult};
use crate::model::{ColumnSpan, Document, Row};

pub fn run(document: &Document, columns: ColumnSpan) -> CmdResult {
    let mut doc = document.clone();
    let row = Row::with_placeholders(columns);
    let row_id = row.id.clone();
    doc.rows.push(row);

    let position = doc.rows.len();
    let plural = if columns.count() == 1 { "" } else { "s" };
    CmdResult::new(doc)
        .with_created_row(row_id)
        .with_message(CmdMessage::success(format!(
            "Row r{} added with {} column{}",
            position, columns, plural
        )))
}
