use crate::commands::helpers::{describe, insert_position, stale};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Document, ElementId, RowId};

/// Takes the element out of `source` and inserts it at `target_index` of
/// `target` (index counted after removal). Source and target may be the same
/// row. Any unresolved reference leaves the document as it was, including a
/// missing target row, so the element is never lost.
pub fn run(
    document: &Document,
    element_id: &ElementId,
    source: &RowId,
    target: &RowId,
    target_index: usize,
) -> CmdResult {
    let Some(source_index) = document.row_index(source) else {
        return stale(document, format!("source row {} not found", source));
    };
    let Some(target_row_index) = document.row_index(target) else {
        return stale(document, format!("target row {} not found", target));
    };
    let Some(position) = document.rows[source_index].position(element_id) else {
        return stale(
            document,
            format!("element {} is not in row {}", element_id, source),
        );
    };

    let mut doc = document.clone();
    let element = doc.rows[source_index].elements.remove(position);
    let row = &mut doc.rows[target_row_index];
    let at = insert_position(row.elements.len(), target_index);
    row.elements.insert(at, element.clone());

    let message = format!(
        "Moved {} to r{} slot {}",
        describe(&element),
        target_row_index + 1,
        at + 1
    );
    CmdResult::new(doc)
        .with_affected_elements(vec![element])
        .with_message(CmdMessage::success(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_element::{self, Placement};
    use crate::model::{ColumnSpan, ElementType};

    fn two_rows() -> Document {
        let doc = crate::commands::add_row::run(&Document::new(), ColumnSpan::One).document;
        let doc = crate::commands::add_row::run(&doc, ColumnSpan::One).document;
        let first = doc.rows[0].id.clone();
        let second = doc.rows[1].id.clone();
        let doc = add_element::run(&doc, ElementType::Text, Placement::in_row(first.clone()))
            .document;
        let doc = add_element::run(&doc, ElementType::Email, Placement::in_row(first)).document;
        add_element::run(&doc, ElementType::Tel, Placement::in_row(second)).document
    }

    #[test]
    fn moves_between_rows() {
        let doc = two_rows();
        let (a, b) = (doc.rows[0].id.clone(), doc.rows[1].id.clone());
        let email = doc.rows[0].elements[2].id.clone();

        let result = run(&doc, &email, &a, &b, 0);
        assert_eq!(result.document.rows[0].elements.len(), 2);
        assert_eq!(result.document.rows[1].elements[0].id, email);
    }

    #[test]
    fn reorders_within_a_row() {
        let doc = two_rows();
        let a = doc.rows[0].id.clone();
        let text = doc.rows[0].elements[1].id.clone();

        let result = run(&doc, &text, &a, &a, 0);
        assert_eq!(result.document.rows[0].elements[0].id, text);
        assert_eq!(result.document.rows[0].elements.len(), 3);
    }

    #[test]
    fn round_trip_restores_document() {
        let doc = two_rows();
        let (a, b) = (doc.rows[0].id.clone(), doc.rows[1].id.clone());
        for original in 0..doc.rows[0].elements.len() {
            let id = doc.rows[0].elements[original].id.clone();
            for i in 0..=doc.rows[1].elements.len() {
                let there = run(&doc, &id, &a, &b, i).document;
                let back = run(&there, &id, &b, &a, original).document;
                assert_eq!(back, doc);
            }
        }
    }

    #[test]
    fn element_not_in_source_is_a_no_op() {
        let doc = two_rows();
        let (a, b) = (doc.rows[0].id.clone(), doc.rows[1].id.clone());
        let tel = doc.rows[1].elements[1].id.clone();
        let result = run(&doc, &tel, &a, &b, 0);
        assert!(!result.changed);
        assert_eq!(result.document, doc);
    }

    #[test]
    fn missing_target_keeps_the_element() {
        let doc = two_rows();
        let a = doc.rows[0].id.clone();
        let text = doc.rows[0].elements[1].id.clone();
        let result = run(&doc, &text, &a, &RowId::from("row-nope"), 0);
        assert!(!result.changed);
        assert!(result.document.element(&text).is_some());
    }
}
