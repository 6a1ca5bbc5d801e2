use crate::commands::helpers::{describe, stale};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Document, ElementId};

/// Removes the element from whichever row holds it. The row stays, even if
/// it ends up empty.
pub fn run(document: &Document, element_id: &ElementId) -> CmdResult {
    let Some((row_index, position)) = document.locate(element_id) else {
        return stale(document, format!("element {} not found", element_id));
    };

    let mut doc = document.clone();
    let element = doc.rows[row_index].elements.remove(position);
    let message = format!("Removed {} from r{}", describe(&element), row_index + 1);

    CmdResult::new(doc)
        .with_removed_ids(vec![element.id.clone()])
        .with_affected_elements(vec![element])
        .with_message(CmdMessage::success(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_element::{self, Placement};
    use crate::commands::add_row;
    use crate::model::{ColumnSpan, ElementType};

    #[test]
    fn removed_element_disappears_from_all_elements() {
        let doc = add_element::run(&Document::new(), ElementType::Text, Placement::default())
            .document;
        let doc = add_element::run(&doc, ElementType::Email, Placement::default()).document;
        let id = doc.rows[0].elements[0].id.clone();

        let result = run(&doc, &id);
        assert_eq!(result.removed_ids, vec![id.clone()]);
        assert!(result.document.all_elements().iter().all(|el| el.id != id));
        assert_eq!(result.document.rows[0].elements.len(), 1);
    }

    #[test]
    fn placeholders_can_be_removed_too() {
        let doc = add_row::run(&Document::new(), ColumnSpan::Two).document;
        let id = doc.rows[0].elements[1].id.clone();
        let result = run(&doc, &id);
        assert_eq!(result.document.rows[0].elements.len(), 1);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let doc = add_row::run(&Document::new(), ColumnSpan::Two).document;
        let result = run(&doc, &ElementId::from("element-missing"));
        assert!(!result.changed);
        assert!(result.removed_ids.is_empty());
        assert_eq!(result.document, doc);
    }
}
