use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Document, Element};
use std::fmt::Display;

/// The no-op answer to a reference that no longer resolves.
pub fn stale(document: &Document, what: impl Display) -> CmdResult {
    log::debug!("stale reference ignored: {}", what);
    CmdResult::unchanged(document.clone())
        .with_message(CmdMessage::info(format!("Nothing to do: {}", what)))
}

/// Splice-style insert position: anything past the end appends.
pub fn insert_position(len: usize, index: usize) -> usize {
    index.min(len)
}

/// Short human description used in command messages.
pub fn describe(element: &Element) -> String {
    if element.label.trim().is_empty() {
        format!("{} field", element.kind)
    } else {
        format!("{} \"{}\"", element.kind, element.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{ColumnSpan, ElementType};

    #[test]
    fn stale_keeps_document_and_reports() {
        let doc = Document::new();
        let result = stale(&doc, "row row-x not found");
        assert!(!result.changed);
        assert_eq!(result.document, doc);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn insert_position_clamps_to_len() {
        assert_eq!(insert_position(2, 0), 0);
        assert_eq!(insert_position(2, 9), 2);
    }

    #[test]
    fn describe_falls_back_to_type() {
        let mut el = Element::new(ElementType::Email, ColumnSpan::One);
        assert_eq!(describe(&el), "email field");
        el.label = "Work email".into();
        assert_eq!(describe(&el), "email \"Work email\"");
    }
}
