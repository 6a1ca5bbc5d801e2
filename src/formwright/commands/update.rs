use crate::commands::helpers::{describe, stale};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Document, ElementId, ElementPatch};
use crate::validation;

/// Merges `patch` into the element wherever it sits.
///
/// An unusable custom pattern is kept on the element (the author may still be
/// typing it) but reported as a warning; generation ignores it.
pub fn run(document: &Document, element_id: &ElementId, patch: &ElementPatch) -> CmdResult {
    let mut doc = document.clone();
    let Some(element) = doc.element_mut(element_id) else {
        return stale(document, format!("element {} not found", element_id));
    };

    patch.apply_to(element);
    let element = element.clone();

    let mut result = CmdResult::new(doc).with_affected_elements(vec![element.clone()]);
    result.add_message(CmdMessage::success(format!("Updated {}", describe(&element))));
    for problem in validation::diagnose(&element) {
        result.add_message(CmdMessage::warning(problem));
    }
    result
}
