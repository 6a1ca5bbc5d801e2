//! Option list editing for `select` and `radio` elements.

use crate::commands::helpers::{describe, stale};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Document, Element, ElementId};

pub const US_STATES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// Appends an option. Surrounding whitespace is trimmed; blank text is ignored.
/// Duplicates are kept.
pub fn add(document: &Document, element_id: &ElementId, text: &str) -> CmdResult {
    let text = text.trim();
    if text.is_empty() {
        return CmdResult::unchanged(document.clone())
            .with_message(CmdMessage::info("Empty option ignored"));
    }
    edit(document, element_id, |el| {
        el.options.push(text.to_string());
        Ok(format!("Option \"{}\" added to {}", text, describe(el)))
    })
}

pub fn remove(document: &Document, element_id: &ElementId, index: usize) -> CmdResult {
    edit(document, element_id, |el| {
        if index >= el.options.len() {
            return Err(format!("{} has no option {}", describe(el), index + 1));
        }
        let removed = el.options.remove(index);
        Ok(format!("Option \"{}\" removed from {}", removed, describe(el)))
    })
}

pub fn set(document: &Document, element_id: &ElementId, index: usize, text: &str) -> CmdResult {
    edit(document, element_id, |el| {
        let Some(slot) = el.options.get_mut(index) else {
            return Err(format!("{} has no option {}", describe(el), index + 1));
        };
        *slot = text.to_string();
        Ok(format!("Option {} of {} set to \"{}\"", index + 1, describe(el), text))
    })
}

/// Replaces the options with the fifty US states, alphabetical.
pub fn use_us_states(document: &Document, element_id: &ElementId) -> CmdResult {
    edit(document, element_id, |el| {
        el.options = US_STATES.iter().map(|s| s.to_string()).collect();
        Ok(format!("{} now lists all US states", describe(el)))
    })
}

fn edit<F>(document: &Document, element_id: &ElementId, change: F) -> CmdResult
where
    F: FnOnce(&mut Element) -> Result<String, String>,
{
    let mut doc = document.clone();
    let Some(element) = doc.element_mut(element_id) else {
        return stale(document, format!("element {} not found", element_id));
    };
    if !element.kind.has_options() {
        let message = format!("{} does not take options", describe(element));
        return CmdResult::unchanged(document.clone()).with_message(CmdMessage::warning(message));
    }

    match change(element) {
        Ok(message) => {
            let element = element.clone();
            CmdResult::new(doc)
                .with_affected_elements(vec![element])
                .with_message(CmdMessage::success(message))
        }
        Err(reason) => stale(document, reason),
    }
}
