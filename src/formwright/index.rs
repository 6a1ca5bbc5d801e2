//! Human-friendly addresses for rows and slots.
//!
//! Ids are stable but long, so scripted sessions refer to positions instead:
//! `r2` is the second row, `r2.3` the third slot of the second row. Slots count
//! placeholders too, so an address names exactly what `show` prints. An
//! address is resolved against the current document to a stable id right
//! before a command runs; raw ids are accepted as they are.

use crate::error::{FormError, Result};
use crate::model::{Document, ElementId, RowId};
use std::fmt;
use std::str::FromStr;

/// 1-based position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Row(usize),
    Slot(usize, usize),
}

impl Address {
    pub fn row(&self) -> usize {
        match self {
            Address::Row(r) | Address::Slot(r, _) => *r,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Row(r) => write!(f, "r{}", r),
            Address::Slot(r, s) => write!(f, "r{}.{}", r, s),
        }
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("{} (expected r<row> or r<row>.<slot>)", s);
        let rest = s
            .strip_prefix('r')
            .or_else(|| s.strip_prefix('R'))
            .ok_or_else(invalid)?;
        let parse = |part: &str| -> std::result::Result<usize, String> {
            match part.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(invalid()),
            }
        };
        match rest.split_once('.') {
            Some((row, slot)) => Ok(Address::Slot(parse(row)?, parse(slot)?)),
            None => Ok(Address::Row(parse(rest)?)),
        }
    }
}

fn looks_like_id(s: &str) -> bool {
    ["element-", "placeholder-", "row-"]
        .iter()
        .any(|prefix| s.starts_with(prefix))
}

/// Resolves `r<n>` (or a raw row id) to a row id.
pub fn resolve_row(document: &Document, input: &str) -> Result<RowId> {
    if looks_like_id(input) {
        return Ok(RowId::from(input));
    }
    match input.parse::<Address>().map_err(FormError::Address)? {
        Address::Row(r) => document
            .rows
            .get(r - 1)
            .map(|row| row.id.clone())
            .ok_or_else(|| FormError::Address(format!("No row r{}", r))),
        slot @ Address::Slot(..) => Err(FormError::Address(format!(
            "{} is a slot, expected a row like r{}",
            slot,
            slot.row()
        ))),
    }
}

/// Resolves `r<n>.<m>` (or a raw element id) to an element id.
pub fn resolve_element(document: &Document, input: &str) -> Result<ElementId> {
    if looks_like_id(input) {
        return Ok(ElementId::from(input));
    }
    match input.parse::<Address>().map_err(FormError::Address)? {
        Address::Slot(r, s) => document
            .rows
            .get(r - 1)
            .and_then(|row| row.elements.get(s - 1))
            .map(|el| el.id.clone())
            .ok_or_else(|| FormError::Address(format!("No element at r{}.{}", r, s))),
        Address::Row(r) => Err(FormError::Address(format!(
            "r{} is a row, expected a slot like r{}.1",
            r, r
        ))),
    }
}

/// Current address of an element, if it is in the document.
pub fn address_of(document: &Document, id: &ElementId) -> Option<Address> {
    document
        .locate(id)
        .map(|(r, s)| Address::Slot(r + 1, s + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_row;
    use crate::model::ColumnSpan;

    fn doc() -> Document {
        let d = add_row::run(&Document::new(), ColumnSpan::One).document;
        add_row::run(&d, ColumnSpan::Three).document
    }

    #[test]
    fn parses_rows_and_slots() {
        assert_eq!("r2".parse::<Address>().unwrap(), Address::Row(2));
        assert_eq!("r2.3".parse::<Address>().unwrap(), Address::Slot(2, 3));
        assert_eq!(Address::Slot(1, 2).to_string(), "r1.2");
        assert!("r0".parse::<Address>().is_err());
        assert!("2".parse::<Address>().is_err());
        assert!("r1.x".parse::<Address>().is_err());
    }

    #[test]
    fn resolves_against_the_document() {
        let d = doc();
        assert_eq!(resolve_row(&d, "r2").unwrap(), d.rows[1].id);
        assert_eq!(
            resolve_element(&d, "r2.3").unwrap(),
            d.rows[1].elements[2].id
        );
        assert!(matches!(resolve_row(&d, "r3"), Err(FormError::Address(_))));
        assert!(resolve_element(&d, "r1.2").is_err());
        assert!(resolve_element(&d, "r1").is_err());
    }

    #[test]
    fn raw_ids_pass_through() {
        let d = doc();
        assert_eq!(
            resolve_element(&d, "element-abc").unwrap(),
            ElementId::from("element-abc")
        );
        assert_eq!(resolve_row(&d, "row-xyz").unwrap(), RowId::from("row-xyz"));
    }

    #[test]
    fn address_of_finds_slot() {
        let d = doc();
        let id = d.rows[1].elements[1].id.clone();
        assert_eq!(address_of(&d, &id), Some(Address::Slot(2, 2)));
    }
}
