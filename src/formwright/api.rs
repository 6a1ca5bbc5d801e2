//! # API Facade
//!
//! [`FormApi`] is the session object: it owns the [`Document`], the current
//! selection and the [`ConfirmationSettings`], and is the single entry point
//! for every client (the CLI today, anything else tomorrow).
//!
//! The facade:
//! - **Dispatches** editing calls to `commands/*.rs` and stores the returned
//!   document
//! - **Keeps the selection consistent**: a newly added element becomes
//!   selected; removing the selected element (directly, with its row, or by
//!   resetting) clears it
//! - **Exposes generation** over the current snapshot
//!
//! It does no I/O and holds no global state. Two sessions are two values.

use crate::commands::add_element::Placement;
use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::Result;
use crate::export;
use crate::generate::{self, Artifacts};
use crate::index;
use crate::model::{ColumnSpan, Document, Element, ElementId, ElementPatch, ElementType, RowId};
use crate::preview::{self, LiveInput};
use crate::settings::ConfirmationSettings;
use crate::validation::FieldValue;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FormApi {
    document: Document,
    selection: Option<ElementId>,
    settings: ConfirmationSettings,
}

impl FormApi {
    pub fn new(settings: ConfirmationSettings) -> Self {
        Self {
            document: Document::new(),
            selection: None,
            settings,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &ConfirmationSettings {
        &self.settings
    }

    pub fn selection(&self) -> Option<&ElementId> {
        self.selection.as_ref()
    }

    /// The selected element, looked up among real elements only.
    pub fn selected_element(&self) -> Option<&Element> {
        let selected = self.selection.as_ref()?;
        self.document
            .all_elements()
            .into_iter()
            .find(|el| &el.id == selected)
    }

    fn apply(&mut self, result: CmdResult) -> CmdResult {
        if result.changed {
            self.document = result.document.clone();
        }
        if let Some(selected) = &self.selection {
            if result.removed_ids.contains(selected) {
                self.selection = None;
            }
        }
        result
    }

    fn apply_and_select(&mut self, result: CmdResult) -> CmdResult {
        let created = result.created_element().map(|el| el.id.clone());
        let result = self.apply(result);
        if let Some(id) = created.filter(|_| result.changed) {
            self.selection = Some(id);
        }
        result
    }

    pub fn add_row(&mut self, columns: ColumnSpan) -> CmdResult {
        let result = commands::add_row::run(&self.document, columns);
        self.apply(result)
    }

    pub fn add_element(&mut self, kind: ElementType, placement: Placement) -> CmdResult {
        let result = commands::add_element::run(&self.document, kind, placement);
        self.apply_and_select(result)
    }

    pub fn drop_element(&mut self, kind: ElementType, row: &RowId) -> CmdResult {
        let result = commands::drop::run(&self.document, kind, row);
        self.apply_and_select(result)
    }

    pub fn move_element(
        &mut self,
        id: &ElementId,
        source: &RowId,
        target: &RowId,
        index: usize,
    ) -> CmdResult {
        let result = commands::move_element::run(&self.document, id, source, target, index);
        self.apply(result)
    }

    pub fn reorder_rows(&mut self, from: usize, to: usize) -> CmdResult {
        let result = commands::reorder_rows::run(&self.document, from, to);
        self.apply(result)
    }

    pub fn remove_element(&mut self, id: &ElementId) -> CmdResult {
        let result = commands::remove_element::run(&self.document, id);
        self.apply(result)
    }

    pub fn remove_row(&mut self, row: &RowId) -> CmdResult {
        let result = commands::remove_row::run(&self.document, row);
        self.apply(result)
    }

    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> CmdResult {
        let result = commands::update::run(&self.document, id, patch);
        self.apply(result)
    }

    pub fn add_option(&mut self, id: &ElementId, text: &str) -> CmdResult {
        let result = commands::options::add(&self.document, id, text);
        self.apply(result)
    }

    pub fn remove_option(&mut self, id: &ElementId, index: usize) -> CmdResult {
        let result = commands::options::remove(&self.document, id, index);
        self.apply(result)
    }

    pub fn set_option(&mut self, id: &ElementId, index: usize, text: &str) -> CmdResult {
        let result = commands::options::set(&self.document, id, index, text);
        self.apply(result)
    }

    pub fn use_us_states(&mut self, id: &ElementId) -> CmdResult {
        let result = commands::options::use_us_states(&self.document, id);
        self.apply(result)
    }

    pub fn reset_form(&mut self) -> CmdResult {
        let result = commands::reset::run(&self.document);
        self.selection = None;
        self.apply(result)
    }

    /// Selects a real element. Placeholders and unknown ids leave the
    /// selection as it was.
    pub fn select(&mut self, id: &ElementId) -> CmdResult {
        let found = self
            .document
            .element(id)
            .filter(|el| !el.is_placeholder)
            .cloned();
        match found {
            Some(element) => {
                self.selection = Some(element.id.clone());
                CmdResult::unchanged(self.document.clone())
                    .with_affected_elements(vec![element])
                    .with_message(CmdMessage::info(format!("Selected {}", id)))
            }
            None => {
                log::debug!("select ignored for {}", id);
                CmdResult::unchanged(self.document.clone())
                    .with_message(CmdMessage::info(format!("Nothing to select at {}", id)))
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        self.settings.set(key, value)?;
        Ok(CmdResult::unchanged(self.document.clone())
            .with_message(CmdMessage::success(format!("{} = {}", key, value))))
    }

    pub fn resolve_row(&self, input: &str) -> Result<RowId> {
        index::resolve_row(&self.document, input)
    }

    pub fn resolve_element(&self, input: &str) -> Result<ElementId> {
        index::resolve_element(&self.document, input)
    }

    pub fn generate_html(&self) -> String {
        generate::generate_html(&self.document, &self.settings)
    }

    pub fn generate_css(&self) -> String {
        generate::generate_css(&self.settings)
    }

    pub fn generate_javascript(&self) -> Result<String> {
        generate::generate_javascript(&self.document, &self.settings)
    }

    pub fn generate_confirmation_snippet(&self) -> Result<String> {
        generate::generate_confirmation_snippet(&self.settings)
    }

    pub fn generate_page(&self) -> Result<String> {
        generate::generate_page(&self.document, &self.settings)
    }

    pub fn generate(&self) -> Result<Artifacts> {
        generate::generate(&self.document, &self.settings)
    }

    pub fn export_to_dir(&self, dir: &Path) -> Result<CmdResult> {
        export::export_to_dir(&self.document, &self.settings, dir)
    }

    pub fn bundle(&self, path: &Path) -> Result<CmdResult> {
        export::bundle(&self.document, &self.settings, path)
    }

    /// Simulated input event on one element; `None` if it is not a real element.
    pub fn live_input(&self, id: &ElementId, raw: &str) -> Option<LiveInput> {
        self.document
            .element(id)
            .filter(|el| !el.is_placeholder)
            .map(|el| preview::live_input(el, raw))
    }

    pub fn validate(&self, values: &HashMap<ElementId, FieldValue>) -> BTreeMap<ElementId, String> {
        preview::validate_form(&self.document, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_with_text() -> (FormApi, ElementId) {
        let mut api = FormApi::default();
        let result = api.add_element(ElementType::Text, Placement::default());
        let id = result.created_element().unwrap().id.clone();
        (api, id)
    }

    #[test]
    fn adding_selects_the_new_element() {
        let (api, id) = api_with_text();
        assert_eq!(api.selection(), Some(&id));
        assert_eq!(api.selected_element().map(|e| &e.id), Some(&id));
    }

    #[test]
    fn removing_selected_element_clears_selection() {
        let (mut api, id) = api_with_text();
        api.remove_element(&id);
        assert!(api.selection().is_none());
        assert!(api.document().all_elements().iter().all(|e| e.id != id));
    }

    #[test]
    fn removing_another_element_keeps_selection() {
        let (mut api, first) = api_with_text();
        let second = api
            .add_element(ElementType::Email, Placement::default())
            .created_element()
            .unwrap()
            .id
            .clone();
        api.select(&first);
        api.remove_element(&second);
        assert_eq!(api.selection(), Some(&first));
    }

    #[test]
    fn removing_row_of_selected_element_clears_selection() {
        let (mut api, _) = api_with_text();
        let row = api.document().rows[0].id.clone();
        api.remove_row(&row);
        assert!(api.selection().is_none());
        assert!(api.document().rows.is_empty());
    }

    #[test]
    fn reset_clears_document_and_selection() {
        let (mut api, _) = api_with_text();
        api.reset_form();
        assert!(api.document().rows.is_empty());
        assert!(api.selection().is_none());
    }

    #[test]
    fn placeholders_cannot_be_selected() {
        let mut api = FormApi::default();
        api.add_row(ColumnSpan::Two);
        let placeholder = api.document().rows[0].elements[0].id.clone();
        api.select(&placeholder);
        assert!(api.selection().is_none());
    }

    #[test]
    fn stale_operations_leave_state_alone() {
        let (mut api, id) = api_with_text();
        let before = api.document().clone();
        api.remove_element(&ElementId::from("element-gone"));
        api.update_element(&ElementId::from("element-gone"), &ElementPatch::new().label("x"));
        api.remove_row(&RowId::from("row-gone"));
        assert_eq!(api.document(), &before);
        assert_eq!(api.selection(), Some(&id));
    }

    #[test]
    fn drop_selects_replacement() {
        let mut api = FormApi::default();
        let row = api.add_row(ColumnSpan::Two).created_row.unwrap();
        let result = api.drop_element(ElementType::Tel, &row);
        let id = result.created_element().unwrap().id.clone();
        assert_eq!(api.selection(), Some(&id));
        assert_eq!(api.document().rows[0].elements[0].id, id);
    }

    #[test]
    fn settings_flow_into_generation() {
        let (mut api, _) = api_with_text();
        api.set_setting("submit-title", "Register").unwrap();
        assert!(api.generate_html().contains(">Register</button>"));
        assert!(api.set_setting("nope", "x").is_err());
    }

    #[test]
    fn live_input_formats_phone() {
        let mut api = FormApi::default();
        let id = api
            .add_element(ElementType::Tel, Placement::default())
            .created_element()
            .unwrap()
            .id
            .clone();
        let live = api.live_input(&id, "5551234567").unwrap();
        assert_eq!(live.display, "(555) 123-4567");
        assert!(live.error.is_none());
    }
}
