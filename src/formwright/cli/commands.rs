//! Session handlers.
//!
//! A [`Session`] owns one [`FormApi`] and executes session lines against it.
//! Each `handle_*` resolves addresses, calls the API and prints the outcome.
//! A failing line prints its error and the session goes on; only `quit` or
//! end of input ends it.

use super::render::{print_messages, render_outline, render_settings};
use super::setup::{
    is_blank, session_help, tokenize, Artifact, OptionAction, PatchField, SessionCommand,
    SessionLine,
};
use clap::Parser;
use formwright::api::FormApi;
use formwright::commands::add_element::Placement;
use formwright::commands::CmdMessage;
use formwright::config::FormwrightConfig;
use formwright::error::{FormError, Result};
use formwright::export::EMPTY_FORM_MESSAGE;
use formwright::model::{
    ColumnSpan, CustomValidation, Element, ElementPatch, ElementType, Validation,
};
use formwright::settings::{parse_bool, ConfirmationSettings};
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

const PROMPT: &str = "formwright> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    api: FormApi,
}

impl Session {
    pub fn new(settings: ConfirmationSettings) -> Self {
        Self {
            api: FormApi::new(settings),
        }
    }

    /// Reads lines until `quit` or end of input. Prompts only on a terminal.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> Result<()> {
        let prompt = || {
            if interactive {
                print!("{}", PROMPT);
                let _ = std::io::stdout().flush();
            }
        };

        prompt();
        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => eprintln!("Error: {}", e),
            }
            prompt();
        }
        log::debug!("session ended");
        Ok(())
    }

    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        if is_blank(line) {
            return Ok(Flow::Continue);
        }
        let words = tokenize(line).map_err(FormError::Api)?;
        let command = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                eprint!("{}", e.render());
                return Ok(Flow::Continue);
            }
        };
        log::debug!("session command: {:?}", command);
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        let api = &mut self.api;
        match command {
            SessionCommand::AddRow { columns } => handle_add_row(api, columns),
            SessionCommand::Add {
                kind,
                row,
                col,
                width,
            } => handle_add(api, kind, row, col, width)?,
            SessionCommand::Drop { kind, row } => handle_drop(api, kind, &row)?,
            SessionCommand::Move {
                element,
                row,
                position,
            } => handle_move(api, &element, &row, position)?,
            SessionCommand::MoveRow { from, to } => handle_move_row(api, &from, &to)?,
            SessionCommand::Remove { element } => handle_remove(api, &element)?,
            SessionCommand::RemoveRow { row } => handle_remove_row(api, &row)?,
            SessionCommand::Set {
                element,
                field,
                value,
            } => handle_set(api, &element, field, &value)?,
            SessionCommand::Options(action) => handle_option(api, action)?,
            SessionCommand::Select { element } => handle_select(api, element)?,
            SessionCommand::Show => handle_show(api),
            SessionCommand::Check { element, value } => handle_check(api, &element, &value)?,
            SessionCommand::Settings { key, value } => handle_settings(api, key, value)?,
            SessionCommand::Export { artifact } => handle_export(api, artifact)?,
            SessionCommand::ExportAll { dir } => handle_export_all(api, &dir)?,
            SessionCommand::Bundle { file } => handle_bundle(api, &file)?,
            SessionCommand::Reset => handle_reset(api),
            SessionCommand::Help => print!("{}", session_help()),
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Whether stdin is a person typing.
pub fn stdin_is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

fn handle_add_row(api: &mut FormApi, columns: ColumnSpan) {
    let result = api.add_row(columns);
    print_messages(&result.messages);
}

fn handle_add(
    api: &mut FormApi,
    kind: ElementType,
    row: Option<String>,
    col: Option<usize>,
    width: Option<ColumnSpan>,
) -> Result<()> {
    let row = row.map(|r| api.resolve_row(&r)).transpose()?;
    let index = match (col, &row) {
        (Some(0), _) => return Err(FormError::Api("--col starts at 1".to_string())),
        (Some(_), None) => return Err(FormError::Api("--col needs --row".to_string())),
        (Some(c), Some(_)) => Some(c - 1),
        (None, _) => None,
    };
    let placement = Placement { row, index, width };
    let result = api.add_element(kind, placement);
    print_messages(&result.messages);
    print_selected(api);
    Ok(())
}

fn handle_drop(api: &mut FormApi, kind: ElementType, row: &str) -> Result<()> {
    let row = api.resolve_row(row)?;
    let result = api.drop_element(kind, &row);
    print_messages(&result.messages);
    print_selected(api);
    Ok(())
}

fn handle_move(api: &mut FormApi, element: &str, row: &str, position: usize) -> Result<()> {
    let id = api.resolve_element(element)?;
    let target = api.resolve_row(row)?;
    let source = match api.document().locate(&id) {
        Some((r, _)) => api.document().rows[r].id.clone(),
        None => target.clone(),
    };
    let result = api.move_element(&id, &source, &target, position.saturating_sub(1));
    print_messages(&result.messages);
    Ok(())
}

fn handle_move_row(api: &mut FormApi, from: &str, to: &str) -> Result<()> {
    let from_id = api.resolve_row(from)?;
    let to_id = api.resolve_row(to)?;
    let doc = api.document();
    let (Some(from), Some(to)) = (doc.row_index(&from_id), doc.row_index(&to_id)) else {
        return Err(FormError::Address(format!("no such row: {} or {}", from, to)));
    };
    let result = api.reorder_rows(from, to);
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove(api: &mut FormApi, element: &str) -> Result<()> {
    let id = api.resolve_element(element)?;
    let result = api.remove_element(&id);
    print_messages(&result.messages);
    Ok(())
}

fn handle_remove_row(api: &mut FormApi, row: &str) -> Result<()> {
    let row = api.resolve_row(row)?;
    let result = api.remove_row(&row);
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(api: &mut FormApi, element: &str, field: PatchField, value: &str) -> Result<()> {
    let id = api.resolve_element(element)?;
    let Some(current) = api.document().element(&id).cloned() else {
        print_messages(&[CmdMessage::info(format!(
            "Nothing to do: element {} not found",
            id
        ))]);
        return Ok(());
    };
    let patch = build_patch(&current, field, value)?;
    let result = api.update_element(&id, &patch);
    print_messages(&result.messages);
    Ok(())
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FormError::Api(format!("{} must be a whole number, got '{}'", what, value)))
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Turns one `set <field> <value>` into a patch.
///
/// The custom-constraint fields edit the element's current custom
/// validation, switching it to `custom` if it was something else. An empty
/// value clears that constraint.
pub fn build_patch(element: &Element, field: PatchField, value: &str) -> Result<ElementPatch> {
    let patch = ElementPatch::new();
    let patch = match field {
        PatchField::Label => patch.label(value),
        PatchField::Placeholder => patch.placeholder_text(value),
        PatchField::Required => patch.required(parse_bool(value).map_err(|_| {
            FormError::Api(format!("'{}' is not a boolean (use true or false)", value))
        })?),
        PatchField::Rows => patch.rows(parse_number(value, "rows")?),
        PatchField::Columns => patch.columns(value.parse().map_err(FormError::Api)?),
        PatchField::Validation => match optional(value) {
            None => patch.clear_validation(),
            Some(v) if v.eq_ignore_ascii_case("none") => patch.clear_validation(),
            Some(v) => patch.validation(v.parse::<Validation>().map_err(FormError::Api)?),
        },
        PatchField::MinLength
        | PatchField::MaxLength
        | PatchField::Pattern
        | PatchField::PatternMessage => {
            let mut custom = match &element.validation {
                Some(Validation::Custom(custom)) => custom.clone(),
                _ => CustomValidation::default(),
            };
            let text = optional(value);
            match field {
                PatchField::MinLength => {
                    custom.min_length = text.map(|t| parse_number(t, "min-length")).transpose()?
                }
                PatchField::MaxLength => {
                    custom.max_length = text.map(|t| parse_number(t, "max-length")).transpose()?
                }
                PatchField::Pattern => custom.pattern = text.map(str::to_string),
                _ => custom.pattern_message = text.map(str::to_string),
            }
            patch.validation(Validation::Custom(custom))
        }
    };
    Ok(patch)
}

fn handle_option(api: &mut FormApi, action: OptionAction) -> Result<()> {
    let result = match action {
        OptionAction::Add { element, text } => {
            let id = api.resolve_element(&element)?;
            api.add_option(&id, &text)
        }
        OptionAction::Remove { element, position } => {
            let id = api.resolve_element(&element)?;
            api.remove_option(&id, option_index(position)?)
        }
        OptionAction::Set {
            element,
            position,
            text,
        } => {
            let id = api.resolve_element(&element)?;
            api.set_option(&id, option_index(position)?, &text)
        }
        OptionAction::States { element } => {
            let id = api.resolve_element(&element)?;
            api.use_us_states(&id)
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn option_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| FormError::Api("option positions start at 1".to_string()))
}

fn handle_select(api: &mut FormApi, element: Option<String>) -> Result<()> {
    match element {
        Some(element) => {
            let id = api.resolve_element(&element)?;
            let result = api.select(&id);
            print_messages(&result.messages);
        }
        None => {
            api.clear_selection();
            print_messages(&[CmdMessage::info("Selection cleared")]);
        }
    }
    Ok(())
}

fn print_selected(api: &FormApi) {
    let Some(id) = api.selection() else {
        return;
    };
    if let Some(address) = formwright::index::address_of(api.document(), id) {
        print_messages(&[CmdMessage::info(format!("Selected {}", address))]);
    }
}

fn handle_show(api: &FormApi) {
    print!("{}", render_outline(api.document(), api.selection()));
}

fn handle_check(api: &FormApi, element: &str, value: &str) -> Result<()> {
    let id = api.resolve_element(element)?;
    let Some(live) = api.live_input(&id, value) else {
        print_messages(&[CmdMessage::info(format!("Nothing to check at {}", element))]);
        return Ok(());
    };
    let mut messages = Vec::new();
    if live.display != value {
        messages.push(CmdMessage::info(format!("Shows as: {}", live.display)));
    }
    messages.push(match live.error {
        Some(error) => CmdMessage::warning(error),
        None => CmdMessage::success("Valid"),
    });
    print_messages(&messages);
    Ok(())
}

fn handle_settings(api: &mut FormApi, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => print!("{}", render_settings(&api.settings().list_all())),
        (Some(key), None) => println!("{}", lookup(api.settings(), &key)?),
        (Some(key), Some(value)) => {
            let result = api.set_setting(&key, &value)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn lookup(settings: &ConfirmationSettings, key: &str) -> Result<String> {
    settings
        .get(key)
        .ok_or_else(|| FormError::Settings(format!("Unknown setting '{}'", key)))
}

fn handle_export(api: &FormApi, artifact: Artifact) -> Result<()> {
    if !api.document().has_real_elements() {
        print_messages(&[CmdMessage::info(EMPTY_FORM_MESSAGE)]);
        return Ok(());
    }
    let text = match artifact {
        Artifact::Html => api.generate_html(),
        Artifact::Css => api.generate_css(),
        Artifact::Js => api.generate_javascript()?,
        Artifact::Confirmation => api.generate_confirmation_snippet()?,
        Artifact::Page => api.generate_page()?,
    };
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn handle_export_all(api: &FormApi, dir: &Path) -> Result<()> {
    let result = api.export_to_dir(dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_bundle(api: &FormApi, file: &Path) -> Result<()> {
    let result = api.bundle(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(api: &mut FormApi) {
    let result = api.reset_form();
    print_messages(&result.messages);
}

/// `formwright config [key] [value]`: manages the saved defaults.
pub fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = FormwrightConfig::load(config_dir)?;
    match (key, value) {
        (None, _) => print!("{}", render_settings(&config.defaults.list_all())),
        (Some(key), None) => println!("{}", lookup(&config.defaults, &key)?),
        (Some(key), Some(value)) => {
            config.defaults.set(&key, &value)?;
            config.save(config_dir)?;
            print_messages(&[CmdMessage::success(format!(
                "{} = {} (saved to {})",
                key,
                value,
                config_dir.display()
            ))]);
        }
    }
    Ok(())
}
