//! # CLI Layer
//!
//! This module is **one possible UI client** for formwright, not the
//! application itself. It is the only place that knows about stdin, stdout,
//! stderr and exit codes.
//!
//! ## Sessions
//!
//! Running `formwright` with no command starts a session: one editing command
//! per line, read from `--script FILE` or stdin. The form lives only as long
//! as the session; nothing but the defaults in `config.json` is ever saved.
//! On a terminal the session prompts; piped input runs silently, so the same
//! commands work interactively and as a script.
//!
//! ## Structure
//!
//! - `setup`: clap definitions for the binary and for session lines, plus the
//!   quote-aware tokenizer
//! - `commands`: the session loop and per-command handlers
//! - `render`: outline and settings views, colored messages
//! - `styles`: terminal theme
//! - `templates`: output templates

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

use clap::Parser;
use commands::{handle_config, stdin_is_interactive, Session};
use env_logger::Env;
use formwright::config::{self, FormwrightConfig};
use formwright::error::Result;
use setup::{Cli, Commands};
use std::fs::File;
use std::io::BufReader;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = config::config_dir(cli.config_dir.as_deref())?;
    log::debug!("config dir: {}", config_dir.display());

    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&config_dir, key, value),
        Some(Commands::Session) | None => {
            let defaults = FormwrightConfig::load(&config_dir)?.defaults;
            let mut session = Session::new(defaults);
            match cli.script {
                Some(path) => session.run(BufReader::new(File::open(path)?), false),
                None => {
                    let interactive = stdin_is_interactive();
                    session.run(std::io::stdin().lock(), interactive)
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::init_from_env(Env::default().default_filter_or(default_filter));
}
