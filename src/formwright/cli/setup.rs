//! Argument parsing for the binary and for session lines.
//!
//! The binary itself takes few arguments; the real work happens in a session,
//! where every input line is tokenized with [`tokenize`] and parsed by clap as
//! a [`SessionLine`].

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use formwright::model::{ColumnSpan, ElementType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "formwright", bin_name = "formwright", version)]
#[command(
    about = "Build row/column web forms in a terminal session and export them as HTML, CSS and JavaScript",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding config.json (defaults to $FORMWRIGHT_HOME or the platform config dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Read session commands from a file instead of stdin
    #[arg(long, value_name = "FILE", help_heading = "Options")]
    pub script: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an editing session (the default)
    Session,

    /// Show or change the settings new sessions start with
    Config {
        /// Settings key (e.g. form-name, submit-title, enable-sms)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },
}

/// One line of a session.
#[derive(Parser, Debug)]
#[command(
    name = "formwright",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Append a row of empty columns
    AddRow {
        /// Number of columns (1, 2 or 3)
        #[arg(default_value = "1")]
        columns: ColumnSpan,
    },

    /// Add an element (to the last row unless --row is given)
    Add {
        /// text, email, tel, number, date, textarea, select, checkbox, radio or file
        kind: ElementType,

        /// Target row, e.g. r2
        #[arg(long)]
        row: Option<String>,

        /// Column position inside the row, starting at 1
        #[arg(long)]
        col: Option<usize>,

        /// Column span of the element (1, 2 or 3)
        #[arg(long)]
        width: Option<ColumnSpan>,
    },

    /// Drop an element onto a row, filling its first empty column
    Drop { kind: ElementType, row: String },

    /// Move an element to a position in a row
    Move {
        element: String,
        row: String,
        /// Position inside the target row, starting at 1
        position: usize,
    },

    /// Move a row to where another row is
    MoveRow { from: String, to: String },

    /// Remove an element
    #[command(alias = "rm")]
    Remove { element: String },

    /// Remove a row and everything in it
    RemoveRow { row: String },

    /// Change one property of an element
    Set {
        element: String,
        field: PatchField,
        value: String,
    },

    /// Edit the options of a select or radio element
    #[command(name = "option", subcommand)]
    Options(OptionAction),

    /// Select an element, or clear the selection
    Select { element: Option<String> },

    /// Print the form outline
    #[command(alias = "ls")]
    Show,

    /// Try a value against an element's validation
    Check { element: String, value: String },

    /// Show or change this session's settings
    Settings {
        key: Option<String>,
        value: Option<String>,
    },

    /// Print one generated artifact
    Export { artifact: Artifact },

    /// Write every artifact into a directory
    ExportAll { dir: PathBuf },

    /// Write every artifact into a .tar.gz
    Bundle { file: PathBuf },

    /// Start over with an empty form
    Reset,

    /// Show this help
    Help,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
pub enum OptionAction {
    /// Append an option
    Add { element: String, text: String },
    /// Remove the option at a position (starting at 1)
    Remove { element: String, position: usize },
    /// Replace the option at a position (starting at 1)
    Set {
        element: String,
        position: usize,
        text: String,
    },
    /// Replace all options with the 50 US states
    States { element: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PatchField {
    Label,
    Placeholder,
    Required,
    Rows,
    Columns,
    Validation,
    MinLength,
    MaxLength,
    Pattern,
    PatternMessage,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    Html,
    Css,
    Js,
    Confirmation,
    Page,
}

/// Splits a session line into words. Single quotes are literal; double quotes
/// honor `\"` and `\\`. Quoted empty strings are kept as empty words.
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err("unterminated ' quote".to_string()),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err("unterminated \" quote".to_string()),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err("unterminated \" quote".to_string()),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Blank lines and `#` comments are skipped.
pub fn is_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

pub fn session_help() -> String {
    SessionLine::command()
        .help_template("Session commands:\n{subcommands}\n")
        .render_help()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> SessionCommand {
        SessionLine::try_parse_from(tokenize(line).unwrap())
            .unwrap()
            .command
    }

    #[test]
    fn tokenize_splits_on_whitespace() {
        assert_eq!(tokenize("  add   text ").unwrap(), vec!["add", "text"]);
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn tokenize_honors_quotes() {
        assert_eq!(
            tokenize(r#"set r1.1 label "Full Name""#).unwrap(),
            vec!["set", "r1.1", "label", "Full Name"]
        );
        assert_eq!(
            tokenize("set r1.1 pattern '^\\d+$'").unwrap(),
            vec!["set", "r1.1", "pattern", "^\\d+$"]
        );
        assert_eq!(
            tokenize(r#"say "a \"b\" c""#).unwrap(),
            vec!["say", "a \"b\" c"]
        );
        assert_eq!(tokenize(r#"label """#).unwrap(), vec!["label", ""]);
        assert_eq!(tokenize(r#"pre"fix"ed"#).unwrap(), vec!["prefixed"]);
    }

    #[test]
    fn tokenize_rejects_unterminated_quotes() {
        assert!(tokenize("set r1.1 label \"open").is_err());
        assert!(tokenize("set r1.1 label 'open").is_err());
    }

    #[test]
    fn blank_and_comment_lines() {
        assert!(is_blank("   "));
        assert!(is_blank("# a comment"));
        assert!(!is_blank("show"));
    }

    #[test]
    fn parses_add_with_placement() {
        match parse("add email --row r2 --col 1 --width 2") {
            SessionCommand::Add {
                kind,
                row,
                col,
                width,
            } => {
                assert_eq!(kind, ElementType::Email);
                assert_eq!(row.as_deref(), Some("r2"));
                assert_eq!(col, Some(1));
                assert_eq!(width, Some(ColumnSpan::Two));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn add_row_defaults_to_one_column() {
        assert!(matches!(
            parse("add-row"),
            SessionCommand::AddRow {
                columns: ColumnSpan::One
            }
        ));
        assert!(SessionLine::try_parse_from(["add-row", "4"]).is_err());
    }

    #[test]
    fn parses_set_fields() {
        match parse("set r1.1 min-length 3") {
            SessionCommand::Set {
                element,
                field,
                value,
            } => {
                assert_eq!(element, "r1.1");
                assert_eq!(field, PatchField::MinLength);
                assert_eq!(value, "3");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(SessionLine::try_parse_from(["set", "r1.1", "colour", "x"]).is_err());
    }

    #[test]
    fn parses_option_subcommands() {
        assert!(matches!(
            parse("option states r1.1"),
            SessionCommand::Options(OptionAction::States { .. })
        ));
        assert!(matches!(
            parse("option set r1.1 2 \"Second choice\""),
            SessionCommand::Options(OptionAction::Set { position: 2, .. })
        ));
    }

    #[test]
    fn parses_aliases_and_artifacts() {
        assert!(matches!(parse("exit"), SessionCommand::Quit));
        assert!(matches!(parse("ls"), SessionCommand::Show));
        assert!(matches!(
            parse("export confirmation"),
            SessionCommand::Export {
                artifact: Artifact::Confirmation
            }
        ));
        assert!(SessionLine::try_parse_from(["frobnicate"]).is_err());
    }

    #[test]
    fn phone_alias_is_accepted() {
        assert!(matches!(
            parse("add phone"),
            SessionCommand::Add {
                kind: ElementType::Tel,
                ..
            }
        ));
    }

    #[test]
    fn help_lists_commands() {
        let help = session_help();
        assert!(help.contains("add-row"));
        assert!(help.contains("export-all"));
    }

    #[test]
    fn top_level_parses_config() {
        let cli = Cli::try_parse_from(["formwright", "config", "form-name", "Signup"]).unwrap();
        match cli.command {
            Some(Commands::Config { key, value }) => {
                assert_eq!(key.as_deref(), Some("form-name"));
                assert_eq!(value.as_deref(), Some("Signup"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
