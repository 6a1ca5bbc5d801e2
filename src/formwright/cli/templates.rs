//! Output templates for the session.
//!
//! Templates live in their own files so they can be edited and diffed apart
//! from the code. They are minijinja templates rendered with `trim_blocks`
//! and `lstrip_blocks`, so a line holding only a block tag produces nothing
//! and every other line ends where it ends in the file.
//!
//! Layout math (padding, alignment) is done in Rust before rendering; style
//! choices that depend on data are passed in as style names rather than
//! branched on in the template.

pub const OUTLINE_TEMPLATE: &str = include_str!("templates/outline.tmp");
pub const SETTINGS_TEMPLATE: &str = include_str!("templates/settings.tmp");
