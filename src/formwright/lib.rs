//! # Formwright Architecture
//!
//! Formwright is a **UI-agnostic form builder library**. A form is a grid of
//! rows and columns holding input elements; the library edits that grid and
//! compiles it into a standalone HTML form, its stylesheet, a client-side
//! validator and a server-side confirmation snippet. The bundled CLI is one
//! client of the library, not the other way around.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Reads session commands, prints outlines and messages     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - FormApi: one session's document, selection and settings │
//! │  - Thin facade over commands and generators                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure editing operations: Document in, CmdResult out      │
//! │  - Total: stale references leave the document unchanged    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model, Validation and Generation                           │
//! │  - model.rs: Element, Row, Document                         │
//! │  - validation/: rule compiler, evaluator, phone formatting  │
//! │  - generate/: HTML tree, CSS rule list, templated JS/PHP    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! From `api.rs` inward, code takes Rust values and returns Rust values.
//! Nothing prints, nothing exits, nothing reads the clock during generation.
//! The only filesystem access is in `export.rs` (through an
//! [`export::ArtifactSink`]) and `config.rs`, both called explicitly.
//!
//! ## Addresses
//!
//! Element and row ids are stable but unwieldy. Clients that need short
//! references use `r2` / `r2.3` addresses (see `index.rs`), which are resolved
//! to ids against the current document right before a command runs.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): the bulk of the tests, one module each.
//! 2. **Validation and generation**: rule tables, evaluator, rendered output.
//! 3. **API** (`api.rs`): selection bookkeeping and dispatch.
//! 4. **CLI**: tokenizer and parser unit tests, plus end-to-end sessions in
//!    `tests/`.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod index;
pub mod model;
pub mod preview;
pub mod settings;
pub mod validation;
