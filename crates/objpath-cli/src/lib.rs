//! # objpath-cli: Path Operations from the Command Line
//!
//! Provides the `objpath` binary: dotted-path reads, writes, comparison and
//! rule validation over JSON and YAML documents.
//!
//! ## Subcommands
//!
//! - `objpath paths FILE`: list every accessor path.
//! - `objpath leaves FILE`: print every leaf in traversal order.
//! - `objpath get FILE PATH [--default VALUE]`: read one path.
//! - `objpath set FILE PATH VALUE [--op OP] [--output FILE]`: write one path.
//! - `objpath set-all FILE ASSIGNMENTS [--output FILE]`: bulk writes.
//! - `objpath equal SOURCE TARGET [--symmetric]`: leaf-wise comparison.
//! - `objpath validate FILE [--rules RULES] [--name NAME] [--all]`: rule checks.
//!
//! ## Exit codes
//!
//! `0` success, `1` a check or write did not pass, `2` operational error
//! (unreadable input, malformed rules, bad arguments).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the `*Args` structs; handlers take parsed
//!   arguments and an output sink, and return an exit code.
//! - No path or validation logic here; handlers delegate to
//!   `objpath-core` and `objpath-validate`.

pub mod access;
pub mod config;
pub mod document;
pub mod mutate;
pub mod validate;

/// Exit code for operational errors.
pub const EXIT_ERROR: u8 = 2;
