//! # objpath-core: Dotted-Path Access for Nested Data
//!
//! Navigates and edits trees of maps, sequences and scalars through
//! accessor paths such as `"level1.array1.0"`. Trees are
//! `serde_json::Value`s; with the workspace's `preserve_order` feature,
//! maps iterate in insertion order.
//!
//! ## Operations
//!
//! - [`depth_traverse`] / [`accessor_list`]: visit or enumerate every leaf.
//! - [`safe_access`] / [`safe_access_or`]: read by path, never failing.
//! - [`safe_equal`]: source-driven structural comparison.
//! - [`safe_set`] / [`safe_set_all`]: write by path, allocating missing
//!   segments, with `set`/`add`/`sub`/`mult`/`div` updates.
//! - [`deep_freeze`]: seal a tree into an immutable [`Frozen`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `objpath-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Reads never fail. Writes fail hard only on argument kind errors;
//!   path problems come back as a [`SetOutcome::Rejected`].
//! - Input trees are caller-owned and acyclic by construction. Recursion
//!   depth follows input depth.

pub mod access;
pub mod coerce;
pub mod error;
pub mod freeze;
pub mod mutate;
pub mod path;
pub mod traverse;

// Re-export primary types for ergonomic imports.
pub use access::{leaf_eq, safe_access, safe_access_or, safe_equal};
pub use error::ObjectError;
pub use freeze::{deep_freeze, Frozen};
pub use mutate::{safe_set, safe_set_all, SetOp, SetOutcome, SetRejection};
pub use path::{is_container, parse_index, segments, SEPARATOR};
pub use traverse::{accessor_list, depth_traverse};
