//! # objpath-validate: Rule-Driven Validation of Nested Data
//!
//! Checks values addressed by dotted accessor paths against declarative
//! rules. Each [`Rule`] picks a test (`array`, `entry` or `entry|array`),
//! an optional [`ValueKind`], and an optional [`Expected`] list, set or
//! predicate.
//!
//! ## Entry points
//!
//! - [`validate`]: run a [`RuleSet`], returning the last rule's result.
//! - [`validate_all`]: run a [`RuleSet`], collecting every failure into a
//!   [`ValidationReport`].
//! - [`validate_array`] / [`validate_entry`] / [`validate_entry_or_array`]:
//!   check a single path.
//!
//! Rule sets are built in code or loaded from JSON/YAML with
//! [`RuleSet::from_json_str`] and [`RuleSet::from_yaml_str`].
//!
//! ## Crate Policy
//!
//! - Depends only on `objpath-core` internally.
//! - Validation never mutates the tree it checks.
//! - `Ok(false)` is a soft failure; `Err(ValidationError::Failed)` is a
//!   hard one. [`ValidationError::is_validation`] separates rule failures
//!   from argument and rule-document errors.

pub mod error;
pub mod rule;
pub mod validate;
pub mod yaml;

pub use error::{FailureKind, ValidationError};
pub use rule::{Expected, Predicate, Rule, RuleSet, RuleTest, ValueKind};
pub use validate::{
    validate, validate_all, validate_array, validate_entry, validate_entry_or_array,
    RuleFailure, ValidationReport, DEFAULT_DATA_NAME,
};
pub use yaml::{parse_yaml, yaml_to_json_value};
