//! # Validation Errors
//!
//! A rule failure with `error: true` surfaces as
//! [`ValidationError::Failed`]. Argument errors from the path layer and
//! malformed rule documents use their own variants, so callers can tell a
//! failed check apart from a misuse with [`ValidationError::is_validation`].

use std::fmt;

use objpath_core::ObjectError;
use serde::Serialize;
use thiserror::Error;

/// Which check a rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An `array` rule found something other than a sequence.
    NotAnArray,
    /// A value or element is not of the rule's kind.
    TypeMismatch,
    /// A value or element is not among the expected values.
    UnexpectedValue,
    /// A predicate returned false or an error.
    PredicateFailed,
}

impl FailureKind {
    /// Returns the kind as a snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::NotAnArray => "not_an_array",
            FailureKind::TypeMismatch => "type_mismatch",
            FailureKind::UnexpectedValue => "unexpected_value",
            FailureKind::PredicateFailed => "predicate_failed",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A rule check failed and the rule asked for an error.
    #[error("{message}")]
    Failed {
        /// The check that failed.
        kind: FailureKind,
        /// Human-readable description naming the offending path and value.
        message: String,
    },

    /// An argument has the wrong kind.
    #[error(transparent)]
    TypeArgument(#[from] ObjectError),

    /// A rule document could not be loaded.
    #[error("invalid rule for '{path}': {reason}")]
    InvalidRule {
        /// Accessor path the rule is keyed by, or `(root)` for the document.
        path: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ValidationError {
    /// Returns true if this error came from a failed rule check rather
    /// than from bad arguments or a bad rule document.
    pub fn is_validation(&self) -> bool {
        matches!(self, ValidationError::Failed { .. })
    }

    /// The failed check, for rule failures.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ValidationError::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
