//! # Error Types
//!
//! Errors raised by the path-accessor operations. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Argument errors are raised for top-level arguments that fail a basic
//!   kind check (a root that is not a map or sequence, a bulk assignment
//!   source that is not a map). They are never suppressible.
//! - A rejected write (bad sequence index, leaf in the middle of a path) is
//!   not an error. It is reported through [`SetOutcome`](crate::SetOutcome)
//!   and the caller must check it.

use thiserror::Error;

/// Top-level error type for path operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// A required argument has the wrong kind.
    #[error("{operation} error: '{argument}' is not {expected}")]
    TypeArgument {
        /// Operation that rejected the argument.
        operation: &'static str,
        /// Name of the offending argument.
        argument: &'static str,
        /// Description of the accepted kind, with article.
        expected: &'static str,
    },

    /// An arithmetic operation name was not recognised.
    #[error("unknown set operation '{name}'; expected one of: set, add, sub, mult, div")]
    UnknownOperation {
        /// The name that failed to parse.
        name: String,
    },

    /// A write was attempted on a frozen tree.
    #[error("cannot modify frozen container at '{path}'")]
    Frozen {
        /// Accessor path of the attempted write.
        path: String,
    },
}

impl ObjectError {
    /// The argument was expected to be a map or sequence.
    pub(crate) fn not_a_container(operation: &'static str, argument: &'static str) -> Self {
        Self::TypeArgument {
            operation,
            argument,
            expected: "an object or array",
        }
    }
}
