//! # Mutate: Path-Based Writes
//!
//! [`safe_set`] walks an accessor path, allocating an empty map for every
//! missing segment, and applies a [`SetOp`] at the final segment.
//!
//! ## Rejection
//!
//! A write is rejected (not an error) when a segment under a sequence is
//! not a canonical index, when an index lies more than one past the end of
//! its sequence, or when a non-final segment holds `null` or a leaf.
//!
//! Rejection is not rolled back. Every check runs before the offending
//! segment allocates anything, and a segment below a fresh allocation
//! always lands in an empty map, so in practice a rejected call leaves the
//! tree as it found it. The no-rollback rule is kept anyway: callers that
//! need atomic writes must validate first or work on a copy.
//!
//! ```
//! use objpath_core::{safe_set, SetOp};
//! use serde_json::json;
//!
//! let mut data = json!({"list": [10, 20]});
//! assert!(safe_set(&mut data, "a.b.c", json!(1), SetOp::Set).unwrap().is_applied());
//! assert!(!safe_set(&mut data, "list.-1", json!(1), SetOp::Set).unwrap().is_applied());
//! assert_eq!(data, json!({"list": [10, 20], "a": {"b": {"c": 1}}}));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce::{number_value, to_number, to_text};
use crate::error::ObjectError;
use crate::path::{is_container, parse_index, segments};

/// Operation applied at the final segment of a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetOp {
    /// Assign the value.
    #[default]
    Set,
    /// Add the value (concatenates when either side is a string).
    Add,
    /// Subtract the value.
    Sub,
    /// Multiply by the value.
    Mult,
    /// Divide by the value.
    Div,
}

impl SetOp {
    /// All operations, in declaration order.
    pub const ALL: [SetOp; 5] = [SetOp::Set, SetOp::Add, SetOp::Sub, SetOp::Mult, SetOp::Div];

    /// The operation's name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOp::Set => "set",
            SetOp::Add => "add",
            SetOp::Sub => "sub",
            SetOp::Mult => "mult",
            SetOp::Div => "div",
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SetOp {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SetOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ObjectError::UnknownOperation { name: s.to_string() })
    }
}

/// Result of a [`safe_set`] call that passed its argument checks.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// The operation was applied at the final segment.
    Applied,
    /// The walk stopped early. Earlier allocations are kept.
    Rejected(SetRejection),
}

impl SetOutcome {
    /// Returns true if the write was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, SetOutcome::Applied)
    }
}

/// Why a write stopped before reaching its final segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetRejection {
    /// A segment under a sequence is not a non-negative integer.
    InvalidIndex {
        /// The offending segment.
        segment: String,
    },
    /// A sequence index lies more than one past the end.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the sequence at the time of the write.
        len: usize,
    },
    /// A non-final segment holds `null` or a leaf.
    NotAContainer {
        /// The offending segment.
        segment: String,
    },
}

impl fmt::Display for SetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetRejection::InvalidIndex { segment } => {
                write!(f, "'{segment}' is not a valid sequence index")
            }
            SetRejection::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is past the end of a sequence of length {len}")
            }
            SetRejection::NotAContainer { segment } => {
                write!(f, "'{segment}' does not hold an object or array")
            }
        }
    }
}

/// Write `value` at `path` using `op`.
///
/// Missing segments are allocated as empty maps. At the final segment a
/// missing value is allocated as an empty map too before `op` runs, so an
/// arithmetic operation on a missing leaf coerces an empty map (NaN, stored
/// as `null`; `add` with a string concatenates `{}`).
///
/// # Errors
///
/// Returns [`ObjectError::TypeArgument`] if `container` is not a map or
/// sequence. All other failures are a [`SetOutcome::Rejected`].
pub fn safe_set(
    container: &mut Value,
    path: &str,
    value: Value,
    op: SetOp,
) -> Result<SetOutcome, ObjectError> {
    if !is_container(container) {
        return Err(ObjectError::not_a_container("safe_set", "container"));
    }

    let mut node = container;
    let mut parts = segments(path).peekable();
    while let Some(segment) = parts.next() {
        let slot = match slot_mut(node, segment) {
            Ok(slot) => slot,
            Err(rejection) => return Ok(reject(path, rejection)),
        };

        if parts.peek().is_none() {
            apply(slot, value, op);
            return Ok(SetOutcome::Applied);
        }

        if !is_container(slot) {
            let rejection = SetRejection::NotAContainer {
                segment: segment.to_string(),
            };
            return Ok(reject(path, rejection));
        }
        node = slot;
    }

    // `segments` always yields at least one segment.
    Ok(SetOutcome::Applied)
}

/// Apply every `path → value` entry of `assignments` with [`SetOp::Set`].
///
/// Entries run in map order. Individual rejections are not surfaced, so
/// later entries still apply after an earlier one was rejected.
///
/// # Errors
///
/// Returns [`ObjectError::TypeArgument`] if `container` is not a map or
/// sequence, or if `assignments` is not a map.
pub fn safe_set_all(container: &mut Value, assignments: &Value) -> Result<(), ObjectError> {
    if !is_container(container) {
        return Err(ObjectError::not_a_container("safe_set_all", "container"));
    }
    let Value::Object(assignments) = assignments else {
        return Err(ObjectError::TypeArgument {
            operation: "safe_set_all",
            argument: "assignments",
            expected: "an object",
        });
    };

    for (path, value) in assignments {
        // Rejections are logged by `reject`.
        let _ = safe_set(container, path, value.clone(), SetOp::Set)?;
    }
    Ok(())
}

fn reject(path: &str, rejection: SetRejection) -> SetOutcome {
    tracing::debug!(path, %rejection, "write rejected");
    SetOutcome::Rejected(rejection)
}

/// Fetch the child slot for `segment`, allocating an empty map if absent.
fn slot_mut<'a>(node: &'a mut Value, segment: &str) -> Result<&'a mut Value, SetRejection> {
    match node {
        Value::Object(map) => Ok(map
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()))),
        Value::Array(items) => {
            let index = parse_index(segment).ok_or_else(|| SetRejection::InvalidIndex {
                segment: segment.to_string(),
            })?;
            let len = items.len();
            if index > len {
                return Err(SetRejection::IndexOutOfRange { index, len });
            }
            if index == len {
                items.push(Value::Object(Map::new()));
            }
            Ok(&mut items[index])
        }
        // Callers only descend into containers.
        _ => Err(SetRejection::NotAContainer {
            segment: segment.to_string(),
        }),
    }
}

fn apply(slot: &mut Value, value: Value, op: SetOp) {
    *slot = match op {
        SetOp::Set => value,
        _ => arithmetic(op, slot, &value),
    };
}

fn arithmetic(op: SetOp, current: &Value, operand: &Value) -> Value {
    if op == SetOp::Add && (current.is_string() || operand.is_string()) {
        return Value::String(format!("{}{}", to_text(current), to_text(operand)));
    }

    if let (Some(a), Some(b)) = (current.as_i64(), operand.as_i64()) {
        let exact = match op {
            SetOp::Add => a.checked_add(b),
            SetOp::Sub => a.checked_sub(b),
            SetOp::Mult => a.checked_mul(b),
            SetOp::Div if b != 0 && a.checked_rem(b) == Some(0) => a.checked_div(b),
            _ => None,
        };
        if let Some(n) = exact {
            return Value::from(n);
        }
    }

    let (a, b) = (to_number(current), to_number(operand));
    number_value(match op {
        SetOp::Add => a + b,
        SetOp::Sub => a - b,
        SetOp::Mult => a * b,
        SetOp::Div => a / b,
        SetOp::Set => b,
    })
}
