//! # Access: Safe Reads and Structural Equality
//!
//! Reads never fail. A missing segment, a `null` along the way (including
//! at the final segment), a bad sequence index, or a non-container root
//! all come back as a miss.

use serde_json::Value;

use crate::path::{child, is_container, segments};
use crate::traverse::accessor_list;

/// Read the value at `path`, or `None` on any miss.
///
/// ```
/// use objpath_core::safe_access;
/// use serde_json::json;
///
/// let data = json!({"a": {"list": [10, 20]}, "n": null});
/// assert_eq!(safe_access(&data, "a.list.1"), Some(&json!(20)));
/// assert_eq!(safe_access(&data, "a.list.5"), None);
/// assert_eq!(safe_access(&data, "n"), None);
/// ```
pub fn safe_access<'a>(container: &'a Value, path: &str) -> Option<&'a Value> {
    if !is_container(container) {
        return None;
    }
    let mut node = container;
    for segment in segments(path) {
        match child(node, segment) {
            None | Some(Value::Null) => return None,
            Some(next) => node = next,
        }
    }
    Some(node)
}

/// Read the value at `path`, falling back to `default` on any miss.
pub fn safe_access_or<'a>(container: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    safe_access(container, path).unwrap_or(default)
}

/// Compare every leaf of `source` against the same path in `target`.
///
/// Equality is source-driven: leaves present only in `target` never affect
/// the result. Callers needing symmetric equality must also compare in the
/// other direction. Either side being `null` yields false.
///
/// A scalar `source` has no accessor paths; it is compared to `target`
/// directly with [`leaf_eq`].
pub fn safe_equal(source: &Value, target: &Value) -> bool {
    if source.is_null() || target.is_null() {
        return false;
    }
    let Ok(accessors) = accessor_list(source) else {
        return leaf_eq(source, target);
    };
    accessors.iter().all(|accessor| {
        match (safe_access(source, accessor), safe_access(target, accessor)) {
            (Some(left), Some(right)) => leaf_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    })
}

/// Strict equality between two leaves: same kind and same value.
///
/// Numbers compare by numeric value, so `1` equals `1.0`. Containers are
/// never strictly equal to anything, matching identity comparison of
/// distinct nodes.
pub fn leaf_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        _ => false,
    }
}
