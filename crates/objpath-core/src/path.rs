//! # Path Walker: Accessor Segments and Single-Step Descent
//!
//! An accessor path is a string of one or more segments separated by `.`.
//! Each segment is a map key or, when the current node is a sequence, a
//! base-10 index. There is no escaping: a literal `.` cannot appear inside
//! a segment.
//!
//! Every other module walks trees through the primitives here, so the
//! segment rules are defined exactly once:
//!
//! - [`segments`] splits a path. Empty segments are kept (`"a..b"` has an
//!   empty middle key, `""` is a single empty key).
//! - [`parse_index`] accepts only the canonical decimal form of a
//!   non-negative integer. `-1`, `+1`, `01`, `1e2` and `bogus` never
//!   address a sequence element.
//! - [`child`] / [`child_mut`] take one step into a map or sequence.

use serde_json::Value;

/// Separator between accessor path segments.
pub const SEPARATOR: char = '.';

/// Split an accessor path into its segments.
pub fn segments(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

/// Parse a segment as a sequence index.
///
/// Returns `None` unless the segment is ASCII digits with no sign and no
/// leading zero (other than `"0"` itself), and fits in `usize`.
pub fn parse_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    segment.parse().ok()
}

/// Returns true if the value is a map or a sequence.
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Step from `node` into the child named by `segment`.
///
/// Leaves have no children. For sequences the segment must be a valid
/// index within bounds.
pub fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Mutable counterpart of [`child`].
pub fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => parse_index(segment).and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Append `segment` to an accessor path prefix. `None` is the root.
pub(crate) fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        None => segment.to_string(),
        Some(prefix) => format!("{prefix}{SEPARATOR}{segment}"),
    }
}
