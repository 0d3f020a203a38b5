//! # Traversal: Leaf Visits and Accessor Enumeration
//!
//! Both operations walk the tree depth-first: sequences in index order,
//! maps in insertion order. Nested containers recurse; every other value
//! is a leaf.
//!
//! `null` is not a leaf for either walk. It is skipped, so
//! [`safe_access`](crate::safe_access) over the accessor list (which treats
//! `null` as a miss) yields exactly the leaves [`depth_traverse`] visits.

use serde_json::Value;

use crate::error::ObjectError;
use crate::path::{is_container, join};

/// Visit every leaf of `container` depth-first.
///
/// The callback runs for its side effect only; the tree is never rebuilt
/// from its results.
///
/// # Errors
///
/// Returns [`ObjectError::TypeArgument`] if `container` is not a map or
/// sequence.
pub fn depth_traverse<F>(container: &Value, mut visit: F) -> Result<(), ObjectError>
where
    F: FnMut(&Value),
{
    if !is_container(container) {
        return Err(ObjectError::not_a_container("depth_traverse", "container"));
    }
    walk(container, &mut visit);
    Ok(())
}

fn walk<F>(node: &Value, visit: &mut F)
where
    F: FnMut(&Value),
{
    match node {
        Value::Array(items) => {
            for item in items {
                walk(item, visit);
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                walk(value, visit);
            }
        }
        Value::Null => {}
        leaf => visit(leaf),
    }
}

/// List the dotted accessor path of every leaf of `container`.
///
/// The order matches [`depth_traverse`]. Sequence segments render as their
/// numeric index; empty child containers contribute nothing.
///
/// # Errors
///
/// Returns [`ObjectError::TypeArgument`] if `container` is not a map or
/// sequence.
pub fn accessor_list(container: &Value) -> Result<Vec<String>, ObjectError> {
    if !is_container(container) {
        return Err(ObjectError::not_a_container("accessor_list", "container"));
    }
    let mut accessors = Vec::new();
    collect(container, None, &mut accessors);
    Ok(accessors)
}

fn collect(node: &Value, prefix: Option<&str>, accessors: &mut Vec<String>) {
    match node {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_entry(item, join(prefix, &index.to_string()), accessors);
            }
        }
        Value::Object(map) => {
            for (key, value) in map {
                collect_entry(value, join(prefix, key), accessors);
            }
        }
        _ => {}
    }
}

fn collect_entry(value: &Value, path: String, accessors: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Array(_) | Value::Object(_) => collect(value, Some(&path), accessors),
        _ => accessors.push(path),
    }
}
