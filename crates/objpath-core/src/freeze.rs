//! # Deep Freeze: Immutable Container Trees
//!
//! [`deep_freeze`] takes ownership of a container tree and seals it into a
//! [`Frozen`] value. Every container reachable from the root, including
//! containers nested inside sequences, is sealed along with it. Scalars
//! need no sealing.
//!
//! ## Immutability
//!
//! `Frozen` only ever hands out `&Value`. There is no `DerefMut`, no
//! `AsMut`, and no way to take the tree back out, so assignment,
//! insertion, removal and sequence growth are rejected at compile time on
//! the root and on every descendant:
//!
//! ```compile_fail
//! use objpath_core::deep_freeze;
//! use serde_json::json;
//!
//! let frozen = deep_freeze(json!({"a": {"a1": [{"e1": 1}]}})).unwrap();
//! frozen["a"]["a1"].as_array_mut().unwrap().push(json!(1));
//! ```
//!
//! ```compile_fail
//! use objpath_core::{deep_freeze, safe_set, SetOp};
//! use serde_json::json;
//!
//! let mut frozen = deep_freeze(json!({"c": [{"c1": 3}]})).unwrap();
//! safe_set(&mut *frozen, "c.0.c1", json!(4), SetOp::Set).unwrap();
//! ```
//!
//! Callers that only know at runtime whether a tree is frozen go through
//! [`Frozen::try_set`], which always fails with [`ObjectError::Frozen`].

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::access::safe_access;
use crate::error::ObjectError;
use crate::mutate::{SetOp, SetOutcome};
use crate::path::is_container;
use crate::traverse::{accessor_list, depth_traverse};

/// A sealed container tree.
///
/// Cloning is cheap: clones share the same tree. `Frozen` is `Send + Sync`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frozen {
    root: Arc<Value>,
    containers: usize,
}

/// Seal `container` and every container reachable from it.
///
/// # Errors
///
/// Returns [`ObjectError::TypeArgument`] if `container` is not a map or
/// sequence.
pub fn deep_freeze(container: Value) -> Result<Frozen, ObjectError> {
    if !is_container(&container) {
        return Err(ObjectError::not_a_container("deep_freeze", "container"));
    }
    let containers = seal(&container);
    tracing::debug!(containers, "container tree frozen");
    Ok(Frozen {
        root: Arc::new(container),
        containers,
    })
}

/// Walk in traversal order, counting every container sealed.
fn seal(node: &Value) -> usize {
    match node {
        Value::Array(items) => 1 + items.iter().map(seal).sum::<usize>(),
        Value::Object(map) => 1 + map.values().map(seal).sum::<usize>(),
        _ => 0,
    }
}

impl Frozen {
    /// The sealed tree.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Number of sealed containers, root included.
    pub fn container_count(&self) -> usize {
        self.containers
    }

    /// Read the value at `path`. See [`safe_access`].
    pub fn get(&self, path: &str) -> Option<&Value> {
        safe_access(&self.root, path)
    }

    /// Accessor paths of every leaf. See [`accessor_list`].
    pub fn accessor_list(&self) -> Vec<String> {
        // The root was checked to be a container on construction.
        accessor_list(&self.root).unwrap_or_default()
    }

    /// Visit every leaf. See [`depth_traverse`].
    pub fn depth_traverse<F>(&self, visit: F)
    where
        F: FnMut(&Value),
    {
        // The root was checked to be a container on construction.
        let _ = depth_traverse(&self.root, visit);
    }

    /// Attempt a write. Always fails without touching the tree.
    ///
    /// # Errors
    ///
    /// Always returns [`ObjectError::Frozen`].
    pub fn try_set(&self, path: &str, _value: Value, op: SetOp) -> Result<SetOutcome, ObjectError> {
        tracing::debug!(path, %op, "write attempted on frozen tree");
        Err(ObjectError::Frozen {
            path: path.to_string(),
        })
    }

    /// Attempt a bulk write. Always fails without touching the tree.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectError::TypeArgument`] if `assignments` is not a map,
    /// otherwise [`ObjectError::Frozen`] naming the first assignment path.
    pub fn try_set_all(&self, assignments: &Value) -> Result<(), ObjectError> {
        let Value::Object(assignments) = assignments else {
            return Err(ObjectError::TypeArgument {
                operation: "safe_set_all",
                argument: "assignments",
                expected: "an object",
            });
        };
        match assignments.keys().next() {
            Some(path) => Err(ObjectError::Frozen { path: path.clone() }),
            None => Ok(()),
        }
    }
}

impl Deref for Frozen {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.root
    }
}

impl AsRef<Value> for Frozen {
    fn as_ref(&self) -> &Value {
        &self.root
    }
}

impl Serialize for Frozen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deep() -> Value {
        json!({
            "a": {"a1": [{"e1": 1}]},
            "b": {"b1": 2},
            "c": [{"c1": 3}],
            "array": [[{"ae1": "a"}], [{"ae2": "b"}], [{"ae3": "c"}]],
            "level1": {
                "d": {"d1": [{"e1": 4}]},
                "e": {"e1": 5},
                "f": [{"f1": 6}],
                "array1": [[{"ae1": "d"}], [{"ae2": "e"}], [{"ae3": "f"}]],
                "level2": {
                    "g": {"g1": [{"e1": 7}]},
                    "h": {"h1": 8},
                    "i": [{"i1": 9}],
                    "array2": [[{"ae1": "g"}], [{"ae2": "h"}], [{"ae3": "i"}]]
                }
            }
        })
    }

    #[test]
    fn test_every_container_is_sealed() {
        let frozen = deep_freeze(deep()).unwrap();
        // The root, level1 and level2 each hold 13 containers besides themselves.
        assert_eq!(frozen.container_count(), 42);
    }

    #[test]
    fn test_frozen_reads_match_original() {
        let frozen = deep_freeze(deep()).unwrap();
        assert_eq!(frozen.as_value(), &deep());
        assert_eq!(frozen.get("level1.level2.array2.2.0.ae3"), Some(&json!("i")));
        assert_eq!(frozen.accessor_list(), accessor_list(&deep()).unwrap());

        let mut leaves = 0;
        frozen.depth_traverse(|_| leaves += 1);
        assert_eq!(leaves, frozen.accessor_list().len());
    }

    #[test]
    fn test_try_set_rejects_every_path() {
        let frozen = deep_freeze(deep()).unwrap();
        for path in ["a.a1", "a.a1.0.e1", "c.1", "array.0.0.new", "level1.level2.array2.1"] {
            let err = frozen.try_set(path, json!(1), SetOp::Set).unwrap_err();
            assert_eq!(err, ObjectError::Frozen { path: path.to_string() });
        }
        assert_eq!(frozen.as_value(), &deep());
    }

    #[test]
    fn test_try_set_all_rejects() {
        let frozen = deep_freeze(deep()).unwrap();
        assert!(matches!(
            frozen.try_set_all(&json!({"b.b1": 3})),
            Err(ObjectError::Frozen { .. })
        ));
        assert!(frozen.try_set_all(&json!({})).is_ok());
        assert!(matches!(
            frozen.try_set_all(&json!(1)),
            Err(ObjectError::TypeArgument { .. })
        ));
    }

    #[test]
    fn test_scalar_root_rejected() {
        assert!(matches!(
            deep_freeze(json!("x")),
            Err(ObjectError::TypeArgument { .. })
        ));
    }

    #[test]
    fn test_clones_share_tree() {
        let frozen = deep_freeze(json!({"a": 1})).unwrap();
        let copy = frozen.clone();
        assert!(std::ptr::eq(frozen.as_value(), copy.as_value()));
    }

    #[test]
    fn test_frozen_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Frozen>();
    }

    #[test]
    fn test_serializes_as_tree() {
        let frozen = deep_freeze(json!({"a": [1, 2]})).unwrap();
        assert_eq!(serde_json::to_string(&frozen).unwrap(), r#"{"a":[1,2]}"#);
    }
}
