//! # Rules and Rule Sets
//!
//! A [`Rule`] says how the value at one accessor path is checked: which
//! test runs ([`RuleTest`]), an optional [`ValueKind`], an optional
//! [`Expected`] constraint, and two flags. `required: false` skips the
//! rule when the value is missing. `error: false` turns a failure into
//! `Ok(false)` instead of an error.
//!
//! A [`RuleSet`] maps accessor paths to rules and keeps insertion order.
//!
//! ## Loading
//!
//! Rule sets load from JSON or YAML documents of the form
//!
//! ```yaml
//! name:
//!   test: entry
//!   type: string
//! tags:
//!   test: array
//!   expected: [red, green]
//!   required: false
//! level:
//!   test: entry|array
//!   expected: { set: [1, 2, 3] }
//!   error: false
//! ```
//!
//! `expected` as a sequence is a list; `{set: [...]}` is a set. Predicates
//! cannot be expressed in a document and are attached in code with
//! [`Rule::predicate`].

use std::fmt;
use std::sync::Arc;

use objpath_core::leaf_eq;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::yaml::parse_yaml;

/// Path used in [`ValidationError::InvalidRule`] for whole-document errors.
pub const ROOT_PATH: &str = "(root)";

/// Which validator a rule dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleTest {
    /// The value must be a sequence; element checks apply per element.
    #[serde(rename = "array")]
    Array,
    /// Checks apply to the value itself.
    #[serde(rename = "entry")]
    Entry,
    /// `Array` when the value is a sequence, `Entry` otherwise.
    #[serde(rename = "entry|array")]
    EntryOrArray,
}

impl RuleTest {
    /// The name used in rule documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTest::Array => "array",
            RuleTest::Entry => "entry",
            RuleTest::EntryOrArray => "entry|array",
        }
    }

    /// Look up a test by its document name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "array" => Some(RuleTest::Array),
            "entry" => Some(RuleTest::Entry),
            "entry|array" => Some(RuleTest::EntryOrArray),
            _ => None,
        }
    }
}

impl fmt::Display for RuleTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a JSON value, for `type` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` or `false`.
    #[serde(alias = "bool")]
    Boolean,
    /// Any number.
    Number,
    /// A string.
    String,
    /// A sequence.
    Array,
    /// A map.
    Object,
}

impl ValueKind {
    /// The kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns true if `value` is of exactly this kind.
    pub fn matches(&self, value: &Value) -> bool {
        Self::of(value) == *self
    }

    /// The name used in rule documents and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    /// Look up a kind by name. `bool` is accepted for `boolean`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(ValueKind::Null),
            "boolean" | "bool" => Some(ValueKind::Boolean),
            "number" => Some(ValueKind::Number),
            "string" => Some(ValueKind::String),
            "array" => Some(ValueKind::Array),
            "object" => Some(ValueKind::Object),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate over a single value.
///
/// `Ok(false)` and `Err(reason)` both fail the check; the reason is folded
/// into the failure message.
pub type Predicate = dyn Fn(&Value) -> Result<bool, String> + Send + Sync;

/// Values a checked value must belong to, or a predicate it must satisfy.
#[derive(Clone)]
pub enum Expected {
    /// Membership in a list, by strict equality.
    List(Vec<Value>),
    /// Membership in a set. Build with [`Expected::set`] to de-duplicate.
    Set(Vec<Value>),
    /// A predicate every checked value must satisfy.
    Predicate(Arc<Predicate>),
}

impl Expected {
    /// A set of values, de-duplicated by strict equality.
    pub fn set(values: impl IntoIterator<Item = Value>) -> Self {
        let mut members: Vec<Value> = Vec::new();
        for value in values {
            if !members.iter().any(|m| leaf_eq(m, &value)) {
                members.push(value);
            }
        }
        Expected::Set(members)
    }

    /// Returns `Some(true/false)` for membership constraints, `None` for
    /// predicates.
    pub fn contains(&self, value: &Value) -> Option<bool> {
        match self {
            Expected::List(members) | Expected::Set(members) => {
                Some(members.iter().any(|m| leaf_eq(m, value)))
            }
            Expected::Predicate(_) => None,
        }
    }

    /// The members as a compact JSON array, for messages.
    pub fn to_json(&self) -> String {
        match self {
            Expected::List(members) | Expected::Set(members) => {
                serde_json::to_string(members).unwrap_or_default()
            }
            Expected::Predicate(_) => String::from("<predicate>"),
        }
    }
}

impl fmt::Debug for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::List(members) => f.debug_tuple("List").field(members).finish(),
            Expected::Set(members) => f.debug_tuple("Set").field(members).finish(),
            Expected::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// How the value at one accessor path is validated.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Which validator runs.
    pub test: RuleTest,
    /// Required kind of the value (entry) or of each element (array).
    pub kind: Option<ValueKind>,
    /// Membership or predicate constraint.
    pub expected: Option<Expected>,
    /// Message used when a predicate returns `false` without a reason.
    pub message: Option<String>,
    /// When false, a missing value passes without checks.
    pub required: bool,
    /// When false, failures return `Ok(false)` instead of an error.
    pub error: bool,
}

impl Rule {
    /// A rule with no constraints, required, raising on failure.
    pub fn new(test: RuleTest) -> Self {
        Self {
            test,
            kind: None,
            expected: None,
            message: None,
            required: true,
            error: true,
        }
    }

    /// An `array` rule.
    pub fn array() -> Self {
        Self::new(RuleTest::Array)
    }

    /// An `entry` rule.
    pub fn entry() -> Self {
        Self::new(RuleTest::Entry)
    }

    /// An `entry|array` rule.
    pub fn entry_or_array() -> Self {
        Self::new(RuleTest::EntryOrArray)
    }

    /// Require values of `kind`.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require membership in `values`.
    pub fn expected_list(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.expected = Some(Expected::List(values.into_iter().collect()));
        self
    }

    /// Require membership in the set of `values`.
    pub fn expected_set(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.expected = Some(Expected::set(values));
        self
    }

    /// Require `predicate` to hold.
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, String> + Send + Sync + 'static,
    {
        self.expected = Some(Expected::Predicate(Arc::new(predicate)));
        self
    }

    /// Message reported when the predicate returns `false`.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Skip the rule when the value is missing.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Report failures as `Ok(false)`.
    pub fn soft(mut self) -> Self {
        self.error = false;
        self
    }
}

/// Rules keyed by accessor path, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, Rule)>,
}

impl RuleSet {
    /// An empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, builder style. See [`RuleSet::insert`].
    pub fn with(mut self, path: impl Into<String>, rule: Rule) -> Self {
        self.insert(path, rule);
        self
    }

    /// Add a rule for `path`. An existing rule for the same path is
    /// replaced in place.
    pub fn insert(&mut self, path: impl Into<String>, rule: Rule) {
        let path = path.into();
        match self.rules.iter_mut().find(|(p, _)| *p == path) {
            Some(slot) => slot.1 = rule,
            None => self.rules.push((path, rule)),
        }
    }

    /// The rule for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|(p, _)| p == path).map(|(_, r)| r)
    }

    /// Mutable access to the rule for `path`, e.g. to attach a predicate
    /// after loading.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Rule> {
        self.rules
            .iter_mut()
            .find(|(p, _)| p == path)
            .map(|(_, r)| r)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(p, r)| (p.as_str(), r))
    }

    /// Load a rule set from a JSON value: a map from accessor path to rule
    /// document.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRule`] if the value is not a map,
    /// a rule document has unknown fields, or a `test`, `type` or
    /// `expected` is not recognised.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let Value::Object(map) = value else {
            return Err(invalid(ROOT_PATH, "rule set must be a map of path to rule"));
        };
        let mut set = RuleSet::new();
        for (path, document) in map {
            let rule = rule_from_document(path, document)?;
            set.insert(path.clone(), rule);
        }
        tracing::debug!(rules = set.len(), "rule set loaded");
        Ok(set)
    }

    /// Load a rule set from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRule`] on malformed JSON or rules.
    pub fn from_json_str(text: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| invalid(ROOT_PATH, format!("JSON parse error: {e}")))?;
        Self::from_value(&value)
    }

    /// Load a rule set from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRule`] on malformed YAML or rules.
    pub fn from_yaml_str(text: &str) -> Result<Self, ValidationError> {
        let value = parse_yaml(text).map_err(|reason| invalid(ROOT_PATH, reason))?;
        Self::from_value(&value)
    }
}

impl<P: Into<String>> FromIterator<(P, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (P, Rule)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (path, rule) in iter {
            set.insert(path, rule);
        }
        set
    }
}

/// On-disk shape of a rule.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDocument {
    test: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    expected: Option<Value>,
    message: Option<String>,
    #[serde(default = "default_true")]
    required: bool,
    #[serde(default = "default_true")]
    error: bool,
}

fn default_true() -> bool {
    true
}

fn rule_from_document(path: &str, document: &Value) -> Result<Rule, ValidationError> {
    let doc: RuleDocument =
        serde_json::from_value(document.clone()).map_err(|e| invalid(path, e.to_string()))?;

    let test = RuleTest::from_name(&doc.test).ok_or_else(|| {
        invalid(
            path,
            format!("unknown test '{}'; expected array, entry or entry|array", doc.test),
        )
    })?;

    let kind = doc
        .kind
        .map(|name| {
            ValueKind::from_name(&name)
                .ok_or_else(|| invalid(path, format!("unknown type '{name}'")))
        })
        .transpose()?;

    let expected = doc
        .expected
        .map(|value| expected_from_document(path, value))
        .transpose()?;

    Ok(Rule {
        test,
        kind,
        expected,
        message: doc.message,
        required: doc.required,
        error: doc.error,
    })
}

fn expected_from_document(path: &str, value: Value) -> Result<Expected, ValidationError> {
    match value {
        Value::Array(members) => Ok(Expected::List(members)),
        Value::Object(mut map) if map.len() == 1 => match map.remove("set") {
            Some(Value::Array(members)) => Ok(Expected::set(members)),
            _ => Err(invalid(path, "'expected.set' must be a sequence")),
        },
        _ => Err(invalid(
            path,
            "'expected' must be a sequence or a map with a single 'set' sequence",
        )),
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidRule {
        path: path.to_string(),
        reason: reason.into(),
    }
}
