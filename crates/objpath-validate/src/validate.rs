//! # Validators
//!
//! Each validator reads one accessor path with
//! [`safe_access`](objpath_core::safe_access) and checks the value against
//! a [`Rule`]. The checks run in a fixed order (required, shape, kind,
//! expected) and the first failure wins.
//!
//! ## Results
//!
//! - `Ok(true)`: every check passed, or the rule is optional and the value
//!   is missing.
//! - `Ok(false)`: a check failed and the rule has `error: false`.
//! - `Err(ValidationError::Failed { .. })`: a check failed and the rule has
//!   `error: true`.
//!
//! `null` reads as missing, the same as an absent key. Missing values
//! render as `undefined` in messages.
//!
//! ## Rule sets
//!
//! [`validate`] runs a rule set and returns the result of the **last**
//! rule; an earlier soft failure is overwritten by a later pass. Use
//! [`validate_all`] to see every failure.

use std::fmt;

use objpath_core::coerce::to_text;
use objpath_core::{is_container, safe_access, ObjectError};
use serde::Serialize;
use serde_json::Value;

use crate::error::{FailureKind, ValidationError};
use crate::rule::{Expected, Rule, RuleSet, RuleTest};

/// Name prefixed to accessor paths in failure messages when none is given.
pub const DEFAULT_DATA_NAME: &str = "data";

/// A failed check, before the rule's `error` flag is applied.
struct Failure {
    kind: FailureKind,
    message: String,
}

impl Failure {
    fn new(kind: FailureKind, message: String) -> Self {
        Self { kind, message }
    }
}

type Check = Result<(), Failure>;

/// Run every rule in `rules` against `container`.
///
/// Returns the result of the last rule processed. The first rule that
/// fails with `error: true` stops the run. An empty rule set passes.
///
/// # Errors
///
/// Returns [`ValidationError::TypeArgument`] if `container` is not a map or
/// sequence, and [`ValidationError::Failed`] for the first hard failure.
pub fn validate(
    container: &Value,
    rules: &RuleSet,
    data_name: &str,
) -> Result<bool, ValidationError> {
    require_container(container)?;
    let mut result = true;
    for (path, rule) in rules.iter() {
        tracing::trace!(path, test = %rule.test, "dispatching rule");
        result = settle(path, rule, check(container, path, rule, data_name))?;
    }
    Ok(result)
}

/// Check that the value at `path` is a sequence whose elements satisfy
/// `rule`.
///
/// # Errors
///
/// Returns [`ValidationError::Failed`] on failure when `rule.error` is set.
pub fn validate_array(
    container: &Value,
    path: &str,
    rule: &Rule,
    data_name: &str,
) -> Result<bool, ValidationError> {
    let value = safe_access(container, path);
    settle(path, rule, check_array(value, path, rule, data_name))
}

/// Check that the value at `path` satisfies `rule`.
///
/// # Errors
///
/// Returns [`ValidationError::Failed`] on failure when `rule.error` is set.
pub fn validate_entry(
    container: &Value,
    path: &str,
    rule: &Rule,
    data_name: &str,
) -> Result<bool, ValidationError> {
    let value = safe_access(container, path);
    settle(path, rule, check_entry(value, path, rule, data_name))
}

/// [`validate_array`] when the value at `path` is a sequence,
/// [`validate_entry`] otherwise.
///
/// # Errors
///
/// Returns [`ValidationError::Failed`] on failure when `rule.error` is set.
pub fn validate_entry_or_array(
    container: &Value,
    path: &str,
    rule: &Rule,
    data_name: &str,
) -> Result<bool, ValidationError> {
    match safe_access(container, path) {
        Some(Value::Array(_)) => validate_array(container, path, rule, data_name),
        _ => validate_entry(container, path, rule, data_name),
    }
}

/// Run every rule in `rules` and collect all failures.
///
/// Unlike [`validate`], a hard failure does not stop the run; both hard and
/// soft failures are recorded in the report.
///
/// # Errors
///
/// Returns [`ValidationError::TypeArgument`] if `container` is not a map or
/// sequence.
pub fn validate_all(
    container: &Value,
    rules: &RuleSet,
    data_name: &str,
) -> Result<ValidationReport, ValidationError> {
    require_container(container)?;
    let mut report = ValidationReport {
        checked: 0,
        failures: Vec::new(),
    };
    for (path, rule) in rules.iter() {
        tracing::trace!(path, test = %rule.test, "dispatching rule");
        report.checked += 1;
        if let Err(failure) = check(container, path, rule, data_name) {
            report.failures.push(RuleFailure {
                path: path.to_string(),
                test: rule.test,
                kind: failure.kind,
                message: failure.message,
                hard: rule.error,
            });
        }
    }
    tracing::debug!(
        checked = report.checked,
        failures = report.failures.len(),
        "rule set evaluated"
    );
    Ok(report)
}

/// One failed rule in a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleFailure {
    /// Accessor path the rule is keyed by.
    pub path: String,
    /// The rule's test.
    pub test: RuleTest,
    /// The check that failed.
    pub kind: FailureKind,
    /// Failure message, as [`validate`] would raise it.
    pub message: String,
    /// Whether the rule has `error: true`.
    pub hard: bool,
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.hard { "error" } else { "warning" };
        write!(f, "  {severity} [{}] {}", self.kind, self.message)
    }
}

/// Outcome of [`validate_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of rules evaluated.
    pub checked: usize,
    /// Failed rules in rule-set order.
    pub failures: Vec<RuleFailure>,
}

impl ValidationReport {
    /// Returns true if no rule failed, hard or soft.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns true if no rule with `error: true` failed.
    pub fn passes_hard(&self) -> bool {
        !self.failures.iter().any(|f| f.hard)
    }

    /// Failures from rules with `error: true`.
    pub fn hard_failures(&self) -> impl Iterator<Item = &RuleFailure> {
        self.failures.iter().filter(|f| f.hard)
    }

    /// Failures from rules with `error: false`.
    pub fn soft_failures(&self) -> impl Iterator<Item = &RuleFailure> {
        self.failures.iter().filter(|f| !f.hard)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rule(s) checked, {} failed",
            self.checked,
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n{failure}")?;
        }
        Ok(())
    }
}

fn require_container(container: &Value) -> Result<(), ObjectError> {
    if is_container(container) {
        Ok(())
    } else {
        Err(ObjectError::TypeArgument {
            operation: "validate",
            argument: "container",
            expected: "an object or array",
        })
    }
}

/// Apply the rule's `error` flag to a check result.
fn settle(path: &str, rule: &Rule, outcome: Check) -> Result<bool, ValidationError> {
    match outcome {
        Ok(()) => Ok(true),
        Err(Failure { kind, message }) if rule.error => {
            Err(ValidationError::Failed { kind, message })
        }
        Err(Failure { kind, message }) => {
            tracing::debug!(path, %kind, %message, "soft validation failure");
            Ok(false)
        }
    }
}

/// Dispatch on the rule's test.
fn check(container: &Value, path: &str, rule: &Rule, data_name: &str) -> Check {
    let value = safe_access(container, path);
    match (rule.test, value) {
        (RuleTest::Array, _) | (RuleTest::EntryOrArray, Some(Value::Array(_))) => {
            check_array(value, path, rule, data_name)
        }
        (RuleTest::Entry, _) | (RuleTest::EntryOrArray, _) => {
            check_entry(value, path, rule, data_name)
        }
    }
}

fn check_array(value: Option<&Value>, path: &str, rule: &Rule, data_name: &str) -> Check {
    if value.is_none() && !rule.required {
        tracing::debug!(path, "optional value missing; rule skipped");
        return Ok(());
    }

    let Some(Value::Array(items)) = value else {
        return Err(Failure::new(
            FailureKind::NotAnArray,
            format!("'{data_name}.{path}' is not an 'array'."),
        ));
    };

    if let Some(kind) = rule.kind {
        if let Some((i, item)) = items.iter().enumerate().find(|(_, v)| !kind.matches(v)) {
            return Err(Failure::new(
                FailureKind::TypeMismatch,
                format!(
                    "'{data_name}.{path}[{i}]': '{}' is not a '{kind}'.",
                    to_text(item)
                ),
            ));
        }
    }

    match &rule.expected {
        None => Ok(()),
        Some(Expected::Predicate(predicate)) => {
            for (i, item) in items.iter().enumerate() {
                if let Some(reason) = predicate_failure(predicate(item), rule) {
                    return Err(Failure::new(
                        FailureKind::PredicateFailed,
                        format!(
                            "'{data_name}.{path}[{i}]': '{}' failed validation: {reason}.",
                            to_text(item)
                        ),
                    ));
                }
            }
            Ok(())
        }
        Some(expected) => {
            for (i, item) in items.iter().enumerate() {
                if expected.contains(item) == Some(false) {
                    return Err(Failure::new(
                        FailureKind::UnexpectedValue,
                        format!(
                            "'{data_name}.{path}[{i}]': '{}' is not an expected value: {}.",
                            to_text(item),
                            expected.to_json()
                        ),
                    ));
                }
            }
            Ok(())
        }
    }
}

fn check_entry(value: Option<&Value>, path: &str, rule: &Rule, data_name: &str) -> Check {
    if value.is_none() && !rule.required {
        tracing::debug!(path, "optional value missing; rule skipped");
        return Ok(());
    }

    if let Some(kind) = rule.kind {
        if !value.is_some_and(|v| kind.matches(v)) {
            return Err(Failure::new(
                FailureKind::TypeMismatch,
                format!("'{data_name}.{path}' is not a '{kind}'."),
            ));
        }
    }

    match &rule.expected {
        None => Ok(()),
        Some(Expected::Predicate(predicate)) => {
            let subject = value.unwrap_or(&Value::Null);
            match predicate_failure(predicate(subject), rule) {
                None => Ok(()),
                Some(reason) => Err(Failure::new(
                    FailureKind::PredicateFailed,
                    format!(
                        "'{data_name}.{path}': '{}' failed to validate: {reason}.",
                        render(value)
                    ),
                )),
            }
        }
        Some(expected) => {
            let member = value.is_some_and(|v| expected.contains(v) == Some(true));
            if member {
                Ok(())
            } else {
                Err(Failure::new(
                    FailureKind::UnexpectedValue,
                    format!(
                        "'{data_name}.{path}': '{}' is not an expected value: {}.",
                        render(value),
                        expected.to_json()
                    ),
                ))
            }
        }
    }
}

/// The failure reason for a predicate result, if it failed.
fn predicate_failure(result: Result<bool, String>, rule: &Rule) -> Option<String> {
    match result {
        Ok(true) => None,
        Ok(false) => Some(rule.message.clone().unwrap_or_default()),
        Err(reason) => Some(reason),
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), to_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ValueKind;
    use serde_json::json;

    fn mixed() -> Value {
        json!({
            "a": 1, "b": 2, "c": 3,
            "array": ["a", "b", "c"],
            "level1": {
                "d": 4, "e": 5, "f": 6,
                "array1": ["d", "e", "f"],
                "level2": {"g": 7, "h": 8, "i": 9, "array2": ["g", "h", "i"]}
            }
        })
    }

    fn run(path: &str, rule: Rule) -> Result<bool, ValidationError> {
        validate(&mixed(), &RuleSet::new().with(path, rule), DEFAULT_DATA_NAME)
    }

    fn is_two(v: &Value) -> Result<bool, String> {
        Ok(v == &json!(2))
    }

    fn is_number(v: &Value) -> Result<bool, String> {
        Ok(v.is_number())
    }

    // -- Hard failures -------------------------------------------------------

    #[test]
    fn test_array_rule_on_scalar_raises() {
        for rule in [Rule::array(), Rule::array().optional()] {
            let err = run("a", rule).unwrap_err();
            assert_eq!(err.failure_kind(), Some(FailureKind::NotAnArray));
            assert_eq!(err.to_string(), "'data.a' is not an 'array'.");
        }
    }

    #[test]
    fn test_entry_rule_raises() {
        let rules = [
            Rule::entry().kind(ValueKind::String),
            Rule::entry().kind(ValueKind::String).optional(),
            Rule::entry().expected_set([json!("a")]).optional(),
            Rule::entry().expected_list([json!("a")]).optional(),
            Rule::entry().predicate(is_two).optional(),
        ];
        for rule in rules {
            let err = run("a", rule).unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_entry_or_array_rule_raises() {
        let rules = [
            ("a", Rule::entry_or_array().kind(ValueKind::String)),
            ("a", Rule::entry_or_array().kind(ValueKind::String).optional()),
            ("a", Rule::entry_or_array().expected_set([json!("a")]).optional()),
            ("a", Rule::entry_or_array().expected_list([json!("a")]).optional()),
            ("a", Rule::entry_or_array().predicate(is_two).optional()),
            ("array", Rule::entry_or_array().kind(ValueKind::Number)),
            ("array", Rule::entry_or_array().kind(ValueKind::Number).optional()),
            ("array", Rule::entry_or_array().expected_set([json!(10)]).optional()),
            ("array", Rule::entry_or_array().expected_list([json!(10)]).optional()),
            ("array", Rule::entry_or_array().predicate(is_number).optional()),
        ];
        for (path, rule) in rules {
            assert!(run(path, rule).unwrap_err().is_validation(), "{path}");
        }
    }

    // -- Soft failures -------------------------------------------------------

    #[test]
    fn test_entry_rule_soft_fails() {
        let rules = [
            Rule::entry().kind(ValueKind::String).soft(),
            Rule::entry().kind(ValueKind::String).optional().soft(),
            Rule::entry().expected_set([json!("a")]).optional().soft(),
            Rule::entry().expected_list([json!("a")]).optional().soft(),
            Rule::entry().predicate(is_two).optional().soft(),
        ];
        for rule in rules {
            assert!(!run("a", rule).unwrap());
        }
    }

    #[test]
    fn test_entry_or_array_rule_soft_fails() {
        let rules = [
            ("a", Rule::entry_or_array().kind(ValueKind::String).soft()),
            ("a", Rule::entry_or_array().predicate(is_two).optional().soft()),
            ("array", Rule::entry_or_array().kind(ValueKind::Number).soft()),
            ("array", Rule::entry_or_array().expected_set([json!(10)]).soft()),
            ("array", Rule::entry_or_array().expected_list([json!(10)]).soft()),
            ("array", Rule::entry_or_array().predicate(is_number).soft()),
        ];
        for (path, rule) in rules {
            assert!(!run(path, rule).unwrap(), "{path}");
        }
    }

    #[test]
    fn test_array_rule_on_scalar_soft_fails() {
        assert!(!run("a", Rule::array().soft()).unwrap());
        assert!(!run("a", Rule::array().optional().soft()).unwrap());
    }

    // -- Passes --------------------------------------------------------------

    #[test]
    fn test_entry_rule_on_array_passes() {
        assert!(run("array", Rule::entry().soft()).unwrap());
        assert!(run("array", Rule::entry().optional().soft()).unwrap());
    }

    #[test]
    fn test_entry_rule_passes() {
        let rules = [
            Rule::entry().kind(ValueKind::Number).soft(),
            Rule::entry().kind(ValueKind::Number).optional().soft(),
            Rule::entry().expected_set([json!(1), json!(2)]).optional().soft(),
            Rule::entry().expected_list([json!(1), json!(2)]).optional().soft(),
            Rule::entry().predicate(|v| Ok(v == &json!(1))).optional().soft(),
        ];
        for rule in rules {
            assert!(run("a", rule).unwrap());
        }
    }

    #[test]
    fn test_array_rule_passes() {
        let rule = Rule::array()
            .kind(ValueKind::String)
            .expected_list([json!("a"), json!("b"), json!("c")]);
        assert!(run("level1.level2.array2", rule.clone()).is_err());
        assert!(run("array", rule).unwrap());
    }

    // -- Missing values ------------------------------------------------------

    #[test]
    fn test_missing_optional_passes() {
        let rule = Rule::entry().kind(ValueKind::String).optional();
        assert!(run("missing", rule).unwrap());
        assert!(run("missing.deep", Rule::array().optional()).unwrap());
    }

    #[test]
    fn test_missing_required() {
        assert!(run("missing", Rule::entry()).unwrap());

        let err = run("missing", Rule::entry().kind(ValueKind::Number)).unwrap_err();
        assert_eq!(err.to_string(), "'data.missing' is not a 'number'.");

        let err = run("missing", Rule::entry().expected_list([json!(1)])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'data.missing': 'undefined' is not an expected value: [1]."
        );

        assert!(run("missing", Rule::entry().predicate(|v| Ok(v.is_null()))).unwrap());
    }

    // -- Messages ------------------------------------------------------------

    #[test]
    fn test_array_messages() {
        let err = run("array", Rule::array().kind(ValueKind::Number)).unwrap_err();
        assert_eq!(err.to_string(), "'data.array[0]': 'a' is not a 'number'.");

        let err = run("array", Rule::array().expected_list([json!("a"), json!("b")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"'data.array[2]': 'c' is not an expected value: ["a","b"]."#
        );

        let rule = Rule::array()
            .predicate(|v| Ok(v != &json!("b")))
            .message("no b");
        let err = run("array", rule).unwrap_err();
        assert_eq!(err.to_string(), "'data.array[1]': 'b' failed validation: no b.");
    }

    #[test]
    fn test_entry_messages() {
        let err = validate_entry(&mixed(), "level1.d", &Rule::entry().kind(ValueKind::String), "cfg")
            .unwrap_err();
        assert_eq!(err.to_string(), "'cfg.level1.d' is not a 'string'.");

        let rule = Rule::entry().predicate(|_| Err("too small".to_string()));
        let err = validate_entry(&mixed(), "b", &rule, "cfg").unwrap_err();
        assert_eq!(err.to_string(), "'cfg.b': '2' failed to validate: too small.");
        assert_eq!(err.failure_kind(), Some(FailureKind::PredicateFailed));

        let rule = Rule::entry().predicate(|_| Ok(false));
        let err = validate_entry(&mixed(), "b", &rule, "cfg").unwrap_err();
        assert_eq!(err.to_string(), "'cfg.b': '2' failed to validate: .");
    }

    // -- Rule sets -----------------------------------------------------------

    #[test]
    fn test_last_rule_wins() {
        let rules = RuleSet::new()
            .with("a", Rule::entry().kind(ValueKind::String).soft())
            .with("b", Rule::entry().kind(ValueKind::Number));
        assert!(validate(&mixed(), &rules, DEFAULT_DATA_NAME).unwrap());

        let rules = RuleSet::new()
            .with("b", Rule::entry().kind(ValueKind::Number))
            .with("a", Rule::entry().kind(ValueKind::String).soft());
        assert!(!validate(&mixed(), &rules, DEFAULT_DATA_NAME).unwrap());
    }

    #[test]
    fn test_first_hard_failure_stops() {
        let rules = RuleSet::new()
            .with("a", Rule::entry().kind(ValueKind::String))
            .with("b", Rule::entry().kind(ValueKind::String));
        let err = validate(&mixed(), &rules, DEFAULT_DATA_NAME).unwrap_err();
        assert_eq!(err.to_string(), "'data.a' is not a 'string'.");
    }

    #[test]
    fn test_empty_rule_set_passes() {
        assert!(validate(&mixed(), &RuleSet::new(), DEFAULT_DATA_NAME).unwrap());
    }

    #[test]
    fn test_scalar_container_rejected() {
        let err = validate(&json!(1), &RuleSet::new(), DEFAULT_DATA_NAME).unwrap_err();
        assert!(matches!(err, ValidationError::TypeArgument(_)));
        assert!(!err.is_validation());
        assert!(validate_all(&json!("x"), &RuleSet::new(), DEFAULT_DATA_NAME).is_err());
    }

    #[test]
    fn test_validate_all_collects_everything() {
        let rules = RuleSet::new()
            .with("a", Rule::entry().kind(ValueKind::String))
            .with("b", Rule::entry().kind(ValueKind::Number))
            .with("array", Rule::array().expected_list([json!("a")]).soft())
            .with("c", Rule::array());
        let report = validate_all(&mixed(), &rules, DEFAULT_DATA_NAME).unwrap();

        assert_eq!(report.checked, 4);
        let paths: Vec<&str> = report.failures.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["a", "array", "c"]);
        assert_eq!(report.hard_failures().count(), 2);
        assert_eq!(report.soft_failures().count(), 1);
        assert!(!report.is_valid());
        assert!(!report.passes_hard());
        assert_eq!(report.failures[1].kind, FailureKind::UnexpectedValue);
        assert!(report.to_string().starts_with("4 rule(s) checked, 3 failed"));
    }

    #[test]
    fn test_validate_all_clean() {
        let rules = RuleSet::new().with("b", Rule::entry().kind(ValueKind::Number));
        let report = validate_all(&mixed(), &rules, DEFAULT_DATA_NAME).unwrap();
        assert!(report.is_valid());
        assert!(report.passes_hard());
    }
}
