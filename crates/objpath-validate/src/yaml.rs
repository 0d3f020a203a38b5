//! # YAML Bridge
//!
//! Rule sets and documents may be written in YAML. Everything downstream
//! works on `serde_json::Value`, so YAML is parsed with `serde_yaml` and
//! converted here. Map order is kept.

use serde_json::Value;

/// Parse a YAML document into a JSON value.
///
/// # Errors
///
/// Returns a description of the problem if the text is not valid YAML or
/// holds something JSON cannot represent.
pub fn parse_yaml(text: &str) -> Result<Value, String> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| format!("YAML parse error: {e}"))?;
    yaml_to_json_value(&yaml)
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// YAML permits non-string map keys; numbers and booleans are stringified,
/// anything else is rejected. Tags are dropped.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_order_kept() {
        let value = parse_yaml("b: 1\na: [x, 2.5, true, ~]\n").unwrap();
        assert_eq!(value, json!({"b": 1, "a": ["x", 2.5, true, null]}));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_non_string_keys() {
        let value = parse_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value, json!({"1": "one", "true": "yes"}));
    }

    #[test]
    fn test_sequence_key_rejected() {
        let err = parse_yaml("? [a, b]\n: 1\n").unwrap_err();
        assert!(err.contains("unsupported YAML map key"), "{err}");
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(parse_yaml("a: [1, 2").unwrap_err().starts_with("YAML parse error"));
    }
}
