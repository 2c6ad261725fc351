//! Typed views over the untyped `params` member of a call.
//!
//! Every helper returns `None` when the value does not have the requested shape.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Positional parameters where every element decodes as `T`.
pub fn positional<T: DeserializeOwned>(params: Option<&Value>) -> Option<Vec<T>> {
    params?
        .as_array()?
        .iter()
        .map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

/// Named parameters where every value decodes as `T`.
pub fn named<T: DeserializeOwned>(params: Option<&Value>) -> Option<BTreeMap<String, T>> {
    params?
        .as_object()?
        .iter()
        .map(|(key, item)| {
            serde_json::from_value(item.clone())
                .ok()
                .map(|value| (key.clone(), value))
        })
        .collect()
}

/// Integer literal that fits in an `i64`. Fractional literals such as `2.0` are rejected.
pub fn int(value: &Value) -> Option<i64> {
    value.as_i64()
}

pub fn float(value: &Value) -> Option<f64> {
    value.as_f64()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn positional_requires_uniform_elements() {
        assert_eq!(positional::<i64>(Some(&json!([1, 2, 4]))), Some(vec![1, 2, 4]));
        assert_eq!(positional::<i64>(Some(&json!([1, "2"]))), None);
        assert_eq!(positional::<i64>(Some(&json!({"a": 1}))), None);
        assert_eq!(positional::<i64>(None), None);
        assert_eq!(positional::<String>(Some(&json!([]))), Some(vec![]));
    }

    #[test]
    fn named_requires_uniform_values() {
        let params = json!({"minuend": 42, "subtrahend": 23});
        let map = named::<i64>(Some(&params)).expect("numeric map");
        assert_eq!(map["minuend"], 42);
        assert_eq!(map["subtrahend"], 23);

        assert_eq!(named::<i64>(Some(&json!({"a": 0, "b": "1"}))), None);
        assert_eq!(named::<i64>(Some(&json!([1]))), None);
    }

    #[test]
    fn numbers_by_literal() {
        let one: Value = serde_json::from_str("1").expect("number");
        let two: Value = serde_json::from_str("2.0").expect("number");
        let half: Value = serde_json::from_str("4.5").expect("number");

        assert_eq!(int(&one), Some(1));
        assert_eq!(int(&two), None);
        assert_eq!(float(&two), Some(2.0));
        assert_eq!(float(&half), Some(4.5));
        assert_eq!(int(&json!("1")), None);
        assert_eq!(float(&json!(null)), None);
    }
}
