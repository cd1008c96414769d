//! Forgiving `deserialize_with` helpers for documents written by browsers, older
//! records, and the model itself.
//!
//! `#[serde(default)]` only covers absent keys. These also cover explicit `null`,
//! numbers sent as strings, and lists sent as a single string.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null` becomes `T::default()`; anything else must still be a valid `T`.
pub fn default_on_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A JSON number, or a string holding one (`"30000"`, `" 70 %"`).
fn number_from(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Required number. Numeric strings are accepted.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    number_from(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))
}

/// Optional number. Anything that is not a number or numeric string becomes `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from))
}

/// Optional non-negative whole count, rounded.
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u32))
}

/// Free text. Numbers and booleans are stringified; `null` and structures become "".
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(scalar_text).unwrap_or_default())
}

/// List of strings. A lone string is a one-item list; non-text entries are dropped.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(single @ Value::String(_)) => vec![single],
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter(|item| matches!(item, Value::String(_) | Value::Number(_)))
        .map(scalar_text)
        .filter(|item| !item.trim().is_empty())
        .collect())
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
