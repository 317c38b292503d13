//! Lenient field deserializers for documents written by uncontrolled clients.
//!
//! Each helper reads the raw JSON value first and never fails on a type
//! mismatch; a field of the wrong shape reads as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `Option<String>`: non-string values read as `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// `Option<bool>`: non-boolean values read as `None`.
pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

/// `Vec<String>`: non-array values read as empty, non-string elements are skipped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Numeric amount given as a JSON number or a numeric string.
pub fn number(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|n| n.is_finite())
}

/// `Option<f64>` via [`number`].
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(&Value::deserialize(deserializer)?))
}
