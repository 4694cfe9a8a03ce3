//! Lenient deserializers for server-computed records.
//!
//! The tanker history is read back from a spreadsheet, so empty cells come
//! through as `null` and numbers sometimes as strings.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// `null` or a missing field becomes an empty string; numbers are stringified
pub fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// A JSON number or a numeric string.
///
/// `null`, a missing field or a blank string read as `0.0`; a string that is
/// not a number is an error.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or_default()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", s))),
        Some(Value::Null) | None => Ok(0.0),
        Some(other) => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "string_or_null")]
        batch: String,
        #[serde(default, deserialize_with = "number_or_string")]
        quantity: f64,
    }

    #[test]
    fn nulls_and_strings_are_tolerated() {
        let row: Row = serde_json::from_str(r#"{"batch": null, "quantity": "12.5"}"#).unwrap();
        assert_eq!(row.batch, "");
        assert_eq!(row.quantity, 12.5);

        let row: Row = serde_json::from_str(r#"{"batch": 4471}"#).unwrap();
        assert_eq!(row.batch, "4471");
        assert_eq!(row.quantity, 0.0);
    }

    #[test]
    fn non_numeric_quantity_is_rejected() {
        let result = serde_json::from_str::<Row>(r#"{"batch": "B-1", "quantity": "N/A"}"#);
        assert!(result.is_err());

        let row: Row = serde_json::from_str(r#"{"quantity": " "}"#).unwrap();
        assert_eq!(row.quantity, 0.0);
    }
}
