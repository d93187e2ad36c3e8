//! JSON <-> WireValue conversion

use crate::deserialize::deserialize;
use crate::error::*;
use crate::serialize::serialize;
use crate::types::*;
use crate::wire::*;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};

impl WireValue {
    /// Convert a JSON value to a wire value
    pub fn from_json(json: &JsonValue) -> WireValue {
        match json {
            JsonValue::Null => WireValue::Null,
            JsonValue::Bool(b) => WireValue::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    WireValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    WireValue::Float(f)
                } else {
                    WireValue::Float(0.0)
                }
            }
            JsonValue::String(s) => WireValue::String(s.clone()),
            JsonValue::Array(arr) => WireValue::Array(arr.iter().map(WireValue::from_json).collect()),
            JsonValue::Object(obj) => WireValue::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), WireValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert a wire value to JSON.
    ///
    /// Absent object fields are omitted; absent array elements and a
    /// top-level absent become `null`, as do non-finite floats.
    pub fn to_json(&self) -> JsonValue {
        match self {
            WireValue::Absent | WireValue::Null => JsonValue::Null,
            WireValue::Bool(b) => JsonValue::Bool(*b),
            WireValue::Int(n) => JsonValue::Number(Number::from(*n)),
            WireValue::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            WireValue::String(s) => JsonValue::String(s.clone()),
            WireValue::Array(items) => JsonValue::Array(items.iter().map(WireValue::to_json).collect()),
            WireValue::Object(fields) => {
                let mut map = Map::new();
                for (key, value) in fields {
                    if !value.is_absent() {
                        map.insert(key.clone(), value.to_json());
                    }
                }
                JsonValue::Object(map)
            }
        }
    }
}

/// Serialize a value and render it as JSON text
pub fn to_json_string(value: &Value) -> String {
    serialize(value).to_json().to_string()
}

/// Serialize a value and render it as pretty JSON text
pub fn to_json_string_pretty(value: &Value) -> String {
    format!("{:#}", serialize(value).to_json())
}

/// Parse JSON text and deserialize it
pub fn from_json_str(json_str: &str) -> Result<Value> {
    let json: JsonValue = serde_json::from_str(json_str)?;
    deserialize(&WireValue::from_json(&json))
}

// ============================================================
// serde integration
// ============================================================

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        Ok(WireValue::from_json(&json))
    }
}

/// Values serialize through their tagged wire form
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        crate::serialize::serialize(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let wire = WireValue::deserialize(deserializer)?;
        crate::deserialize::deserialize(&wire).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Tag;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(WireValue::from_json(&json!(42)), WireValue::Int(42));
        assert_eq!(WireValue::from_json(&json!(3.5)), WireValue::Float(3.5));
        assert_eq!(
            WireValue::from_json(&json!(u64::MAX)),
            WireValue::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn test_from_json_object() {
        let wire = WireValue::from_json(&json!({"a": [1, null], "b": "x"}));
        assert_eq!(
            wire,
            WireValue::object([
                ("a", WireValue::Array(vec![WireValue::Int(1), WireValue::Null])),
                ("b", WireValue::str("x")),
            ])
        );
    }

    #[test]
    fn test_to_json_drops_absent_fields() {
        let wire = WireValue::object([
            ("kept", WireValue::Int(1)),
            ("gone", WireValue::Absent),
            ("list", WireValue::Array(vec![WireValue::Absent])),
        ]);
        assert_eq!(wire.to_json(), json!({"kept": 1, "list": [null]}));
        assert_eq!(WireValue::Absent.to_json(), json!(null));
    }

    #[test]
    fn test_to_json_non_finite_float() {
        assert_eq!(WireValue::Float(f64::NAN).to_json(), json!(null));
        assert_eq!(WireValue::Float(f64::INFINITY).to_json(), json!(null));
    }

    #[test]
    fn test_json_text_roundtrip() {
        let v = Value::record([
            field("at", Value::timestamp_millis(1_700_000_000_000).unwrap()),
            field("bytes", Value::binary(vec![1u8, 2, 3])),
        ]);
        let text = to_json_string(&v);
        assert_eq!(
            serde_json::from_str::<JsonValue>(&text).unwrap(),
            json!({
                "at": {"tag": "Timestamp", "payload": 1_700_000_000_000i64},
                "bytes": {"tag": "Binary", "payload": [1, 2, 3]}
            })
        );
        assert_eq!(from_json_str(&text).unwrap(), v);
    }

    #[test]
    fn test_from_json_str_reports_parse_errors() {
        assert!(matches!(from_json_str("{"), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_serde_value_embeds_envelopes() {
        let v = Value::seq(vec![Value::binary(vec![255u8])]);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, json!([{"tag": "Binary", "payload": [255]}]));
        let back: Value = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_serde_value_surfaces_decode_errors() {
        let bad = json!({"tag": Tag::Binary.name(), "payload": [1, 2, 300]});
        let err = serde_json::from_value::<Value>(bad).unwrap_err();
        assert!(err.to_string().contains("300"));
    }
}
