//! JSON-safe wire tree

use crate::registry::Tag;
use crate::types::*;
use chrono::SecondsFormat;
use std::collections::BTreeMap;

/// Field holding the type name of an envelope
pub const TAG_FIELD: &str = "tag";
/// Field holding the encoded value of an envelope
pub const PAYLOAD_FIELD: &str = "payload";

/// A JSON-safe value.
///
/// Mirrors the JSON data model plus `Absent`, so absence survives an
/// in-memory round trip. Special types can only appear inside envelopes.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<WireValue>),
    Object(BTreeMap<String, WireValue>),
}

impl WireValue {
    pub fn str(v: impl Into<String>) -> Self {
        WireValue::String(v.into())
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, WireValue)>) -> Self {
        WireValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build `{"tag": <tag>, "payload": <payload>}`
    pub fn envelope(tag: Tag, payload: WireValue) -> Self {
        let mut map = BTreeMap::new();
        map.insert(TAG_FIELD.to_string(), WireValue::String(tag.name().to_string()));
        map.insert(PAYLOAD_FIELD.to_string(), payload);
        WireValue::Object(map)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, WireValue::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Absent => "absent",
            WireValue::Null => "null",
            WireValue::Bool(_) => "bool",
            WireValue::Int(_) => "int",
            WireValue::Float(_) => "float",
            WireValue::String(_) => "string",
            WireValue::Array(_) => "array",
            WireValue::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, WireValue>> {
        match self {
            WireValue::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        match self {
            WireValue::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Untagged projection of a value.
    ///
    /// Never produces an envelope. Special types collapse to their plain
    /// JSON shape: a timestamp becomes an RFC 3339 string, a blob an array
    /// of byte integers, collections arrays.
    pub fn plain(value: &Value) -> WireValue {
        match value {
            Value::Absent => WireValue::Absent,
            Value::Null => WireValue::Null,
            Value::Bool(b) => WireValue::Bool(*b),
            Value::Int(n) => WireValue::Int(*n),
            Value::Float(f) => WireValue::Float(*f),
            Value::String(s) => WireValue::String(s.clone()),
            Value::Timestamp(t) => {
                WireValue::String(t.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Binary(data) => byte_array(data),
            Value::UniqueCollection(items) => {
                WireValue::Array(items.iter().map(WireValue::plain).collect())
            }
            Value::PairCollection(pairs) => WireValue::Array(
                pairs
                    .iter()
                    .map(|(k, v)| WireValue::Array(vec![WireValue::plain(k), WireValue::plain(v)]))
                    .collect(),
            ),
            Value::Sequence(items) => WireValue::Array(items.iter().map(WireValue::plain).collect()),
            Value::Record(fields) => WireValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), WireValue::plain(v)))
                    .collect(),
            ),
        }
    }
}

impl Value {
    /// Structural conversion of a wire value; envelopes are not recognized.
    pub fn from_plain(wire: &WireValue) -> Value {
        match wire {
            WireValue::Absent => Value::Absent,
            WireValue::Null => Value::Null,
            WireValue::Bool(b) => Value::Bool(*b),
            WireValue::Int(n) => Value::Int(*n),
            WireValue::Float(f) => Value::Float(*f),
            WireValue::String(s) => Value::String(s.clone()),
            WireValue::Array(items) => Value::Sequence(items.iter().map(Value::from_plain).collect()),
            WireValue::Object(fields) => Value::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_plain(v)))
                    .collect(),
            ),
        }
    }
}

pub(crate) fn byte_array(data: &[u8]) -> WireValue {
    WireValue::Array(data.iter().map(|b| WireValue::Int(i64::from(*b))).collect())
}

impl From<bool> for WireValue {
    fn from(v: bool) -> Self {
        WireValue::Bool(v)
    }
}

impl From<i64> for WireValue {
    fn from(v: i64) -> Self {
        WireValue::Int(v)
    }
}

impl From<f64> for WireValue {
    fn from(v: f64) -> Self {
        WireValue::Float(v)
    }
}

impl From<&str> for WireValue {
    fn from(v: &str) -> Self {
        WireValue::String(v.to_string())
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(v: Vec<WireValue>) -> Self {
        WireValue::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let env = WireValue::envelope(Tag::Binary, WireValue::Array(vec![]));
        assert_eq!(env.get("tag").and_then(WireValue::as_str), Some("Binary"));
        assert_eq!(env.get("payload"), Some(&WireValue::Array(vec![])));
        assert_eq!(env.as_object().map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_plain_timestamp_is_iso_string() {
        let ts = Value::timestamp_millis(1_700_000_000_000).unwrap();
        assert_eq!(
            WireValue::plain(&ts),
            WireValue::str("2023-11-14T22:13:20.000Z")
        );
    }

    #[test]
    fn test_plain_never_emits_envelopes() {
        let v = Value::seq(vec![
            Value::binary(vec![7u8, 8]),
            Value::pairs(vec![(Value::str("k"), Value::bool(true))]),
        ]);
        assert_eq!(
            WireValue::plain(&v),
            WireValue::Array(vec![
                WireValue::Array(vec![WireValue::Int(7), WireValue::Int(8)]),
                WireValue::Array(vec![WireValue::Array(vec![
                    WireValue::str("k"),
                    WireValue::Bool(true)
                ])]),
            ])
        );
    }

    #[test]
    fn test_from_plain_ignores_envelope_shape() {
        let env = WireValue::envelope(Tag::Timestamp, WireValue::Int(1000));
        let v = Value::from_plain(&env);
        assert!(v.is_record());
        assert_eq!(v.get("tag").and_then(Value::as_str), Some("Timestamp"));
        assert_eq!(v.get("payload").and_then(Value::as_int), Some(1000));
    }
}
