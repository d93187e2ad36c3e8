//! Serializer: in-memory values to the JSON-safe wire tree

use crate::registry::Tag;
use crate::types::*;
use crate::wire::*;

/// How elements inside unique and pair collections are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedElements {
    /// Elements are copied as their plain, untagged projection.
    /// Special types nested inside a collection do not round-trip.
    #[default]
    Verbatim,
    /// Elements are serialized and deserialized recursively
    Encoded,
}

/// Options for serialize and deserialize
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    /// Treatment of collection elements
    pub nested: NestedElements,
}

impl CodecOptions {
    /// Default behavior: collection elements copied verbatim
    pub fn verbatim() -> Self {
        Self::default()
    }

    /// Collection elements encoded recursively
    pub fn encoded() -> Self {
        Self {
            nested: NestedElements::Encoded,
        }
    }
}

/// Serialize a value with default options
pub fn serialize(value: &Value) -> WireValue {
    serialize_with_opts(value, &CodecOptions::default())
}

/// Serialize a value with custom options.
///
/// Total for finite, acyclic input.
pub fn serialize_with_opts(value: &Value, opts: &CodecOptions) -> WireValue {
    match value {
        Value::Absent => WireValue::Absent,
        Value::Null => WireValue::Null,
        Value::Bool(b) => WireValue::Bool(*b),
        Value::Int(n) => WireValue::Int(*n),
        Value::Float(f) => WireValue::Float(*f),
        Value::String(s) => WireValue::String(s.clone()),
        Value::Timestamp(_)
        | Value::Binary(_)
        | Value::UniqueCollection(_)
        | Value::PairCollection(_) => serialize_special(value, opts),
        Value::Sequence(items) => WireValue::Array(
            items
                .iter()
                .map(|item| serialize_with_opts(item, opts))
                .collect(),
        ),
        Value::Record(fields) => WireValue::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), serialize_with_opts(v, opts)))
                .collect(),
        ),
    }
}

fn serialize_special(value: &Value, opts: &CodecOptions) -> WireValue {
    for tag in Tag::ALL {
        if let Some(payload) = tag.encode(value, opts) {
            return WireValue::envelope(tag, payload);
        }
    }
    // Unreachable while every special variant has a registered tag
    WireValue::plain(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(serialize(&Value::absent()), WireValue::Absent);
        assert_eq!(serialize(&Value::null()), WireValue::Null);
        assert_eq!(serialize(&Value::bool(false)), WireValue::Bool(false));
        assert_eq!(serialize(&Value::int(-7)), WireValue::Int(-7));
        assert_eq!(serialize(&Value::float(2.5)), WireValue::Float(2.5));
        assert_eq!(serialize(&Value::str("x")), WireValue::str("x"));
    }

    #[test]
    fn test_sequence_elements_are_tagged() {
        let v = Value::seq(vec![Value::int(1), Value::binary(vec![9u8])]);
        assert_eq!(
            serialize(&v),
            WireValue::Array(vec![
                WireValue::Int(1),
                WireValue::envelope(Tag::Binary, WireValue::Array(vec![WireValue::Int(9)])),
            ])
        );
    }

    #[test]
    fn test_record_keys_kept() {
        let v = Value::record([
            field("when", Value::timestamp_millis(5).unwrap()),
            field("tag", Value::str("plain")),
            field("gone", Value::absent()),
        ]);
        assert_eq!(
            serialize(&v),
            WireValue::object([
                ("when", WireValue::envelope(Tag::Timestamp, WireValue::Int(5))),
                ("tag", WireValue::str("plain")),
                ("gone", WireValue::Absent),
            ])
        );
    }

    #[test]
    fn test_encoded_mode_tags_collection_elements() {
        let ts = Value::timestamp_millis(1000).unwrap();
        let v = Value::unique(vec![ts]);
        assert_eq!(
            serialize_with_opts(&v, &CodecOptions::encoded()),
            WireValue::envelope(
                Tag::UniqueCollection,
                WireValue::Array(vec![WireValue::envelope(
                    Tag::Timestamp,
                    WireValue::Int(1000)
                )])
            )
        );
    }

    #[test]
    fn test_options_default_is_verbatim() {
        assert_eq!(CodecOptions::default().nested, NestedElements::Verbatim);
        assert_eq!(CodecOptions::verbatim().nested, NestedElements::Verbatim);
    }
}
