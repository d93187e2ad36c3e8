//! Tag registry
//!
//! The fixed set of special types that need an envelope on the wire. Each
//! tag owns a predicate, an encoder and a decoder. Encoding consults the
//! predicates in [`Tag::ALL`] order; decoding looks tags up by exact name.

use crate::canonical::canonicalize;
use crate::deserialize::deserialize_with_opts;
use crate::error::*;
use crate::serialize::{serialize_with_opts, CodecOptions, NestedElements};
use crate::types::*;
use crate::wire::*;
use chrono::DateTime;
use std::collections::BTreeMap;
use std::fmt;

/// Registered special type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Timestamp,
    Binary,
    UniqueCollection,
    PairCollection,
}

impl Tag {
    /// All tags in predicate order
    pub const ALL: [Tag; 4] = [
        Tag::Timestamp,
        Tag::Binary,
        Tag::UniqueCollection,
        Tag::PairCollection,
    ];

    /// Wire name of the tag
    pub fn name(self) -> &'static str {
        match self {
            Tag::Timestamp => "Timestamp",
            Tag::Binary => "Binary",
            Tag::UniqueCollection => "UniqueCollection",
            Tag::PairCollection => "PairCollection",
        }
    }

    /// Look up a tag by its exact, case-sensitive wire name
    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Whether `value` is of this tag's type
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Tag::Timestamp => value.is_timestamp(),
            Tag::Binary => value.is_binary(),
            Tag::UniqueCollection => value.is_unique_collection(),
            Tag::PairCollection => value.is_pair_collection(),
        }
    }

    /// First tag whose predicate accepts `value`
    pub fn of(value: &Value) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.matches(value))
    }

    /// Encode `value` into this tag's payload.
    ///
    /// Returns `None` if the value is not of this tag's type.
    pub fn encode(self, value: &Value, opts: &CodecOptions) -> Option<WireValue> {
        let payload = match (self, value) {
            (Tag::Timestamp, Value::Timestamp(t)) => WireValue::Int(t.timestamp_millis()),
            (Tag::Binary, Value::Binary(data)) => byte_array(data),
            (Tag::UniqueCollection, Value::UniqueCollection(items)) => WireValue::Array(
                items.iter().map(|item| encode_element(item, opts)).collect(),
            ),
            (Tag::PairCollection, Value::PairCollection(pairs)) => WireValue::Array(
                pairs
                    .iter()
                    .map(|(k, v)| {
                        WireValue::Array(vec![encode_element(k, opts), encode_element(v, opts)])
                    })
                    .collect(),
            ),
            _ => return None,
        };
        Some(payload)
    }

    /// Rebuild a value from this tag's payload
    pub fn decode(self, payload: &WireValue, opts: &CodecOptions) -> Result<Value> {
        match self {
            Tag::Timestamp => decode_timestamp(payload),
            Tag::Binary => decode_binary(payload),
            Tag::UniqueCollection => {
                let items = expect_array(self, payload, "array of elements")?;
                let decoded = items
                    .iter()
                    .map(|item| decode_element(item, opts))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::UniqueCollection(decoded.into_iter().collect()))
            }
            Tag::PairCollection => decode_pairs(payload, opts),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check whether an object is an envelope.
///
/// Requires a non-empty string `tag` naming a registered type and a
/// `payload` that is not absent. Other fields are ignored. There is no
/// escaping: any object of this shape is treated as an envelope.
pub fn detect_envelope(fields: &BTreeMap<String, WireValue>) -> Option<(Tag, &WireValue)> {
    let name = fields.get(TAG_FIELD)?.as_str()?;
    if name.is_empty() {
        return None;
    }
    let tag = Tag::from_name(name)?;
    match fields.get(PAYLOAD_FIELD) {
        Some(payload) if !payload.is_absent() => Some((tag, payload)),
        _ => None,
    }
}

// ============================================================
// Element handling for collection payloads
// ============================================================

fn encode_element(value: &Value, opts: &CodecOptions) -> WireValue {
    match opts.nested {
        NestedElements::Verbatim => WireValue::plain(value),
        NestedElements::Encoded => serialize_with_opts(value, opts),
    }
}

fn decode_element(wire: &WireValue, opts: &CodecOptions) -> Result<Value> {
    match opts.nested {
        NestedElements::Verbatim => Ok(Value::from_plain(wire)),
        NestedElements::Encoded => deserialize_with_opts(wire, opts),
    }
}

// ============================================================
// Decoders
// ============================================================

fn decode_timestamp(payload: &WireValue) -> Result<Value> {
    let ms = match payload {
        WireValue::Int(n) => *n,
        // Fractional milliseconds are truncated, as a date constructor does
        WireValue::Float(f) if f.is_finite() => f.trunc() as i64,
        other => return Err(invalid(Tag::Timestamp, "integer milliseconds", other)),
    };
    DateTime::from_timestamp_millis(ms)
        .map(Value::Timestamp)
        .ok_or(CodecError::TimestampOutOfRange(ms))
}

fn decode_binary(payload: &WireValue) -> Result<Value> {
    let items = expect_array(Tag::Binary, payload, "array of bytes")?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_byte(index, item))
        .collect::<Result<Vec<u8>>>()
        .map(Value::Binary)
}

fn decode_byte(index: usize, item: &WireValue) -> Result<u8> {
    let byte = match item {
        WireValue::Int(n) => u8::try_from(*n).ok(),
        WireValue::Float(f) if f.fract() == 0.0 && (0.0..=255.0).contains(f) => Some(*f as u8),
        _ => None,
    };
    byte.ok_or_else(|| CodecError::ByteOutOfRange {
        index,
        value: canonicalize(item),
    })
}

fn decode_pairs(payload: &WireValue, opts: &CodecOptions) -> Result<Value> {
    let entries = expect_array(Tag::PairCollection, payload, "array of pairs")?;
    let mut pairs = PairCollection::new();
    for (index, entry) in entries.iter().enumerate() {
        let pair = expect_array(Tag::PairCollection, entry, "[key, value] array")?;
        match pair {
            [key, value] => pairs.push(decode_element(key, opts)?, decode_element(value, opts)?),
            _ => {
                return Err(CodecError::InvalidPair {
                    index,
                    len: pair.len(),
                })
            }
        }
    }
    Ok(Value::PairCollection(pairs))
}

fn expect_array<'a>(
    tag: Tag,
    payload: &'a WireValue,
    expected: &'static str,
) -> Result<&'a [WireValue]> {
    payload
        .as_array()
        .ok_or_else(|| invalid(tag, expected, payload))
}

fn invalid(tag: Tag, expected: &'static str, got: &WireValue) -> CodecError {
    CodecError::InvalidPayload {
        tag,
        expected,
        got: got.kind(),
    }
}
