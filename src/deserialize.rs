//! Deserializer: JSON-safe wire tree back to in-memory values

use crate::error::*;
use crate::registry::detect_envelope;
use crate::serialize::CodecOptions;
use crate::types::*;
use crate::wire::*;
use std::collections::BTreeMap;

/// Deserialize a wire value with default options
pub fn deserialize(wire: &WireValue) -> Result<Value> {
    deserialize_with_opts(wire, &CodecOptions::default())
}

/// Deserialize a wire value with custom options.
///
/// Fails if a registered tag's payload is malformed; no partial result is
/// returned. Objects with an unknown `tag` are ordinary records.
pub fn deserialize_with_opts(wire: &WireValue, opts: &CodecOptions) -> Result<Value> {
    match wire {
        WireValue::Absent => Ok(Value::Absent),
        WireValue::Null => Ok(Value::Null),
        WireValue::Bool(b) => Ok(Value::Bool(*b)),
        WireValue::Int(n) => Ok(Value::Int(*n)),
        WireValue::Float(f) => Ok(Value::Float(*f)),
        WireValue::String(s) => Ok(Value::String(s.clone())),
        WireValue::Array(items) => items
            .iter()
            .map(|item| deserialize_with_opts(item, opts))
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        WireValue::Object(fields) => deserialize_object(fields, opts),
    }
}

fn deserialize_object(fields: &BTreeMap<String, WireValue>, opts: &CodecOptions) -> Result<Value> {
    if let Some((tag, payload)) = detect_envelope(fields) {
        return match tag.decode(payload, opts) {
            Ok(value) => {
                tracing::trace!(tag = %tag, "decoded envelope");
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(tag = %tag, error = %e, "envelope payload rejected");
                Err(e)
            }
        };
    }

    if let Some(name) = fields.get(TAG_FIELD).and_then(WireValue::as_str) {
        tracing::debug!(tag = name, "unrecognized tag, decoding as record");
    }

    fields
        .iter()
        .map(|(k, v)| deserialize_with_opts(v, opts).map(|v| (k.clone(), v)))
        .collect::<Result<BTreeMap<_, _>>>()
        .map(Value::Record)
}
