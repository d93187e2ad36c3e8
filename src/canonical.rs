//! Canonical wire text and fingerprints
//!
//! Deterministic JSON rendering of a wire tree, used for hashing,
//! comparison, and deduplication of serialized values by storage layers.

use crate::wire::*;
use serde_json::Number;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Render a wire value as canonical JSON text.
///
/// Object keys are sorted, absent fields are dropped, integral floats are
/// written as integers and non-finite floats as `null`.
pub fn canonicalize(v: &WireValue) -> String {
    let mut buf = String::new();
    write_canon(&mut buf, v);
    buf
}

/// SHA-256 of the canonical form (first 16 hex chars)
pub fn fingerprint(v: &WireValue) -> String {
    let canonical = canonicalize(v);
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..8])
}

/// Check if two wire values have the same canonical form
pub fn equal_wire(a: &WireValue, b: &WireValue) -> bool {
    canonicalize(a) == canonicalize(b)
}

// ============================================================
// Internal canonicalization
// ============================================================

fn write_canon(buf: &mut String, v: &WireValue) {
    match v {
        WireValue::Absent | WireValue::Null => buf.push_str("null"),
        WireValue::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
        WireValue::Int(n) => buf.push_str(&n.to_string()),
        WireValue::Float(f) => buf.push_str(&canon_float(*f)),
        WireValue::String(s) => write_quoted(buf, s),
        WireValue::Array(items) => write_canon_array(buf, items),
        WireValue::Object(fields) => write_canon_object(buf, fields),
    }
}

fn canon_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }

    // Handle negative zero
    let f = if f == 0.0 { 0.0 } else { f };

    if f.fract() == 0.0 && f.abs() < 1e15 {
        return format!("{}", f as i64);
    }

    Number::from_f64(f)
        .map(|n| n.to_string())
        .unwrap_or_else(|| "null".to_string())
}

fn write_quoted(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '\\' => buf.push_str("\\\\"),
            '"' => buf.push_str("\\\""),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                buf.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

fn write_canon_array(buf: &mut String, items: &[WireValue]) {
    buf.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write_canon(buf, item);
    }
    buf.push(']');
}

fn write_canon_object(buf: &mut String, fields: &BTreeMap<String, WireValue>) {
    buf.push('{');
    let present = fields.iter().filter(|(_, v)| !v.is_absent());
    for (i, (key, value)) in present.enumerate() {
        if i > 0 {
            buf.push(',');
        }
        write_quoted(buf, key);
        buf.push(':');
        write_canon(buf, value);
    }
    buf.push('}');
}

mod hex {
    pub fn encode(data: &[u8]) -> String {
        data.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
