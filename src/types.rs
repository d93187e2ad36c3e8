//! In-memory value model

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A value the codec can serialize
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value, distinct from `Null`
    Absent,
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Int(i64),
    /// Floating point value (f64)
    Float(f64),
    /// String value
    String(String),
    /// Instant in time, millisecond precision on the wire
    Timestamp(DateTime<Utc>),
    /// Binary data (bytes)
    Binary(Vec<u8>),
    /// Ordered collection of distinct elements
    UniqueCollection(UniqueCollection),
    /// Ordered collection of key-value pairs
    PairCollection(PairCollection),
    /// Ordered list of values
    Sequence(Vec<Value>),
    /// String-keyed record
    Record(BTreeMap<String, Value>),
}

/// Insertion-ordered collection of distinct values.
///
/// Distinctness is structural: two elements are the same if they compare
/// equal with `PartialEq`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UniqueCollection {
    items: Vec<Value>,
}

impl UniqueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` unless an equal element is already present.
    /// Returns whether the value was inserted.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.items.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl FromIterator<Value> for UniqueCollection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut out = UniqueCollection::new();
        for value in iter {
            out.insert(value);
        }
        out
    }
}

impl<'a> IntoIterator for &'a UniqueCollection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Insertion-ordered collection of key-value pairs.
///
/// Keys are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairCollection {
    pairs: Vec<(Value, Value)>,
}

impl PairCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Value, value: Value) {
        self.pairs.push((key, value));
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Value, Value)> {
        self.pairs.iter()
    }

    pub fn as_slice(&self) -> &[(Value, Value)] {
        &self.pairs
    }

    pub fn into_vec(self) -> Vec<(Value, Value)> {
        self.pairs
    }
}

impl FromIterator<(Value, Value)> for PairCollection {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PairCollection {
    type Item = &'a (Value, Value);
    type IntoIter = std::slice::Iter<'a, (Value, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

// ============================================================
// Builder functions
// ============================================================

impl Value {
    pub fn absent() -> Self {
        Value::Absent
    }

    pub fn null() -> Self {
        Value::Null
    }

    pub fn bool(v: bool) -> Self {
        Value::Bool(v)
    }

    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    pub fn float(v: f64) -> Self {
        Value::Float(v)
    }

    pub fn str(v: impl Into<String>) -> Self {
        Value::String(v.into())
    }

    pub fn timestamp(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }

    /// Create a timestamp from milliseconds since the Unix epoch.
    /// Returns `None` when the instant is outside chrono's range.
    pub fn timestamp_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Value::Timestamp)
    }

    pub fn binary(v: impl Into<Vec<u8>>) -> Self {
        Value::Binary(v.into())
    }

    /// Create a unique collection; later duplicates are dropped
    pub fn unique(items: impl IntoIterator<Item = Value>) -> Self {
        Value::UniqueCollection(items.into_iter().collect())
    }

    pub fn pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::PairCollection(pairs.into_iter().collect())
    }

    pub fn seq(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    // ============================================================
    // Type checking
    // ============================================================

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for the scalar primitives: string, number, boolean
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_)
        )
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Binary(_))
    }

    pub fn is_unique_collection(&self) -> bool {
        matches!(self, Value::UniqueCollection(_))
    }

    pub fn is_pair_collection(&self) -> bool {
        matches!(self, Value::PairCollection(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Short type name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Binary(_) => "binary",
            Value::UniqueCollection(_) => "unique collection",
            Value::PairCollection(_) => "pair collection",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    // ============================================================
    // Value extraction
    // ============================================================

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_unique_collection(&self) -> Option<&UniqueCollection> {
        match self {
            Value::UniqueCollection(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pair_collection(&self) -> Option<&PairCollection> {
        match self {
            Value::PairCollection(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Get a field from a record by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Get an element from a sequence by index
    pub fn index(&self, idx: usize) -> Option<&Value> {
        match self {
            Value::Sequence(items) => items.get(idx),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Sequence(v)
    }
}

/// Helper to create a record field
pub fn field(key: impl Into<String>, value: Value) -> (String, Value) {
    (key.into(), value)
}
