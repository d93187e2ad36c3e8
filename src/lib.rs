//! Envelope Codec - tagged JSON-safe encoding for values JSON cannot express
//!
//! Timestamps, binary blobs, unique-element collections and key-value
//! collections are written as `{"tag": ..., "payload": ...}` envelopes;
//! everything else maps directly onto JSON.
//!
//! # Example
//!
//! ```rust
//! use envelope_codec::{deserialize, serialize, to_json_string, Value};
//!
//! let value = Value::binary(vec![1u8, 2, 3]);
//! assert_eq!(to_json_string(&value), r#"{"payload":[1,2,3],"tag":"Binary"}"#);
//!
//! let wire = serialize(&value);
//! assert_eq!(deserialize(&wire).unwrap(), value);
//! ```
//!
//! Elements of unique and pair collections are copied as plain values and
//! are not themselves tagged; use [`CodecOptions::encoded`] to encode them
//! recursively. An ordinary object shaped like an envelope is decoded as
//! one: the format has no escaping.

mod canonical;
mod deserialize;
mod error;
mod json_bridge;
mod registry;
mod serialize;
mod types;
mod wire;

pub use canonical::*;
pub use deserialize::*;
pub use error::*;
pub use json_bridge::*;
pub use registry::*;
pub use serialize::*;
pub use types::*;
pub use wire::*;
