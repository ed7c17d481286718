//! JSON codec for record trees.

use bytes::Bytes;
use freeform_core::{Error, Map, Value};
use serde::Serialize;

/// Parses and serializes record trees as JSON.
///
/// Parsing goes straight into [`Value`], so key order is kept and integers
/// that fit in `i64` stay integers.
///
/// # Example
///
/// ```rust
/// use freeform_json::JsonCodec;
/// use freeform_core::Value;
///
/// let codec = JsonCodec;
/// let value = Value::from("hello");
///
/// let bytes = codec.encode(&value).unwrap();
/// let decoded = codec.decode(&bytes).unwrap();
///
/// assert_eq!(decoded, value);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Parse any JSON document.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::shape(e.to_string()))
    }

    /// Parse a JSON document that must be an object.
    pub fn decode_map(&self, bytes: &[u8]) -> Result<Map, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::shape(e.to_string()))
    }

    /// Serialize a tree. Non-finite floats are written as `null`.
    pub fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        self.encode_serializable(value)
    }

    pub fn encode_map(&self, map: &Map) -> Result<Bytes, Error> {
        self.encode_serializable(map)
    }

    pub(crate) fn encode_serializable<T: Serialize + ?Sized>(
        &self,
        data: &T,
    ) -> Result<Bytes, Error> {
        let bytes = serde_json::to_vec(data).map_err(|e| Error::encode(e.to_string()))?;
        Ok(Bytes::from(bytes))
    }
}
