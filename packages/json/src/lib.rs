//! JSON scheme for Freeform records
//!
//! This layer turns bytes into schema-less records and back. It adds:
//! - `UnstructuredJsonScheme`: decode with single-vs-collection inference,
//!   member kind back-fill, and encoding
//! - `JsonCodec`: plain JSON <-> `Value`
//! - Value <-> serde conversions, including typed structs <-> `Object`
//!
//! # Example
//!
//! ```rust
//! use freeform_json::UnstructuredJsonScheme;
//!
//! let scheme = UnstructuredJsonScheme::new();
//! let decoded = scheme.decode(br#"{"apiVersion":"v1","kind":"Pod","metadata":{"name":"p"}}"#)?;
//!
//! let mut pod = decoded.object.into_object().unwrap();
//! pod.set_namespace("default");
//!
//! let bytes = scheme.encode_object(&pod)?;
//! assert!(bytes.starts_with(br#"{"apiVersion":"v1","kind":"Pod""#));
//! # Ok::<(), freeform_json::Error>(())
//! ```

pub use bytes::Bytes;

mod codec;
mod convert;
mod scheme;

pub use codec::JsonCodec;
pub use convert::{from_object, from_value, json_to_value, to_object, to_value, value_to_json};
pub use scheme::{Decoded, SchemeOptions, UnstructuredJsonScheme};

// Re-export core types for convenience
pub use freeform_core::{
    ApiObject, Error, GroupVersionKind, Map, Object, ObjectList, Unstructured, Value,
    VersionedObjects,
};
