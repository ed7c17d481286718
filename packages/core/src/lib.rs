//! Freeform core: schema-less records
//!
//! This layer holds records whose shape is unknown at build time:
//! - `Value`: the record tree (maps, lists, scalars)
//! - `accessor`: total get/set over nested maps by `Path`
//! - `Object` / `ObjectList`: records and collections, with metadata accessors
//! - `OwnerReference`: the typed bridge for `metadata.ownerReferences`
//! - `IdentityConverter`: the only conversion schema-less records support
//!
//! Byte encodings live in `freeform-json`.
//!
//! # Example
//!
//! ```rust
//! use freeform_core::{accessor, path, Object};
//!
//! let mut obj = Object::with_kind("example.com/v1", "Widget");
//! obj.set_name("w1");
//! accessor::set_nested_string_list(obj.content_mut(), ["a", "b"], &path!("spec", "tags"));
//!
//! assert_eq!(obj.name(), "w1");
//! assert_eq!(accessor::nested_string_list(obj.content(), &path!("spec", "tags")), vec!["a", "b"]);
//! ```

pub mod accessor;
mod convert;
mod error;
mod gvk;
mod object;
mod owner;
mod path;
mod traits;
mod value;

pub use accessor::StringMap;
pub use convert::IdentityConverter;
pub use error::Error;
pub use gvk::{GroupKind, GroupVersion, GroupVersionKind, GroupVersioner, GroupVersions};
pub use object::{Object, ObjectList, Unstructured, VersionedObjects};
pub use owner::{
    embed_owner_reference, embed_owner_references, extract_owner_reference,
    extract_owner_references, OwnerReference,
};
pub use path::{Path, PathError};
pub use traits::{ApiObject, ObjectConverter};
pub use value::{Map, Value};
