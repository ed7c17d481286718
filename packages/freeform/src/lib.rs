//! Freeform: decode, inspect and re-encode API records without compile-time
//! type definitions.
//!
//! Records of any kind are held as generic trees. Field access is by path
//! and total, collections are recognized from their shape, and the one
//! well-known typed sub-structure (owner references) is bridged both ways.
//!
//! # Example
//!
//! ```rust
//! use freeform::{path, UnstructuredJsonScheme};
//!
//! let scheme = UnstructuredJsonScheme::new();
//! let list = scheme
//!     .decode(br#"{"kind":"WidgetList","apiVersion":"example.com/v1","items":[{"spec":{"size":2}}]}"#)?
//!     .object
//!     .into_list()
//!     .unwrap();
//!
//! let widget = &list.items()[0];
//! assert_eq!(widget.kind(), "Widget");
//! assert_eq!(freeform::accessor::nested_int64(widget.content(), &path!("spec", "size")), 2);
//! # Ok::<(), freeform::Error>(())
//! ```

pub use freeform_core::*;
pub use freeform_json::{
    from_object, from_value, json_to_value, to_object, to_value, value_to_json, Bytes, Decoded,
    JsonCodec, SchemeOptions, UnstructuredJsonScheme,
};
