//! Owner references: the typed bridge for `metadata.ownerReferences`.
//!
//! Optional booleans are the tricky part. A `controller` key that is absent
//! (or not a boolean) extracts as `None`, never `Some(false)`, and `None` is
//! embedded by leaving the key out. So `embed(extract(entry))` reproduces
//! any entry that was itself produced by `embed`.

use serde::{Deserialize, Serialize};

use crate::accessor::{nested_bool_opt, nested_string, remove_nested_field, set_nested_field};
use crate::{path, Error, Map, Path, Value};

/// One entry of a record's ownership list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_owner_deletion: Option<bool>,
}

impl OwnerReference {
    /// A reference marking `owner` as the managing controller.
    ///
    /// Both `controller` and `blockOwnerDeletion` are set to `true`.
    pub fn controlled_by(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        OwnerReference {
            kind: kind.into(),
            name: name.into(),
            api_version: api_version.into(),
            uid: uid.into(),
            controller: Some(true),
            block_owner_deletion: Some(true),
        }
    }

    /// True only when `controller` is explicitly set to `true`.
    pub fn is_controller(&self) -> bool {
        self.controller == Some(true)
    }
}

/// Read one owner reference out of a generic entry.
///
/// String fields fall back to `""`. Optional booleans stay `None` unless the
/// key holds an actual boolean.
pub fn extract_owner_reference(entry: &Map) -> OwnerReference {
    OwnerReference {
        kind: nested_string(entry, &path!("kind")),
        name: nested_string(entry, &path!("name")),
        api_version: nested_string(entry, &path!("apiVersion")),
        uid: nested_string(entry, &path!("uid")),
        controller: nested_bool_opt(entry, &path!("controller")),
        block_owner_deletion: nested_bool_opt(entry, &path!("blockOwnerDeletion")),
    }
}

/// Write one owner reference as a generic entry.
///
/// The four string fields are always written, even when empty. Optional
/// booleans are written only when set.
pub fn embed_owner_reference(reference: &OwnerReference) -> Map {
    let mut entry = Map::new();
    set_nested_field(&mut entry, reference.kind.as_str(), &path!("kind"));
    set_nested_field(&mut entry, reference.name.as_str(), &path!("name"));
    set_nested_field(&mut entry, reference.api_version.as_str(), &path!("apiVersion"));
    set_nested_field(&mut entry, reference.uid.as_str(), &path!("uid"));
    if let Some(controller) = reference.controller {
        set_nested_field(&mut entry, controller, &path!("controller"));
    }
    if let Some(block) = reference.block_owner_deletion {
        set_nested_field(&mut entry, block, &path!("blockOwnerDeletion"));
    }
    entry
}

fn owner_references_path() -> Path {
    path!("metadata", "ownerReferences")
}

/// Read the record's whole `metadata.ownerReferences` list.
///
/// A missing or null list reads as empty.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the field holds something other than a
/// list, or if any element is not a map.
pub fn extract_owner_references(obj: &Map) -> Result<Vec<OwnerReference>, Error> {
    let path = owner_references_path();
    let items = match crate::accessor::nested_field(obj, &path) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(Error::type_mismatch(path, "array", other.type_name())),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Map(entry) => Ok(extract_owner_reference(entry)),
            other => Err(Error::type_mismatch(
                path.child(i.to_string()),
                "map",
                other.type_name(),
            )),
        })
        .collect()
}

/// Replace the record's `metadata.ownerReferences` list.
///
/// An empty slice removes the key.
pub fn embed_owner_references(obj: &mut Map, references: &[OwnerReference]) {
    let path = owner_references_path();
    if references.is_empty() {
        remove_nested_field(obj, &path);
        return;
    }

    let items: Vec<Value> = references
        .iter()
        .map(|r| Value::Map(embed_owner_reference(r)))
        .collect();
    set_nested_field(obj, Value::Array(items), &path);
}
