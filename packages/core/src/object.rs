//! Schema-less records and collections of records.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::accessor::{
    nested_field, nested_int64, nested_int64_opt, nested_string, nested_string_list,
    nested_string_map, nested_string_opt, remove_nested_field, set_nested_field,
    set_nested_string_list, set_nested_string_map, StringMap,
};
use crate::owner::{embed_owner_references, extract_owner_references, OwnerReference};
use crate::{path, ApiObject, Error, GroupVersionKind, Map, Path, Value};

/// A single record held as a generic map.
///
/// By convention the top level carries `apiVersion`, `kind` and a
/// `metadata` map, but nothing enforces that: any map is a valid `Object`.
/// The accessors below read those conventional fields and fall back to zero
/// values when they are missing or mistyped.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Object {
    content: Map,
}

impl Object {
    pub fn new() -> Self {
        Object::default()
    }

    /// Shortcut for an object carrying only a structural key.
    pub fn with_kind(api_version: &str, kind: &str) -> Self {
        let mut object = Object::new();
        object.set_api_version(api_version);
        object.set_kind(kind);
        object
    }

    pub fn content(&self) -> &Map {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Map {
        &mut self.content
    }

    pub fn into_content(self) -> Map {
        self.content
    }

    /// Replace the whole map, returning the previous one.
    pub fn replace_content(&mut self, content: Map) -> Map {
        std::mem::replace(&mut self.content, content)
    }

    /// Borrow the value at `path`.
    pub fn field(&self, path: &Path) -> Option<&Value> {
        nested_field(&self.content, path)
    }

    /// Set the value at `path`, creating intermediate maps.
    pub fn set_field(&mut self, path: &Path, value: impl Into<Value>) {
        set_nested_field(&mut self.content, value, path);
    }

    /// Remove the value at `path`.
    pub fn remove_field(&mut self, path: &Path) -> Option<Value> {
        remove_nested_field(&mut self.content, path)
    }

    // === Structural key ===

    pub fn kind(&self) -> String {
        nested_string(&self.content, &path!("kind"))
    }

    pub fn set_kind(&mut self, kind: &str) {
        self.set_field(&path!("kind"), kind);
    }

    pub fn api_version(&self) -> String {
        nested_string(&self.content, &path!("apiVersion"))
    }

    pub fn set_api_version(&mut self, api_version: &str) {
        self.set_field(&path!("apiVersion"), api_version);
    }

    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind::from_api_version_and_kind(&self.api_version(), &self.kind())
    }

    pub fn set_group_version_kind(&mut self, gvk: &GroupVersionKind) {
        self.set_api_version(&gvk.api_version());
        self.set_kind(&gvk.kind);
    }

    /// True when `items` holds a list, i.e. the map is an undecoded collection.
    pub fn is_list(&self) -> bool {
        matches!(self.content.get("items"), Some(Value::Array(_)))
    }

    // === Metadata ===

    pub fn name(&self) -> String {
        self.metadata_string("name")
    }

    pub fn set_name(&mut self, name: &str) {
        self.set_metadata_string("name", name);
    }

    pub fn namespace(&self) -> String {
        self.metadata_string("namespace")
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.set_metadata_string("namespace", namespace);
    }

    pub fn generate_name(&self) -> String {
        self.metadata_string("generateName")
    }

    pub fn set_generate_name(&mut self, generate_name: &str) {
        self.set_metadata_string("generateName", generate_name);
    }

    pub fn uid(&self) -> String {
        self.metadata_string("uid")
    }

    pub fn set_uid(&mut self, uid: &str) {
        self.set_metadata_string("uid", uid);
    }

    pub fn resource_version(&self) -> String {
        self.metadata_string("resourceVersion")
    }

    pub fn set_resource_version(&mut self, resource_version: &str) {
        self.set_metadata_string("resourceVersion", resource_version);
    }

    pub fn self_link(&self) -> String {
        self.metadata_string("selfLink")
    }

    pub fn set_self_link(&mut self, self_link: &str) {
        self.set_metadata_string("selfLink", self_link);
    }

    /// Creation timestamp as serialized (RFC 3339), or `""`.
    pub fn creation_timestamp(&self) -> String {
        self.metadata_string("creationTimestamp")
    }

    pub fn set_creation_timestamp(&mut self, timestamp: &str) {
        self.set_metadata_string("creationTimestamp", timestamp);
    }

    pub fn deletion_timestamp(&self) -> Option<String> {
        nested_string_opt(&self.content, &path!("metadata", "deletionTimestamp"))
            .map(str::to_owned)
    }

    pub fn set_deletion_timestamp(&mut self, timestamp: Option<&str>) {
        match timestamp {
            Some(ts) => self.set_field(&path!("metadata", "deletionTimestamp"), ts),
            None => {
                self.remove_field(&path!("metadata", "deletionTimestamp"));
            }
        }
    }

    pub fn generation(&self) -> i64 {
        nested_int64(&self.content, &path!("metadata", "generation"))
    }

    /// Zero removes the field.
    pub fn set_generation(&mut self, generation: i64) {
        let path = path!("metadata", "generation");
        if generation == 0 {
            self.remove_field(&path);
        } else {
            self.set_field(&path, generation);
        }
    }

    /// Grace period in seconds; `None` when unset, distinct from `Some(0)`.
    pub fn deletion_grace_period_seconds(&self) -> Option<i64> {
        nested_int64_opt(
            &self.content,
            &path!("metadata", "deletionGracePeriodSeconds"),
        )
    }

    pub fn set_deletion_grace_period_seconds(&mut self, seconds: Option<i64>) {
        let path = path!("metadata", "deletionGracePeriodSeconds");
        match seconds {
            Some(s) => self.set_field(&path, s),
            None => {
                self.remove_field(&path);
            }
        }
    }

    pub fn labels(&self) -> StringMap {
        nested_string_map(&self.content, &path!("metadata", "labels"))
    }

    /// An empty map removes the field.
    pub fn set_labels(&mut self, labels: StringMap) {
        self.set_metadata_string_map("labels", labels);
    }

    pub fn annotations(&self) -> StringMap {
        nested_string_map(&self.content, &path!("metadata", "annotations"))
    }

    /// An empty map removes the field.
    pub fn set_annotations(&mut self, annotations: StringMap) {
        self.set_metadata_string_map("annotations", annotations);
    }

    pub fn finalizers(&self) -> Vec<String> {
        nested_string_list(&self.content, &path!("metadata", "finalizers"))
    }

    /// An empty list removes the field.
    pub fn set_finalizers(&mut self, finalizers: Vec<String>) {
        let path = path!("metadata", "finalizers");
        if finalizers.is_empty() {
            self.remove_field(&path);
        } else {
            set_nested_string_list(&mut self.content, finalizers, &path);
        }
    }

    /// The typed ownership list.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the list or one of its entries has the
    /// wrong shape.
    pub fn owner_references(&self) -> Result<Vec<OwnerReference>, Error> {
        extract_owner_references(&self.content)
    }

    /// An empty slice removes the field.
    pub fn set_owner_references(&mut self, references: &[OwnerReference]) {
        embed_owner_references(&mut self.content, references);
    }

    /// The owner reference marked as controller, if any.
    pub fn controller_of(&self) -> Result<Option<OwnerReference>, Error> {
        Ok(self
            .owner_references()?
            .into_iter()
            .find(OwnerReference::is_controller))
    }

    fn metadata_string(&self, key: &str) -> String {
        nested_string(&self.content, &path!("metadata", key))
    }

    fn set_metadata_string(&mut self, key: &str, value: &str) {
        let path = path!("metadata", key);
        if value.is_empty() {
            self.remove_field(&path);
        } else {
            self.set_field(&path, value);
        }
    }

    fn set_metadata_string_map(&mut self, key: &str, values: StringMap) {
        let path = path!("metadata", key);
        if values.is_empty() {
            self.remove_field(&path);
        } else {
            set_nested_string_map(&mut self.content, values, &path);
        }
    }
}

impl From<Map> for Object {
    fn from(content: Map) -> Self {
        Object { content }
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Map(object.content)
    }
}

impl ApiObject for Object {
    fn group_version_kind(&self) -> GroupVersionKind {
        Object::group_version_kind(self)
    }

    fn set_group_version_kind(&mut self, gvk: &GroupVersionKind) {
        Object::set_group_version_kind(self, gvk);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A collection: list-level fields plus decoded member records.
///
/// The member records live in `items`, never under an `items` key inside the
/// list-level map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectList {
    content: Map,
    items: Vec<Object>,
}

impl ObjectList {
    pub fn new() -> Self {
        ObjectList::default()
    }

    /// Assemble a list. Any `items` key left in `content` is dropped.
    pub fn from_parts(mut content: Map, items: Vec<Object>) -> Self {
        content.shift_remove("items");
        ObjectList { content, items }
    }

    pub fn content(&self) -> &Map {
        &self.content
    }

    /// Mutable list-level fields.
    ///
    /// Members go through [`ObjectList::items_mut`]; an `items` key written
    /// here is ignored on encode.
    pub fn content_mut(&mut self) -> &mut Map {
        &mut self.content
    }

    pub fn items(&self) -> &[Object] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Object> {
        &mut self.items
    }

    pub fn into_parts(self) -> (Map, Vec<Object>) {
        (self.content, self.items)
    }

    pub fn push(&mut self, item: Object) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.items.iter()
    }

    /// Visit each member in order, stopping at the first error.
    pub fn each_item<E>(&self, mut f: impl FnMut(&Object) -> Result<(), E>) -> Result<(), E> {
        self.items.iter().try_for_each(|item| f(item))
    }

    pub fn kind(&self) -> String {
        nested_string(&self.content, &path!("kind"))
    }

    pub fn set_kind(&mut self, kind: &str) {
        set_nested_field(&mut self.content, kind, &path!("kind"));
    }

    pub fn api_version(&self) -> String {
        nested_string(&self.content, &path!("apiVersion"))
    }

    pub fn set_api_version(&mut self, api_version: &str) {
        set_nested_field(&mut self.content, api_version, &path!("apiVersion"));
    }

    pub fn group_version_kind(&self) -> GroupVersionKind {
        GroupVersionKind::from_api_version_and_kind(&self.api_version(), &self.kind())
    }

    pub fn set_group_version_kind(&mut self, gvk: &GroupVersionKind) {
        self.set_api_version(&gvk.api_version());
        self.set_kind(&gvk.kind);
    }

    pub fn resource_version(&self) -> String {
        nested_string(&self.content, &path!("metadata", "resourceVersion"))
    }

    pub fn set_resource_version(&mut self, resource_version: &str) {
        set_nested_field(
            &mut self.content,
            resource_version,
            &path!("metadata", "resourceVersion"),
        );
    }

    /// Pagination token for the next page, or `""`.
    pub fn continue_token(&self) -> String {
        nested_string(&self.content, &path!("metadata", "continue"))
    }

    pub fn set_continue_token(&mut self, token: &str) {
        let path = path!("metadata", "continue");
        if token.is_empty() {
            remove_nested_field(&mut self.content, &path);
        } else {
            set_nested_field(&mut self.content, token, &path);
        }
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl ApiObject for ObjectList {
    fn group_version_kind(&self) -> GroupVersionKind {
        ObjectList::group_version_kind(self)
    }

    fn set_group_version_kind(&mut self, gvk: &GroupVersionKind) {
        ObjectList::set_group_version_kind(self, gvk);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A decoded record whose shape was inferred from the input.
#[derive(Clone, Debug, PartialEq)]
pub enum Unstructured {
    /// A single record.
    Object(Object),
    /// A collection of records.
    List(ObjectList),
}

impl Unstructured {
    pub fn is_list(&self) -> bool {
        matches!(self, Unstructured::List(_))
    }

    pub fn group_version_kind(&self) -> GroupVersionKind {
        match self {
            Unstructured::Object(o) => o.group_version_kind(),
            Unstructured::List(l) => l.group_version_kind(),
        }
    }

    pub fn set_group_version_kind(&mut self, gvk: &GroupVersionKind) {
        match self {
            Unstructured::Object(o) => o.set_group_version_kind(gvk),
            Unstructured::List(l) => l.set_group_version_kind(gvk),
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Unstructured::Object(o) => Some(o),
            Unstructured::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&ObjectList> {
        match self {
            Unstructured::Object(_) => None,
            Unstructured::List(l) => Some(l),
        }
    }

    pub fn into_object(self) -> Option<Object> {
        match self {
            Unstructured::Object(o) => Some(o),
            Unstructured::List(_) => None,
        }
    }

    pub fn into_list(self) -> Option<ObjectList> {
        match self {
            Unstructured::Object(_) => None,
            Unstructured::List(l) => Some(l),
        }
    }
}

impl From<Object> for Unstructured {
    fn from(o: Object) -> Self {
        Unstructured::Object(o)
    }
}

impl From<ObjectList> for Unstructured {
    fn from(l: ObjectList) -> Self {
        Unstructured::List(l)
    }
}

/// Decoded records collected for a caller that does not know their shape.
///
/// The structural key is that of the last record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VersionedObjects {
    pub objects: Vec<Unstructured>,
}

impl VersionedObjects {
    pub fn first(&self) -> Option<&Unstructured> {
        self.objects.first()
    }

    pub fn last(&self) -> Option<&Unstructured> {
        self.objects.last()
    }
}

impl ApiObject for VersionedObjects {
    fn group_version_kind(&self) -> GroupVersionKind {
        self.last()
            .map(Unstructured::group_version_kind)
            .unwrap_or_default()
    }

    fn set_group_version_kind(&mut self, gvk: &GroupVersionKind) {
        if let Some(last) = self.objects.last_mut() {
            last.set_group_version_kind(gvk);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
