//! The JSON scheme: decoding bytes into schema-less records and back.
//!
//! The decoder has no type information, so it guesses the shape from the
//! bytes. A cheap first pass looks only for a top-level `items` key; if one
//! is there, even as `null`, the input is a collection, otherwise a single
//! record. Collection members are decoded one at a time from their raw JSON
//! slices, and members that name neither a kind nor an `apiVersion` inherit
//! them from the collection (`WidgetList` members become `Widget`).

use bytes::Bytes;
use freeform_core::{
    ApiObject, Error, GroupVersionKind, Map, Object, ObjectList, Unstructured, Value,
    VersionedObjects,
};
use std::borrow::Cow;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::codec::JsonCodec;

/// Decoder settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemeOptions {
    /// Back-fill `kind`/`apiVersion` on collection members that set neither.
    pub infer_item_kinds: bool,
    /// Suffix stripped from a collection's kind to get its members' kind.
    pub list_kind_suffix: String,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        SchemeOptions {
            infer_item_kinds: true,
            list_kind_suffix: "List".to_string(),
        }
    }
}

/// A decoded record and its structural key.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub object: Unstructured,
    pub gvk: GroupVersionKind,
}

/// Only looks at `items`; everything else is skipped without being built.
///
/// `items` is `Some` whenever the key appears, including as `null`. A
/// repeated key keeps the last occurrence, as the full parse does.
struct ItemsProbe<'a> {
    items: Option<&'a RawValue>,
}

impl<'a> ItemsProbe<'a> {
    fn parse(data: &'a [u8]) -> Result<Self, Error> {
        serde_json::from_slice(data).map_err(|e| Error::shape(e.to_string()))
    }

    /// The raw members of a non-null `items`.
    fn raw_items(&self) -> Result<Vec<&'a RawValue>, Error> {
        match self.items {
            Some(raw) if raw.get() != "null" => serde_json::from_str(raw.get())
                .map_err(|e| Error::shape(format!("items: {}", e))),
            _ => Ok(Vec::new()),
        }
    }
}

struct ItemsProbeVisitor;

impl<'de> Visitor<'de> for ItemsProbeVisitor {
    type Value = ItemsProbe<'de>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut items = None;
        while let Some(key) = access.next_key::<Cow<'de, str>>()? {
            if key == "items" {
                items = Some(access.next_value::<&'de RawValue>()?);
            } else {
                access.next_value::<IgnoredAny>()?;
            }
        }
        Ok(ItemsProbe { items })
    }
}

impl<'de: 'a, 'a> Deserialize<'de> for ItemsProbe<'a> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ItemsProbeVisitor)
    }
}

/// Encodes a list without copying it: list-level fields, then `items`.
struct ListView<'a> {
    content: &'a Map,
    items: &'a [Object],
}

impl Serialize for ListView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.content.iter().filter(|(k, _)| k.as_str() != "items");
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in fields {
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry("items", self.items)?;
        map.end()
    }
}

/// Decoder and encoder for schema-less JSON records.
///
/// Holds only its options; all methods are pure functions of their input.
///
/// # Example
///
/// ```rust
/// use freeform_json::UnstructuredJsonScheme;
///
/// let scheme = UnstructuredJsonScheme::new();
/// let decoded = scheme
///     .decode(br#"{"kind":"WidgetList","apiVersion":"v1","items":[{"spec":"a"}]}"#)
///     .unwrap();
///
/// let list = decoded.object.as_list().unwrap();
/// assert_eq!(list.items()[0].kind(), "Widget");
/// assert_eq!(list.items()[0].api_version(), "v1");
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnstructuredJsonScheme {
    options: SchemeOptions,
    codec: JsonCodec,
}

impl UnstructuredJsonScheme {
    pub fn new() -> Self {
        UnstructuredJsonScheme::default()
    }

    pub fn with_options(options: SchemeOptions) -> Self {
        UnstructuredJsonScheme {
            options,
            codec: JsonCodec,
        }
    }

    pub fn options(&self) -> &SchemeOptions {
        &self.options
    }

    /// Decode bytes, inferring single record vs. collection.
    ///
    /// # Errors
    ///
    /// - [`Error::Shape`] if the bytes are not a JSON object, or a
    ///   collection's `items` is not a list of objects.
    /// - [`Error::MissingKind`] if decoding worked but no kind is set. The
    ///   error carries the partial structural key.
    pub fn decode(&self, data: &[u8]) -> Result<Decoded, Error> {
        let object = if self.probe_is_list(data)? {
            Unstructured::List(self.decode_list(data)?)
        } else {
            Unstructured::Object(self.decode_object(data)?)
        };

        let gvk = object.group_version_kind();
        if gvk.kind.is_empty() {
            return Err(Error::missing_kind(gvk, data));
        }
        Ok(Decoded { object, gvk })
    }

    /// Decode into a destination whose shape the caller already knows.
    ///
    /// An [`Object`] destination is decoded as a single record and an
    /// [`ObjectList`] as a collection, without probing. A
    /// [`VersionedObjects`] destination is replaced by the single result of
    /// [`decode`].
    ///
    /// # Errors
    ///
    /// As for [`decode`], plus [`Error::UnsupportedConversion`] for any
    /// other destination type.
    ///
    /// [`decode`]: UnstructuredJsonScheme::decode
    pub fn decode_into(
        &self,
        data: &[u8],
        into: &mut dyn ApiObject,
    ) -> Result<GroupVersionKind, Error> {
        if let Some(versioned) = into.downcast_mut::<VersionedObjects>() {
            let decoded = self.decode(data)?;
            versioned.objects = vec![decoded.object];
            return Ok(decoded.gvk);
        }

        if let Some(object) = into.downcast_mut::<Object>() {
            *object = self.decode_object(data)?;
        } else if let Some(list) = into.downcast_mut::<ObjectList>() {
            *list = self.decode_list(data)?;
        } else {
            return Err(Error::unsupported(format!(
                "cannot decode unstructured JSON into {}",
                into.type_name()
            )));
        }

        let gvk = into.group_version_kind();
        if gvk.kind.is_empty() {
            return Err(Error::missing_kind(gvk, data));
        }
        Ok(gvk)
    }

    /// Decode a single record. The top level must be a JSON object.
    pub fn decode_object(&self, data: &[u8]) -> Result<Object, Error> {
        self.codec.decode_map(data).map(Object::from)
    }

    /// Decode a collection, back-filling member kinds.
    pub fn decode_list(&self, data: &[u8]) -> Result<ObjectList, Error> {
        let mut content = self.codec.decode_map(data)?;
        let raw_items = match content.shift_remove("items") {
            Some(Value::Null) | None => Vec::new(),
            Some(_) => ItemsProbe::parse(data)?.raw_items()?,
        };

        let mut list = ObjectList::from_parts(content, Vec::with_capacity(raw_items.len()));
        let list_kind = list.kind();
        let list_api_version = list.api_version();
        let item_kind = list_kind
            .strip_suffix(self.options.list_kind_suffix.as_str())
            .unwrap_or(&list_kind)
            .to_string();

        log::debug!(
            "decoding {} with {} item(s)",
            if list_kind.is_empty() { "list" } else { list_kind.as_str() },
            raw_items.len()
        );

        for (i, raw) in raw_items.into_iter().enumerate() {
            let mut item = self
                .decode_object(raw.get().as_bytes())
                .map_err(|e| match e {
                    Error::Shape { message } => Error::shape(format!("items[{}]: {}", i, message)),
                    other => other,
                })?;

            if self.options.infer_item_kinds
                && item.kind().is_empty()
                && item.api_version().is_empty()
            {
                log::trace!("items[{}]: inferring {} {}", i, list_api_version, item_kind);
                item.set_kind(&item_kind);
                item.set_api_version(&list_api_version);
            }
            list.push(item);
        }

        Ok(list)
    }

    /// Encode any record this scheme knows how to represent.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedConversion`] for anything but [`Object`] and
    /// [`ObjectList`].
    pub fn encode(&self, obj: &dyn ApiObject) -> Result<Bytes, Error> {
        if let Some(object) = obj.downcast_ref::<Object>() {
            self.encode_object(object)
        } else if let Some(list) = obj.downcast_ref::<ObjectList>() {
            self.encode_list(list)
        } else {
            Err(Error::unsupported(format!(
                "cannot encode {} as unstructured JSON",
                obj.type_name()
            )))
        }
    }

    pub fn encode_unstructured(&self, obj: &Unstructured) -> Result<Bytes, Error> {
        match obj {
            Unstructured::Object(o) => self.encode_object(o),
            Unstructured::List(l) => self.encode_list(l),
        }
    }

    /// A single record is written as its map, verbatim.
    pub fn encode_object(&self, object: &Object) -> Result<Bytes, Error> {
        self.codec.encode_map(object.content())
    }

    /// A collection is written as its list-level map with `items` appended.
    ///
    /// The stored list is only borrowed; its map never gains an `items` key.
    pub fn encode_list(&self, list: &ObjectList) -> Result<Bytes, Error> {
        self.codec.encode_serializable(&ListView {
            content: list.content(),
            items: list.items(),
        })
    }

    /// First pass: is there a top-level `items` key?
    fn probe_is_list(&self, data: &[u8]) -> Result<bool, Error> {
        Ok(ItemsProbe::parse(data)?.items.is_some())
    }
}
