//! Core traits: ApiObject, ObjectConverter.

use std::any::Any;
use std::fmt;

use crate::{Error, GroupVersionKind, GroupVersioner};

/// A record of any representation, schema-less or strongly typed.
///
/// This is the type-erased seam through which converters and the decoder's
/// `decode_into` accept destinations. Implementors expose their structural
/// key and allow downcasting to the concrete type.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn ApiObject`.
pub trait ApiObject: Any + fmt::Debug {
    /// The record's structural key. Empty fields mean "not set".
    fn group_version_kind(&self) -> GroupVersionKind;

    /// Overwrite the record's structural key.
    fn set_group_version_kind(&mut self, gvk: &GroupVersionKind);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Rust type name of the implementor, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Converts records between representations and versions.
pub trait ObjectConverter {
    /// Convert `input` into `out`.
    ///
    /// Implementations may consume the content of `input`.
    fn convert(&self, input: &mut dyn ApiObject, out: &mut dyn ApiObject) -> Result<(), Error>;

    /// Rewrite `obj` in place so it is expressed in a version `target` accepts.
    fn convert_to_version(
        &self,
        obj: &mut dyn ApiObject,
        target: &dyn GroupVersioner,
    ) -> Result<(), Error>;

    /// Translate a field-selector label and value for the given kind.
    fn convert_field_label(
        &self,
        gvk: &GroupVersionKind,
        label: &str,
        value: &str,
    ) -> Result<(String, String), Error>;
}

impl dyn ApiObject {
    /// Downcast to a concrete type.
    pub fn downcast_ref<T: ApiObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably downcast to a concrete type.
    pub fn downcast_mut<T: ApiObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Check the concrete type.
    pub fn is<T: ApiObject>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
