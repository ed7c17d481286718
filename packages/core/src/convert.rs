//! The identity converter for schema-less records.
//!
//! Schema-less records have no typed counterparts and no field-label
//! tables, so the only conversions available are handing a record's map to
//! another schema-less record and relabelling its structural key.

use crate::{ApiObject, Error, GroupVersionKind, GroupVersioner, Object, ObjectConverter};

/// Converter that refuses everything except identity and version relabelling.
///
/// Stateless; construct one wherever a converter is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityConverter;

impl IdentityConverter {
    pub fn new() -> Self {
        IdentityConverter
    }
}

impl ObjectConverter for IdentityConverter {
    /// Move `input`'s map into `out`. Both must be [`Object`]s.
    ///
    /// No copy is made: `input` is left holding an empty map.
    fn convert(&self, input: &mut dyn ApiObject, out: &mut dyn ApiObject) -> Result<(), Error> {
        let input_type = input.type_name();
        let out_type = out.type_name();

        let Some(source) = input.downcast_mut::<Object>() else {
            return Err(Error::unsupported(format!(
                "input type {} is not valid for unstructured conversion to {}",
                input_type, out_type
            )));
        };
        let Some(target) = out.downcast_mut::<Object>() else {
            return Err(Error::unsupported(format!(
                "output type {} is not valid for unstructured conversion from {}",
                out_type, input_type
            )));
        };

        let content = source.replace_content(Default::default());
        target.replace_content(content);
        Ok(())
    }

    /// Relabel `obj` with the kind `target` resolves for it.
    ///
    /// A record with an empty structural key is left untouched.
    fn convert_to_version(
        &self,
        obj: &mut dyn ApiObject,
        target: &dyn GroupVersioner,
    ) -> Result<(), Error> {
        let gvk = obj.group_version_kind();
        if gvk.is_empty() {
            return Ok(());
        }

        let resolved = target
            .kind_for_group_version_kinds(std::slice::from_ref(&gvk))
            .ok_or_else(|| Error::NoSuitableKind {
                gvk: gvk.clone(),
                target: target.identifier(),
            })?;

        log::debug!("relabelling {} as {}", gvk, resolved);
        obj.set_group_version_kind(&resolved);
        Ok(())
    }

    fn convert_field_label(
        &self,
        _gvk: &GroupVersionKind,
        _label: &str,
        _value: &str,
    ) -> Result<(String, String), Error> {
        Err(Error::unsupported("unstructured cannot convert field labels"))
    }
}
