//! Error types for schema-less records.

use crate::gvk::GroupVersionKind;
use crate::path::{Path, PathError};

/// Errors raised while decoding, accessing or converting records.
///
/// Every operation in this crate is a deterministic transform, so nothing
/// here is retried: errors go straight back to the immediate caller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The buffer is not valid serialized structural data.
    #[error("shape error: {message}")]
    Shape { message: String },

    /// Decoding succeeded structurally but the record names no kind.
    ///
    /// `partial` carries the best-effort structural key (group and version
    /// as found, empty kind).
    #[error("Object 'Kind' is missing in '{data}'")]
    MissingKind {
        partial: GroupVersionKind,
        data: String,
    },

    /// A value in the tree has the wrong runtime shape for a typed access.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },

    /// The conversion is not implemented for schema-less records.
    #[error("unsupported conversion: {message}")]
    UnsupportedConversion { message: String },

    /// A versioner could not map the record's kind onto the target versions.
    #[error("{gvk} is unstructured and is not suitable for converting to {target:?}")]
    NoSuitableKind {
        gvk: GroupVersionKind,
        target: String,
    },

    /// Serializing a record failed.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Path parsing error.
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

impl Error {
    pub fn shape(message: impl Into<String>) -> Self {
        Error::Shape {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedConversion {
            message: message.into(),
        }
    }

    pub fn type_mismatch(path: Path, expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch {
            path,
            expected,
            found,
        }
    }

    /// Build a missing-kind error, keeping the offending input for diagnostics.
    pub fn missing_kind(partial: GroupVersionKind, data: &[u8]) -> Self {
        Error::MissingKind {
            partial,
            data: String::from_utf8_lossy(data).into_owned(),
        }
    }

    /// Check whether this is a missing-kind condition.
    pub fn is_missing_kind(&self) -> bool {
        matches!(self, Error::MissingKind { .. })
    }

    /// The partial structural key of a missing-kind error.
    pub fn partial_kind(&self) -> Option<&GroupVersionKind> {
        match self {
            Error::MissingKind { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
