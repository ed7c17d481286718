//! Structural keys: the (group, version, kind) triple naming a record's type.
//!
//! The version label on the wire is `apiVersion`, which packs group and
//! version as `group/version` (or just `version` for the core group).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resource group and version, e.g. `apps/v1`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersion {
    pub group: String,
    pub version: String,
}

impl GroupVersion {
    pub fn new(group: impl Into<String>, version: impl Into<String>) -> Self {
        GroupVersion {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Split an `apiVersion` label into group and version.
    ///
    /// A label without `/` belongs to the core (empty) group. Anything after
    /// a second `/` stays in the version, so parsing never fails.
    ///
    /// ```rust
    /// use freeform_core::GroupVersion;
    ///
    /// assert_eq!(GroupVersion::parse("v1"), GroupVersion::new("", "v1"));
    /// assert_eq!(GroupVersion::parse("apps/v1"), GroupVersion::new("apps", "v1"));
    /// ```
    pub fn parse(api_version: &str) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => GroupVersion::new(group, version),
            None => GroupVersion::new("", api_version),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty()
    }

    #[must_use]
    pub fn with_kind(&self, kind: impl Into<String>) -> GroupVersionKind {
        GroupVersionKind {
            group: self.group.clone(),
            version: self.version.clone(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

/// A resource group and kind, without version.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// The structural key of a record.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        GroupVersionKind {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Build a key from the wire fields `apiVersion` and `kind`.
    pub fn from_api_version_and_kind(api_version: &str, kind: &str) -> Self {
        GroupVersion::parse(api_version).with_kind(kind)
    }

    /// True when group, version and kind are all empty.
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty() && self.kind.is_empty()
    }

    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::new(self.group.clone(), self.version.clone())
    }

    pub fn group_kind(&self) -> GroupKind {
        GroupKind {
            group: self.group.clone(),
            kind: self.kind.clone(),
        }
    }

    /// The `apiVersion` wire label.
    pub fn api_version(&self) -> String {
        self.group_version().to_string()
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.group_version(), self.kind)
    }
}

/// Resolves which kind a record should take on for a target version set.
///
/// Consumed by [`crate::ObjectConverter::convert_to_version`].
pub trait GroupVersioner {
    /// Pick the key to convert to, given the kinds an object is known by.
    ///
    /// Returns `None` when none of `kinds` can be represented in the target.
    fn kind_for_group_version_kinds(&self, kinds: &[GroupVersionKind])
        -> Option<GroupVersionKind>;

    /// Human-readable name of the target, used in error messages.
    fn identifier(&self) -> String;
}

/// A single group/version target: any kind in the same group is rewritten
/// to this version.
impl GroupVersioner for GroupVersion {
    fn kind_for_group_version_kinds(
        &self,
        kinds: &[GroupVersionKind],
    ) -> Option<GroupVersionKind> {
        kinds
            .iter()
            .find(|gvk| gvk.group == self.group)
            .map(|gvk| self.with_kind(gvk.kind.clone()))
    }

    fn identifier(&self) -> String {
        self.to_string()
    }
}

/// An ordered set of group/version targets.
///
/// An exact group/version match wins; otherwise the first target sharing a
/// group with one of the kinds is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupVersions(pub Vec<GroupVersion>);

impl GroupVersioner for GroupVersions {
    fn kind_for_group_version_kinds(
        &self,
        kinds: &[GroupVersionKind],
    ) -> Option<GroupVersionKind> {
        for gv in &self.0 {
            if let Some(exact) = kinds.iter().find(|gvk| gvk.group_version() == *gv) {
                return Some(exact.clone());
            }
        }
        self.0
            .iter()
            .find_map(|gv| gv.kind_for_group_version_kinds(kinds))
    }

    fn identifier(&self) -> String {
        self.0
            .iter()
            .map(GroupVersion::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}
