//! Field paths into a record's nested maps.

use std::fmt;

/// Errors related to path parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A dotted path contained an empty component (`a..b`, `.a`, `a.`).
    EmptyComponent { position: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::EmptyComponent { position } => {
                write!(f, "empty path component at position {}", position)
            }
        }
    }
}

impl std::error::Error for PathError {}

/// An ordered list of map keys leading to a nested field.
///
/// Keys are arbitrary strings: record keys such as `app.kubernetes.io/name`
/// are legal components. Use [`Path::new`] or the [`path!`](crate::path!)
/// macro when a key may contain a dot, and [`Path::parse`] for the common
/// dotted shorthand.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// Build a path from its keys, taken verbatim.
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Path {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty path.
    pub fn root() -> Self {
        Path::default()
    }

    /// Parse a dotted path such as `spec.template.metadata`.
    ///
    /// ```rust
    /// use freeform_core::Path;
    ///
    /// let path = Path::parse("metadata.labels").unwrap();
    /// assert_eq!(path.len(), 2);
    /// assert!(Path::parse("metadata..labels").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Ok(Path::root());
        }

        let mut components = Vec::new();
        for (position, component) in s.split('.').enumerate() {
            if component.is_empty() {
                return Err(PathError::EmptyComponent { position });
            }
            components.push(component.to_string());
        }
        Ok(Path { components })
    }

    /// Check if this path is empty (root path).
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Append a key.
    pub fn push(&mut self, key: impl Into<String>) {
        self.components.push(key.into());
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Path { components }
    }

    /// A new path with one more key.
    #[must_use]
    pub fn child(&self, key: impl Into<String>) -> Path {
        let mut path = self.clone();
        path.push(key);
        path
    }

    /// Split into the parent path and the final key.
    ///
    /// Returns `None` for the root path.
    pub fn split_last(&self) -> Option<(&[String], &String)> {
        self.components
            .split_last()
            .map(|(last, parent)| (parent, last))
    }

    /// The final key.
    pub fn last(&self) -> Option<&String> {
        self.components.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

impl From<&[&str]> for Path {
    fn from(keys: &[&str]) -> Self {
        Path::new(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(keys: [&str; N]) -> Self {
        Path::new(keys)
    }
}

impl From<Vec<String>> for Path {
    fn from(components: Vec<String>) -> Self {
        Path { components }
    }
}

/// Macro for building a path from literal keys.
///
/// # Example
///
/// ```rust
/// use freeform_core::path;
///
/// let p = path!("metadata", "labels", "app.kubernetes.io/name");
/// assert_eq!(p.len(), 3);
/// assert_eq!(&p[2], "app.kubernetes.io/name");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::Path::new([$($key),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_paths() {
        assert_eq!(Path::parse("").unwrap().len(), 0);
        assert_eq!(Path::parse("metadata").unwrap().len(), 1);
        assert_eq!(Path::parse("metadata.name").unwrap().len(), 2);
        assert_eq!(Path::parse("spec.template.spec").unwrap().len(), 3);
    }

    #[test]
    fn parse_rejects_empty_components() {
        assert_eq!(
            Path::parse("a..b"),
            Err(PathError::EmptyComponent { position: 1 })
        );
        assert!(Path::parse(".a").is_err());
        assert!(Path::parse("a.").is_err());
    }

    #[test]
    fn macro_keeps_dotted_keys_whole() {
        let p = path!("metadata", "annotations", "example.com/owner");
        assert_eq!(p.len(), 3);
        assert_eq!(p.last().unwrap(), "example.com/owner");
        assert_eq!(p.to_string(), "metadata.annotations.example.com/owner");
    }

    #[test]
    fn empty_macro_is_root() {
        let p: Path = path!();
        assert!(p.is_empty());
        assert_eq!(p.split_last(), None);
    }

    #[test]
    fn split_last_separates_parent() {
        let p = path!("a", "b", "c");
        let (parent, last) = p.split_last().unwrap();
        assert_eq!(parent, &["a".to_string(), "b".to_string()]);
        assert_eq!(last, "c");
    }

    #[test]
    fn join_and_child() {
        let p = path!("metadata");
        assert_eq!(p.child("name"), path!("metadata", "name"));
        assert_eq!(p.join(&path!("labels", "app")).len(), 3);
        assert_eq!(p.join(&Path::root()), p);
    }

    #[test]
    fn conversions() {
        let from_slice: Path = (&["a", "b"][..]).into();
        let from_array: Path = ["a", "b"].into();
        let from_vec: Path = vec!["a".to_string(), "b".to_string()].into();
        assert_eq!(from_slice, from_array);
        assert_eq!(from_array, from_vec);
    }

    #[test]
    fn index_trait() {
        let p = path!("foo", "bar");
        assert_eq!(&p[0], "foo");
        assert_eq!(&p[1], "bar");
    }

    #[test]
    fn path_error_display() {
        let err = PathError::EmptyComponent { position: 2 };
        assert!(err.to_string().contains("position 2"));
    }
}
