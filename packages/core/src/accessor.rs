//! Nested field access over schema-less maps.
//!
//! Every getter here is total: a missing key, a non-map intermediate value,
//! or a leaf of the wrong type all read as absence. The typed getters turn
//! absence into the type's zero value, so they cannot tell "missing" from
//! "present but wrong type" from "present and zero". Use [`nested_field`] or
//! one of the `_opt` getters when that difference matters.
//!
//! In particular [`nested_string_list`] returns an empty list both for a
//! missing path and for an explicit `[]`. Callers rely on that collapse, so
//! it is kept.

use indexmap::IndexMap;

use crate::{Map, Path, Value};

/// String-to-string map, as used for labels and annotations.
pub type StringMap = IndexMap<String, String>;

/// Borrow the value at `path`.
///
/// Returns `None` for the empty path, for a missing key, or when an
/// intermediate value is not a map.
pub fn nested_field<'a>(obj: &'a Map, path: &Path) -> Option<&'a Value> {
    let (first, rest) = path.components.split_first()?;
    let mut current = obj.get(first)?;
    for key in rest {
        current = current.as_map()?.get(key)?;
    }
    Some(current)
}

/// Mutably borrow the value at `path`.
pub fn nested_field_mut<'a>(obj: &'a mut Map, path: &Path) -> Option<&'a mut Value> {
    let (first, rest) = path.components.split_first()?;
    let mut current = obj.get_mut(first)?;
    for key in rest {
        current = current.as_map_mut()?.get_mut(key)?;
    }
    Some(current)
}

/// Clone the value at `path`.
pub fn nested_field_cloned(obj: &Map, path: &Path) -> Option<Value> {
    nested_field(obj, path).cloned()
}

/// The string at `path`, or `""`.
pub fn nested_string(obj: &Map, path: &Path) -> String {
    nested_string_opt(obj, path)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// The string at `path`, if present and a string.
pub fn nested_string_opt<'a>(obj: &'a Map, path: &Path) -> Option<&'a str> {
    nested_field(obj, path).and_then(Value::as_str)
}

/// The boolean at `path`, or `false`.
pub fn nested_bool(obj: &Map, path: &Path) -> bool {
    nested_bool_opt(obj, path).unwrap_or_default()
}

/// The boolean at `path`, if present and a boolean.
pub fn nested_bool_opt(obj: &Map, path: &Path) -> Option<bool> {
    nested_field(obj, path).and_then(Value::as_bool)
}

/// The integer at `path`, or `0`.
pub fn nested_int64(obj: &Map, path: &Path) -> i64 {
    nested_int64_opt(obj, path).unwrap_or_default()
}

/// The integer at `path`, if present and an integer.
///
/// Keeps "unset" distinct from an explicit `0`.
pub fn nested_int64_opt(obj: &Map, path: &Path) -> Option<i64> {
    nested_field(obj, path).and_then(Value::as_i64)
}

/// The number at `path` as a float, or `0.0`. Integers are widened.
pub fn nested_float64(obj: &Map, path: &Path) -> f64 {
    nested_field(obj, path)
        .and_then(Value::as_f64)
        .unwrap_or_default()
}

/// The strings in the list at `path`.
///
/// Non-string elements are skipped. Empty when the path is missing or the
/// value is not a list.
pub fn nested_string_list(obj: &Map, path: &Path) -> Vec<String> {
    nested_slice(obj, path)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// The string-valued entries of the map at `path`.
///
/// Entries whose value is not a string are skipped. Empty when the path is
/// missing or the value is not a map.
pub fn nested_string_map(obj: &Map, path: &Path) -> StringMap {
    nested_map(obj, path)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_owned())))
                .collect()
        })
        .unwrap_or_default()
}

/// Borrow the list at `path`.
pub fn nested_slice<'a>(obj: &'a Map, path: &Path) -> Option<&'a Vec<Value>> {
    nested_field(obj, path).and_then(Value::as_array)
}

/// Borrow the map at `path`.
pub fn nested_map<'a>(obj: &'a Map, path: &Path) -> Option<&'a Map> {
    nested_field(obj, path).and_then(Value::as_map)
}

/// Mutably borrow the map at `path`.
pub fn nested_map_mut<'a>(obj: &'a mut Map, path: &Path) -> Option<&'a mut Map> {
    nested_field_mut(obj, path).and_then(Value::as_map_mut)
}

/// Set `value` at `path`, creating intermediate maps as needed.
///
/// A non-map value sitting where an intermediate map is needed is replaced.
/// The final key takes `value` whatever it held before. The empty path
/// leaves `obj` unchanged.
pub fn set_nested_field(obj: &mut Map, value: impl Into<Value>, path: &Path) {
    let Some((parents, last)) = path.split_last() else {
        return;
    };

    let mut current = obj;
    for key in parents {
        let slot = current
            .entry(key.clone())
            .and_modify(|v| {
                if !v.is_map() {
                    *v = Value::map();
                }
            })
            .or_insert_with(Value::map);
        let Value::Map(map) = slot else {
            return;
        };
        current = map;
    }
    current.insert(last.clone(), value.into());
}

/// Set a list of strings at `path`.
pub fn set_nested_string_list<I, S>(obj: &mut Map, values: I, path: &Path)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: Vec<Value> = values
        .into_iter()
        .map(|s| Value::String(s.into()))
        .collect();
    set_nested_field(obj, Value::Array(items), path);
}

/// Set a string-valued map at `path`.
pub fn set_nested_string_map<I, K, V>(obj: &mut Map, values: I, path: &Path)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map: Map = values
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect();
    set_nested_field(obj, Value::Map(map), path);
}

/// Set a list at `path`.
pub fn set_nested_slice(obj: &mut Map, values: Vec<Value>, path: &Path) {
    set_nested_field(obj, Value::Array(values), path);
}

/// Set a map at `path`.
pub fn set_nested_map(obj: &mut Map, value: Map, path: &Path) {
    set_nested_field(obj, Value::Map(value), path);
}

/// Remove the value at `path`, returning it if it existed.
///
/// Sibling keys keep their order.
pub fn remove_nested_field(obj: &mut Map, path: &Path) -> Option<Value> {
    let (parents, last) = path.split_last()?;
    let parent = if parents.is_empty() {
        obj
    } else {
        nested_map_mut(obj, &Path::new(parents.iter().cloned()))?
    };
    parent.shift_remove(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    fn record() -> Map {
        let mut obj = Map::new();
        set_nested_field(&mut obj, "Widget", &path!("kind"));
        set_nested_field(&mut obj, "w1", &path!("metadata", "name"));
        set_nested_field(&mut obj, 3i64, &path!("spec", "replicas"));
        set_nested_field(&mut obj, 0.5, &path!("spec", "ratio"));
        set_nested_field(&mut obj, true, &path!("spec", "paused"));
        set_nested_string_list(&mut obj, ["a", "b"], &path!("spec", "tags"));
        set_nested_string_map(&mut obj, [("app", "web")], &path!("metadata", "labels"));
        obj
    }

    // ==================== get ====================

    #[test]
    fn get_descends_through_maps() {
        let obj = record();
        assert_eq!(
            nested_field(&obj, &path!("metadata", "name")),
            Some(&Value::from("w1"))
        );
        assert!(nested_field(&obj, &path!("metadata")).unwrap().is_map());
    }

    #[test]
    fn get_is_absent_for_missing_or_blocked_paths() {
        let obj = record();
        assert_eq!(nested_field(&obj, &path!("missing")), None);
        assert_eq!(nested_field(&obj, &path!("metadata", "missing")), None);
        // "kind" is a string, so nothing can be below it
        assert_eq!(nested_field(&obj, &path!("kind", "deeper")), None);
        // lists are not indexed
        assert_eq!(nested_field(&obj, &path!("spec", "tags", "0")), None);
        assert_eq!(nested_field(&obj, &path!()), None);
    }

    #[test]
    fn typed_getters_read_matching_leaves() {
        let obj = record();
        assert_eq!(nested_string(&obj, &path!("kind")), "Widget");
        assert_eq!(nested_int64(&obj, &path!("spec", "replicas")), 3);
        assert_eq!(nested_float64(&obj, &path!("spec", "ratio")), 0.5);
        assert_eq!(nested_float64(&obj, &path!("spec", "replicas")), 3.0);
        assert!(nested_bool(&obj, &path!("spec", "paused")));
        assert_eq!(nested_string_list(&obj, &path!("spec", "tags")), vec!["a", "b"]);
        assert_eq!(
            nested_string_map(&obj, &path!("metadata", "labels")).get("app"),
            Some(&"web".to_string())
        );
    }

    #[test]
    fn typed_getters_return_zero_values_on_mismatch() {
        let obj = record();
        assert_eq!(nested_string(&obj, &path!("spec", "replicas")), "");
        assert_eq!(nested_int64(&obj, &path!("kind")), 0);
        assert_eq!(nested_int64(&obj, &path!("spec", "ratio")), 0);
        assert!(!nested_bool(&obj, &path!("kind")));
        assert!(nested_string_list(&obj, &path!("kind")).is_empty());
        assert!(nested_string_map(&obj, &path!("spec")).is_empty());
    }

    #[test]
    fn string_list_absent_and_empty_are_indistinguishable() {
        let mut obj = Map::new();
        let missing = nested_string_list(&obj, &path!("spec", "tags"));

        set_nested_string_list(&mut obj, Vec::<String>::new(), &path!("spec", "tags"));
        let explicit = nested_string_list(&obj, &path!("spec", "tags"));

        assert_eq!(missing, explicit);
        // Only the untyped getter can tell them apart
        assert!(nested_field(&obj, &path!("spec", "tags")).is_some());
    }

    #[test]
    fn string_list_skips_non_string_elements() {
        let mut obj = Map::new();
        set_nested_slice(
            &mut obj,
            vec![Value::from("a"), Value::from(1i64), Value::from("b")],
            &path!("tags"),
        );
        assert_eq!(nested_string_list(&obj, &path!("tags")), vec!["a", "b"]);
    }

    #[test]
    fn string_map_skips_non_string_values() {
        let mut labels = Map::new();
        labels.insert("app".to_string(), Value::from("web"));
        labels.insert("n".to_string(), Value::from(2i64));
        labels.insert("tier".to_string(), Value::from("front"));
        let mut obj = Map::new();
        set_nested_map(&mut obj, labels, &path!("metadata", "labels"));

        let got = nested_string_map(&obj, &path!("metadata", "labels"));
        assert_eq!(got.len(), 2);
        assert_eq!(got["app"], "web");
        assert_eq!(got["tier"], "front");
    }

    #[test]
    fn optional_int_keeps_unset_distinct_from_zero() {
        let mut obj = Map::new();
        let grace = path!("metadata", "deletionGracePeriodSeconds");
        assert_eq!(nested_int64_opt(&obj, &grace), None);

        set_nested_field(&mut obj, 0i64, &grace);
        assert_eq!(nested_int64_opt(&obj, &grace), Some(0));
    }

    // ==================== set ====================

    #[test]
    fn set_creates_intermediate_maps() {
        let mut obj = Map::new();
        set_nested_field(&mut obj, 42i64, &path!("a", "b", "c", "d"));

        assert_eq!(nested_int64(&obj, &path!("a", "b", "c", "d")), 42);
        assert!(nested_map(&obj, &path!("a", "b")).is_some());
    }

    #[test]
    fn set_overwrites_non_map_intermediates() {
        let mut obj = record();
        set_nested_field(&mut obj, "x", &path!("kind", "nested"));
        assert_eq!(nested_string(&obj, &path!("kind", "nested")), "x");
    }

    #[test]
    fn set_replaces_final_value_including_type() {
        let mut obj = record();
        set_nested_field(&mut obj, "three", &path!("spec", "replicas"));
        assert_eq!(nested_string(&obj, &path!("spec", "replicas")), "three");
    }

    #[test]
    fn set_on_empty_path_is_noop() {
        let mut obj = record();
        let before = obj.clone();
        set_nested_field(&mut obj, "x", &path!());
        assert_eq!(obj, before);
    }

    #[test]
    fn set_keeps_existing_key_position() {
        let mut obj = record();
        set_nested_field(&mut obj, "Gadget", &path!("kind"));
        assert_eq!(obj.keys().next().map(String::as_str), Some("kind"));
    }

    // ==================== remove ====================

    #[test]
    fn remove_returns_old_value() {
        let mut obj = record();
        let removed = remove_nested_field(&mut obj, &path!("metadata", "name"));
        assert_eq!(removed, Some(Value::from("w1")));
        assert_eq!(nested_field(&obj, &path!("metadata", "name")), None);
        assert!(nested_map(&obj, &path!("metadata")).is_some());
    }

    #[test]
    fn remove_top_level_and_missing() {
        let mut obj = record();
        assert!(remove_nested_field(&mut obj, &path!("kind")).is_some());
        assert_eq!(remove_nested_field(&mut obj, &path!("kind")), None);
        assert_eq!(remove_nested_field(&mut obj, &path!("nope", "deeper")), None);
        assert_eq!(remove_nested_field(&mut obj, &path!()), None);
    }

    #[test]
    fn mutable_access_edits_in_place() {
        let mut obj = record();
        if let Some(Value::Integer(n)) = nested_field_mut(&mut obj, &path!("spec", "replicas")) {
            *n += 1;
        }
        assert_eq!(nested_int64(&obj, &path!("spec", "replicas")), 4);
        assert_eq!(
            nested_field_cloned(&obj, &path!("spec", "replicas")),
            Some(Value::from(4i64))
        );
    }
}
