//! Patch merging
//!
//! Patches are folded into a store key by key. Two plain objects meeting
//! at the same key are merged recursively; in every other case the
//! incoming value replaces what was there, so sequences and instances are
//! swapped wholesale and never merged element by element.

use log::trace;

use crate::core::access::{check_gap, child_mut};
use crate::core::errors::{Result, StoreError};
use crate::core::path::{NamePath, Segment};
use crate::core::value::{Instance, Value};

/// Merge every patch into `store`, left to right, and return the store.
///
/// Later patches win on overlapping keys; no patches leaves the store as
/// it was.
pub fn set_values<I>(mut store: Value, patches: I) -> Result<Value>
where
    I: IntoIterator<Item = Value>,
{
    for patch in patches {
        merge_into(&mut store, patch)?;
    }
    Ok(store)
}

/// Merge one patch into `target` in place
pub fn merge_into(target: &mut Value, source: Value) -> Result<()> {
    let mut changed = Vec::new();
    merge_recorded(target, source, &NamePath::new(), &mut changed)
}

/// Merge `source` into `target`, appending every path that received a new
/// value to `changed`.
///
/// A falsy source changes nothing. A target that is not a container is
/// replaced by an empty one of the source's kind. Only a key merged into
/// an existing sequence, or an index too far past its end, can fail, and
/// that is checked before anything is written.
pub(crate) fn merge_recorded(
    target: &mut Value,
    source: Value,
    at: &NamePath,
    changed: &mut Vec<NamePath>,
) -> Result<()> {
    if !source.is_truthy() {
        return Ok(());
    }

    let entries = entries(source);
    if entries.is_empty() {
        return Ok(());
    }

    if let Value::Array(items) = target {
        for (segment, _) in &entries {
            match segment.as_index() {
                Some(idx) => check_gap(at.child(segment.clone()), idx, items.len())?,
                None => {
                    return Err(StoreError::shape(
                        at.child(segment.clone()),
                        "a sequence cannot be merged with keyed fields",
                    ))
                }
            }
        }
    }

    if !target.is_container() {
        *target = if entries[0].0.is_index() { Value::array() } else { Value::object() };
    }

    for (segment, incoming) in entries {
        let path = at.child(segment.clone());

        if incoming.is_plain_object() {
            if let Some(prev) = child_mut(target, &segment) {
                if prev.is_plain_object() {
                    merge_recorded(prev, incoming, &path, changed)?;
                    continue;
                }
            }
        }

        trace!("merge assigns {}", path);
        assign(target, &segment, incoming);
        changed.push(path);
    }

    Ok(())
}

fn entries(source: Value) -> Vec<(Segment, Value)> {
    match source {
        Value::Object(map) | Value::Instance(Instance { fields: map, .. }) => map
            .into_iter()
            .map(|(key, value)| (Segment::Key(key), value))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, value)| (Segment::Index(idx), value))
            .collect(),
        _ => Vec::new(),
    }
}

fn assign(target: &mut Value, segment: &Segment, value: Value) {
    match target {
        Value::Array(items) => {
            if let Some(idx) = segment.as_index() {
                if items.len() <= idx {
                    items.resize(idx + 1, Value::Null);
                }
                items[idx] = value;
            }
        }
        Value::Object(map) | Value::Instance(Instance { fields: map, .. }) => {
            map.insert(segment.to_key(), value);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name_path;
    use serde_json::json;

    fn store(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_merge_nested_objects() {
        let result = set_values(
            store(json!({"a": 1, "b": {"c": 2}})),
            vec![store(json!({"a": 4, "b": {"d": 5}}))],
        )
        .unwrap();

        assert_eq!(result, store(json!({"a": 4, "b": {"c": 2, "d": 5}})));
    }

    #[test]
    fn test_merge_replaces_arrays() {
        let result = set_values(store(json!({"a": [1, 2, 3]})), vec![store(json!({"a": [9]}))]).unwrap();
        assert_eq!(result, store(json!({"a": [9]})));
    }

    #[test]
    fn test_merge_replaces_instances() {
        let date = Value::from(Instance::new("Date").with_field("ts", 1));
        let mut patch = crate::core::value::Map::new();
        patch.insert("when".to_string(), Value::from(Instance::new("Date").with_field("ts", 2)));

        let mut target = crate::core::value::Map::new();
        target.insert("when".to_string(), date);

        let result = set_values(Value::Object(target), vec![Value::Object(patch.clone())]).unwrap();
        assert_eq!(result, Value::Object(patch));
    }

    #[test]
    fn test_later_patches_win() {
        let result = set_values(
            store(json!({"a": 1})),
            vec![store(json!({"a": 2, "b": 1})), store(json!({"a": 3}))],
        )
        .unwrap();

        assert_eq!(result, store(json!({"a": 3, "b": 1})));
    }

    #[test]
    fn test_no_patches_is_noop() {
        let data = store(json!({"a": {"b": 1}}));
        let result = set_values(data.clone(), Vec::new()).unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_falsy_patches_are_ignored() {
        let data = store(json!({"a": 1}));
        let result = set_values(data.clone(), vec![Value::Null, Value::from(false), Value::from("")]).unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_merge_keeps_key_order() {
        let result = set_values(store(json!({"x": 1, "y": 2})), vec![store(json!({"z": 3, "x": 0}))]).unwrap();
        let keys: Vec<_> = result.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_merge_into_empty_store() {
        let result = set_values(Value::Null, vec![store(json!({"a": {"b": 1}}))]).unwrap();
        assert_eq!(result, store(json!({"a": {"b": 1}})));
    }

    #[test]
    fn test_merge_object_over_scalar() {
        let result = set_values(store(json!({"a": 1})), vec![store(json!({"a": {"b": 2}}))]).unwrap();
        assert_eq!(result, store(json!({"a": {"b": 2}})));
    }

    #[test]
    fn test_merge_records_assigned_paths() {
        let mut target = store(json!({"a": 1, "b": {"c": 2}}));
        let mut changed = Vec::new();

        merge_recorded(
            &mut target,
            store(json!({"a": 4, "b": {"d": 5, "e": [1]}})),
            &NamePath::new(),
            &mut changed,
        )
        .unwrap();

        assert_eq!(
            changed,
            vec![name_path!["a"], name_path!["b", "d"], name_path!["b", "e"]]
        );
    }

    #[test]
    fn test_keyed_patch_into_sequence_fails_cleanly() {
        let mut target = store(json!([1, 2]));
        let err = merge_into(&mut target, store(json!({"0": 5, "name": "x"}))).unwrap_err();

        assert!(matches!(err, StoreError::InvalidStoreShape { .. }));
        assert_eq!(target, store(json!([1, 2])));
    }

    #[test]
    fn test_huge_numeric_key_into_sequence_fails_cleanly() {
        let result = set_values(store(json!([1])), vec![store(json!({"18446744073709551615": 2}))]);
        assert!(matches!(result, Err(StoreError::InvalidStoreShape { .. })));

        let mut target = store(json!([1]));
        let err = merge_into(&mut target, store(json!({"0": 7, "99999": 2}))).unwrap_err();
        assert!(matches!(err, StoreError::InvalidStoreShape { ref path, .. } if *path == name_path!["99999"]));
        assert_eq!(target, store(json!([1])));
    }

    #[test]
    fn test_numeric_keys_merge_into_sequence() {
        let mut target = store(json!([1, 2]));
        merge_into(&mut target, store(json!({"1": 5}))).unwrap();
        assert_eq!(target, store(json!([1, 5])));
    }
}
