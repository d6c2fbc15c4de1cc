//! Reading and writing single paths
//!
//! Writes follow one ownership rule: containers that already exist along
//! the path are mutated in place, and every missing (or scalar) slot on the
//! way is replaced by a freshly allocated container. A `[n]` segment makes
//! a sequence, anything else makes a plain object. Writing past the end of
//! a sequence pads the gap with nulls.

use log::trace;

use crate::core::coerce::IntoArray;
use crate::core::errors::{Result, StoreError};
use crate::core::path::{normalize_path, NamePath, Segment};
use crate::core::value::{Instance, Value};

/// Read the value at `path`.
///
/// A null met before the path is exhausted is returned as-is; a missing
/// key, an out-of-range index or a scalar in the way yields `None`.
pub fn get_value<P: IntoArray<Segment>>(store: &Value, path: P) -> Option<&Value> {
    let path = normalize_path(path);
    let mut current = store;

    for segment in path.segments() {
        if current.is_null() {
            return Some(current);
        }
        current = child(current, segment)?;
    }

    Some(current)
}

/// Whether something is stored at exactly `path`
pub fn has_value<P: IntoArray<Segment>>(store: &Value, path: P) -> bool {
    let path = normalize_path(path);
    let mut current = store;

    for segment in path.segments() {
        match child(current, segment) {
            Some(next) => current = next,
            None => return false,
        }
    }

    true
}

fn child<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match node {
        Value::Array(items) => segment.as_index().and_then(|idx| items.get(idx)),
        _ => {
            let map = node.as_map()?;
            match segment {
                Segment::Key(key) => map.get(key.as_str()),
                Segment::Index(idx) => map.get(idx.to_string().as_str()),
            }
        }
    }
}

/// Write `value` at `path` inside `store`.
///
/// An empty path replaces the whole store.
pub fn set_value_in<P: IntoArray<Segment>>(store: &mut Value, path: P, value: Value) -> Result<()> {
    let path = normalize_path(path);
    check_shape(store, &path)?;

    trace!("set {} ({})", path, value.type_name());
    write_at(store, path.segments(), value);
    Ok(())
}

/// Write `value` at `path` and hand the store back.
///
/// The returned store is `store` itself, updated; with an empty path it
/// is `value`.
pub fn set_value<P: IntoArray<Segment>>(mut store: Value, path: P, value: Value) -> Result<Value> {
    set_value_in(&mut store, path, value)?;
    Ok(store)
}

/// Like [`set_value`], but leaves `store` untouched and returns an
/// independent copy
pub fn with_value<P: IntoArray<Segment>>(store: &Value, path: P, value: Value) -> Result<Value> {
    set_value(store.clone(), path, value)
}

/// Remove the entry at `path` and return it.
///
/// Removing a sequence element shifts the later elements down by one.
pub fn delete_value<P: IntoArray<Segment>>(store: &mut Value, path: P) -> Option<Value> {
    let path = normalize_path(path);
    let (last, parents) = match path.segments().split_last() {
        Some(split) => split,
        None => return Some(std::mem::take(store)),
    };

    let mut current = store;
    for segment in parents {
        current = child_mut(current, segment)?;
    }

    trace!("delete {}", path);
    match current {
        Value::Array(items) => match last.as_index() {
            Some(idx) if idx < items.len() => Some(items.remove(idx)),
            _ => None,
        },
        Value::Object(map) => map.shift_remove(last.to_key().as_str()),
        Value::Instance(instance) => instance.fields.shift_remove(last.to_key().as_str()),
        _ => None,
    }
}

pub(crate) fn child_mut<'a>(node: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match node {
        Value::Array(items) => segment.as_index().and_then(move |idx| items.get_mut(idx)),
        Value::Object(map) => map.get_mut(segment.to_key().as_str()),
        Value::Instance(instance) => instance.fields.get_mut(segment.to_key().as_str()),
        _ => None,
    }
}

/// How far past the end of a sequence a write may land. The gap is
/// padded with nulls, so larger jumps are rejected.
pub const MAX_INDEX_GAP: usize = 4096;

/// Fail when writing at `idx` would pad a sequence of `len` elements by
/// more than [`MAX_INDEX_GAP`]
pub(crate) fn check_gap(at: NamePath, idx: usize, len: usize) -> Result<()> {
    if idx > len.saturating_add(MAX_INDEX_GAP) {
        return Err(StoreError::shape(
            at,
            format!("index {} is too far past the end ({} elements)", idx, len),
        ));
    }
    Ok(())
}

/// Reject paths that would need a key inside an existing sequence, or an
/// index too far past the end of one.
///
/// Runs before any write so that a rejected path leaves the store as it
/// was.
fn check_shape(store: &Value, path: &NamePath) -> Result<()> {
    let mut current = Some(store);

    for (depth, segment) in path.segments().iter().enumerate() {
        let at = || NamePath::from_segments(path.segments()[..=depth].to_vec());

        current = match current {
            Some(Value::Array(items)) => {
                let idx = segment.as_index().ok_or_else(|| {
                    StoreError::shape(at(), format!("a sequence cannot hold key '{}'", segment.to_key()))
                })?;
                check_gap(at(), idx, items.len())?;
                items.get(idx)
            }
            Some(node) if node.as_map().is_some() => child(node, segment),
            // A fresh container is built here; only a sequence needs padding
            _ => {
                if let Segment::Index(idx) = segment {
                    check_gap(at(), *idx, 0)?;
                }
                None
            }
        };
    }

    Ok(())
}

fn write_at(node: &mut Value, segments: &[Segment], value: Value) {
    let (head, tail) = match segments.split_first() {
        Some(split) => split,
        None => {
            *node = value;
            return;
        }
    };

    if !node.is_container() {
        *node = if head.is_index() { Value::array() } else { Value::object() };
    }

    match node {
        Value::Array(items) => {
            if let Some(idx) = head.as_index() {
                if items.len() <= idx {
                    items.resize(idx + 1, Value::Null);
                }
                write_at(&mut items[idx], tail, value);
            }
        }
        Value::Object(map) | Value::Instance(Instance { fields: map, .. }) => {
            let slot = map.entry(head.to_key()).or_insert(Value::Null);
            write_at(slot, tail, value);
        }
        _ => {}
    }
}
