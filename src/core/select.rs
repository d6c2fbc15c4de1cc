//! Partial copies and endpoint listing
//!
//! `clone_by_name_path_list` rebuilds a store from a chosen set of
//! endpoints; `leaf_paths` goes the other way and flattens a store into
//! its endpoints.

use log::trace;

use crate::core::access::{get_value, set_value_in};
use crate::core::errors::Result;
use crate::core::path::NamePath;
use crate::core::value::Value;

/// Build a new store holding only the values found at `paths`.
///
/// Paths are copied in order, so a repeated path keeps its last value.
/// A path with nothing stored at it is skipped and leaves no intermediate
/// containers behind.
pub fn clone_by_name_path_list(store: &Value, paths: &[NamePath]) -> Result<Value> {
    let mut picked = Value::object();

    for path in paths {
        match get_value(store, path) {
            Some(value) => set_value_in(&mut picked, path, value.clone())?,
            None => trace!("pick skipped missing {}", path),
        }
    }

    Ok(picked)
}

/// Every endpoint of `store` with its path, in store order.
///
/// Scalars, callbacks and empty containers are endpoints; non-empty
/// containers are walked into.
pub fn leaf_paths(store: &Value) -> Vec<(NamePath, &Value)> {
    let mut endpoints = Vec::new();
    collect_leaves(store, NamePath::new(), &mut endpoints);
    endpoints
}

fn collect_leaves<'a>(node: &'a Value, at: NamePath, out: &mut Vec<(NamePath, &'a Value)>) {
    match node {
        Value::Array(items) if !items.is_empty() => {
            for (idx, item) in items.iter().enumerate() {
                collect_leaves(item, at.child(idx), out);
            }
        }
        _ => match node.as_map() {
            Some(map) if !map.is_empty() => {
                for (key, value) in map {
                    collect_leaves(value, at.child(key.as_str()), out);
                }
            }
            _ => out.push((at, node)),
        },
    }
}
