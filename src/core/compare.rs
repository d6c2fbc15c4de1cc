//! Cheap similarity check between two values
//!
//! Only one level is compared. Nested containers count as equal only when
//! they are the very same node, and any two callbacks count as equal so
//! that re-created handlers do not register as a change.

use std::collections::{HashMap, HashSet};
use std::ptr;

use crate::core::value::Value;

/// Shallow, callback-tolerant comparison of two optional values
pub fn is_similar(source: Option<&Value>, target: Option<&Value>) -> bool {
    let (source, target) = match (source, target) {
        (None, None) => return true,
        (Some(source), Some(target)) => (source, target),
        _ => return false,
    };

    if identical(source, target) {
        return true;
    }
    if source.is_truthy() != target.is_truthy() {
        return false;
    }

    let (source_fields, target_fields) = match (fields(source), fields(target)) {
        (Some(s), Some(t)) => (s, t),
        _ => return false,
    };

    let keys: HashSet<&str> = source_fields
        .keys()
        .chain(target_fields.keys())
        .map(String::as_str)
        .collect();

    keys.into_iter().all(|key| {
        match (source_fields.get(key), target_fields.get(key)) {
            (Some(Value::Function(_)), Some(Value::Function(_))) => true,
            (Some(a), Some(b)) => identical(a, b),
            _ => false,
        }
    })
}

/// First-level entries of a container keyed the way a mapping would see
/// them (sequence positions become `"0"`, `"1"`, ...)
fn fields(value: &Value) -> Option<HashMap<String, &Value>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx.to_string(), item))
                .collect(),
        ),
        _ => value
            .as_map()
            .map(|map| map.iter().map(|(key, item)| (key.clone(), item)).collect()),
    }
}

/// Strict identity: scalars compare by value, callbacks and containers by
/// address
fn identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Integer(x), Value::Float(y)) | (Value::Float(y), Value::Integer(x)) => *x as f64 == *y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => x == y,
        _ if a.is_container() && b.is_container() => ptr::eq(a, b),
        _ => false,
    }
}
