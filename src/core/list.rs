//! Reordering sequence elements

use std::borrow::Cow;

use log::trace;

use crate::core::access::{get_value, set_value_in};
use crate::core::coerce::IntoArray;
use crate::core::errors::{Result, StoreError};
use crate::core::path::{normalize_path, Segment};
use crate::core::value::Value;

/// Return `array` with the element at `from` relocated to `to`.
///
/// Out-of-range positions, negative ones included, and `from == to`
/// hand back the input untouched (borrowed). The input is never mutated.
pub fn move_item<T: Clone>(array: &[T], from: isize, to: isize) -> Cow<'_, [T]> {
    let len = array.len() as isize;
    if from < 0 || from >= len || to < 0 || to >= len || from == to {
        return Cow::Borrowed(array);
    }

    let (from, to) = (from as usize, to as usize);
    let mut moved = array.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Cow::Owned(moved)
}

/// Apply [`move_item`] to the sequence stored at `path`.
///
/// Returns whether the sequence changed. Anything other than a sequence
/// at `path` is `InvalidStoreShape`.
pub fn move_value_at<P: IntoArray<Segment>>(store: &mut Value, path: P, from: isize, to: isize) -> Result<bool> {
    let path = normalize_path(path);

    let reordered = match get_value(store, &path) {
        Some(Value::Array(items)) => match move_item(items, from, to) {
            Cow::Owned(items) => items,
            Cow::Borrowed(_) => return Ok(false),
        },
        Some(other) => {
            return Err(StoreError::shape(path, format!("expected a sequence, found {}", other.type_name())))
        }
        None => return Err(StoreError::shape(path, "nothing stored here")),
    };

    trace!("move {} {} -> {}", path, from, to);
    set_value_in(store, &path, Value::Array(reordered))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name_path;
    use serde_json::json;

    #[test]
    fn test_move_right() {
        assert_eq!(move_item(&[1, 2, 3, 4], 1, 3).as_ref(), &[1, 3, 4, 2]);
    }

    #[test]
    fn test_move_left() {
        assert_eq!(move_item(&[1, 2, 3, 4], 3, 0).as_ref(), &[4, 1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_is_unchanged() {
        let array = [1, 2, 3];
        assert!(matches!(move_item(&array, -1, 0), Cow::Borrowed(_)));
        assert!(matches!(move_item(&array, 0, 3), Cow::Borrowed(_)));
        assert_eq!(move_item(&array, -1, 0).as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn test_same_position_is_unchanged() {
        let array = vec!["a", "b", "c"];
        match move_item(&array, 2, 2) {
            Cow::Borrowed(same) => assert!(std::ptr::eq(same, array.as_slice())),
            Cow::Owned(_) => panic!("expected the input back"),
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let array = vec![1, 2, 3];
        let moved = move_item(&array, 0, 2);
        assert_eq!(moved.as_ref(), &[2, 3, 1]);
        assert_eq!(array, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_value_at() {
        let mut data = Value::from(json!({"list": ["a", "b", "c"]}));

        assert!(move_value_at(&mut data, "list", 0, 2).unwrap());
        assert_eq!(data, Value::from(json!({"list": ["b", "c", "a"]})));

        assert!(!move_value_at(&mut data, "list", 5, 0).unwrap());
        assert!(move_value_at(&mut data, name_path!["missing"], 0, 1).is_err());
        assert!(move_value_at(&mut data, name_path!["list", 0], 0, 1).is_err());
    }
}
