//! Scalar-or-sequence coercion
//!
//! Callers may hand over nothing, a single item or a whole sequence; the
//! rest of the crate only ever wants a sequence.

/// Conversion of "none, one or many" into a `Vec`
pub trait IntoArray<T> {
    fn into_array(self) -> Vec<T>;
}

impl<T> IntoArray<T> for Vec<T> {
    fn into_array(self) -> Vec<T> {
        self
    }
}

impl<T: Clone> IntoArray<T> for &Vec<T> {
    fn into_array(self) -> Vec<T> {
        self.clone()
    }
}

impl<T: Clone> IntoArray<T> for &[T] {
    fn into_array(self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T, const N: usize> IntoArray<T> for [T; N] {
    fn into_array(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<T> IntoArray<T> for Option<T> {
    fn into_array(self) -> Vec<T> {
        match self {
            Some(item) => vec![item],
            None => Vec::new(),
        }
    }
}

/// Normalize any accepted input into a sequence
pub fn to_array<T, I: IntoArray<T>>(input: I) -> Vec<T> {
    input.into_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_becomes_empty() {
        let items: Vec<u8> = to_array(None);
        assert!(items.is_empty());
    }

    #[test]
    fn test_single_item_is_wrapped() {
        assert_eq!(to_array(Some(7)), vec![7]);
    }

    #[test]
    fn test_sequences_pass_through() {
        assert_eq!(to_array(vec![1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(to_array([4, 5]), vec![4, 5]);

        let borrowed = vec!["a", "b"];
        assert_eq!(to_array(&borrowed), vec!["a", "b"]);
        assert_eq!(to_array(&borrowed[1..]), vec!["b"]);
    }
}
