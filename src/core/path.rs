//! Path module for formpath
//!
//! A `NamePath` addresses one location inside a nested store. Each
//! segment is either a mapping key or a sequence index, and the two never
//! compare equal to each other: `[0]` and `["0"]` are different paths.

use std::fmt;
use std::str::FromStr;

use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::coerce::IntoArray;

#[derive(Parser)]
#[grammar = "core/path.pest"]
struct NamePathParser;

/// Errors that can occur when parsing paths
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Invalid path format: {0}")]
    InvalidFormat(String),
    #[error("Index out of range: {0}")]
    IndexOverflow(String),
}

/// A segment in a path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl Segment {
    /// Whether a fresh container built for this segment is a sequence
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// The key used when this segment addresses a mapping
    pub fn to_key(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(idx) => idx.to_string(),
        }
    }

    /// The index used when this segment addresses a sequence.
    ///
    /// Keys only qualify when they are written the way an index prints
    /// (`"3"`, never `"03"` or `"+3"`).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(idx) => Some(*idx),
            Segment::Key(key) => {
                let canonical = key == "0" || (!key.starts_with('0') && !key.is_empty());
                if canonical && key.bytes().all(|b| b.is_ascii_digit()) {
                    key.parse().ok()
                } else {
                    None
                }
            }
        }
    }

    fn is_plain_key(key: &str) -> bool {
        !key.is_empty()
            && !key.contains(|c| matches!(c, '.' | '[' | ']' | '"' | '\\'))
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(idx) => write!(f, "[{}]", idx),
            Segment::Key(key) if Segment::is_plain_key(key) => write!(f, "{}", key),
            Segment::Key(key) => {
                let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
                write!(f, "[\"{}\"]", escaped)
            }
        }
    }
}

/// A path into a store (e.g., `user.tags[0].label`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamePath {
    segments: Vec<Segment>,
}

impl NamePath {
    /// Create a new empty path (the store root)
    pub fn new() -> Self {
        NamePath { segments: Vec::new() }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        NamePath { segments }
    }

    /// Add a segment to the path
    pub fn push<S: Into<Segment>>(&mut self, segment: S) {
        self.segments.push(segment.into());
    }

    /// A new path extended by one segment
    pub fn child<S: Into<Segment>>(&self, segment: S) -> NamePath {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Check if this path starts with the given prefix path
    pub fn starts_with(&self, prefix: &NamePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl FromStr for NamePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = NamePathParser::parse(Rule::path, s)
            .map_err(|e| PathError::InvalidFormat(e.to_string()))?;
        let root = pairs
            .next()
            .ok_or_else(|| PathError::InvalidFormat(s.to_string()))?;

        let mut segments = Vec::new();
        for pair in root.into_inner() {
            match pair.as_rule() {
                Rule::key => segments.push(Segment::Key(pair.as_str().to_string())),
                Rule::index => {
                    let digits = pair.into_inner().as_str();
                    let idx = digits
                        .parse::<usize>()
                        .map_err(|_| PathError::IndexOverflow(digits.to_string()))?;
                    segments.push(Segment::Index(idx));
                }
                Rule::quoted => {
                    let raw = pair.into_inner().as_str();
                    segments.push(Segment::Key(unescape(raw)));
                }
                _ => {}
            }
        }

        Ok(NamePath { segments })
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Format a NamePath with dot separators and bracketed indices
impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                if let Segment::Key(key) = segment {
                    if Segment::is_plain_key(key) {
                        write!(f, ".")?;
                    }
                }
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for NamePath {
    fn from(segments: Vec<Segment>) -> Self {
        NamePath::from_segments(segments)
    }
}

// A bare key or index is a one-segment path; `()` is no path at all.

impl IntoArray<Segment> for () {
    fn into_array(self) -> Vec<Segment> {
        Vec::new()
    }
}

impl IntoArray<Segment> for Segment {
    fn into_array(self) -> Vec<Segment> {
        vec![self]
    }
}

impl IntoArray<Segment> for &str {
    fn into_array(self) -> Vec<Segment> {
        vec![Segment::from(self)]
    }
}

impl IntoArray<Segment> for String {
    fn into_array(self) -> Vec<Segment> {
        vec![Segment::Key(self)]
    }
}

impl IntoArray<Segment> for usize {
    fn into_array(self) -> Vec<Segment> {
        vec![Segment::Index(self)]
    }
}

impl IntoArray<Segment> for Vec<&str> {
    fn into_array(self) -> Vec<Segment> {
        self.into_iter().map(Segment::from).collect()
    }
}

impl IntoArray<Segment> for NamePath {
    fn into_array(self) -> Vec<Segment> {
        self.segments
    }
}

impl IntoArray<Segment> for &NamePath {
    fn into_array(self) -> Vec<Segment> {
        self.segments.clone()
    }
}

/// Normalize a bare segment, a sequence or nothing into a path
pub fn normalize_path<P: IntoArray<Segment>>(path: P) -> NamePath {
    NamePath::from_segments(path.into_array())
}

/// Strict, segment-wise equality; an absent path never matches
pub fn match_name_path<'a, A, B>(path: A, other: B) -> bool
where
    A: Into<Option<&'a NamePath>>,
    B: Into<Option<&'a NamePath>>,
{
    match (path.into(), other.into()) {
        (Some(path), Some(other)) => path == other,
        _ => false,
    }
}

/// Whether `list` holds a path equal to `path`
pub fn contains_name_path(list: &[NamePath], path: &NamePath) -> bool {
    list.iter().any(|candidate| match_name_path(candidate, path))
}

/// Whether `list` holds `path` itself or one of its ancestors
pub fn contains_name_path_partial(list: &[NamePath], path: &NamePath) -> bool {
    list.iter().any(|candidate| path.starts_with(candidate))
}

/// Build a [`NamePath`] from keys and indices: `name_path!["tags", 0]`
#[macro_export]
macro_rules! name_path {
    () => {
        $crate::core::path::NamePath::new()
    };
    ($($seg:expr),+ $(,)?) => {
        $crate::core::path::NamePath::from_segments(vec![
            $($crate::core::path::Segment::from($seg)),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parsing() {
        let path = "user.tags[0].label".parse::<NamePath>().unwrap();
        assert_eq!(path, name_path!["user", "tags", 0, "label"]);
    }

    #[test]
    fn test_quoted_keys_keep_dots() {
        let path: NamePath = r#"items["a.b"][2]"#.parse().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segment(1), Some(&Segment::Key("a.b".to_string())));
        assert_eq!(path.segment(2), Some(&Segment::Index(2)));
    }

    #[test]
    fn test_empty_string_is_root() {
        let path: NamePath = "".parse().unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_invalid_paths() {
        assert!(matches!("a..b".parse::<NamePath>(), Err(PathError::InvalidFormat(_))));
        assert!(matches!("a[".parse::<NamePath>(), Err(PathError::InvalidFormat(_))));
        assert!(matches!(
            "a[99999999999999999999999]".parse::<NamePath>(),
            Err(PathError::IndexOverflow(_))
        ));
    }

    #[test]
    fn test_path_formatting() {
        let mut path = NamePath::new();
        path.push("user");
        path.push("tags");
        path.push(0);
        path.push("a.b");

        assert_eq!(path.to_string(), r#"user.tags[0]["a.b"]"#);
        let reparsed: NamePath = path.to_string().parse().unwrap();
        assert_eq!(reparsed, path);
    }

    #[test]
    fn test_normalize_path() {
        assert!(normalize_path(()).is_empty());
        assert!(normalize_path(None::<Segment>).is_empty());
        assert_eq!(normalize_path("name"), name_path!["name"]);
        assert_eq!(normalize_path(3usize), name_path![3]);
        assert_eq!(normalize_path(vec!["a", "b"]), name_path!["a", "b"]);

        let path = name_path!["list", 1];
        assert_eq!(normalize_path(&path), path);
    }

    #[test]
    fn test_match_name_path() {
        assert!(match_name_path(&name_path!["a", 0], &name_path!["a", 0]));
        assert!(!match_name_path(&name_path!["a", 0], &name_path!["a", "0"]));
        assert!(!match_name_path(&name_path!["a"], &name_path!["a", "b"]));
        assert!(!match_name_path(None::<&NamePath>, &name_path!["a"]));
        assert!(!match_name_path(&name_path!["a"], None::<&NamePath>));
    }

    #[test]
    fn test_contains_name_path() {
        let list = vec![name_path!["user", "name"], name_path!["tags", 1]];

        assert!(contains_name_path(&list, &name_path!["tags", 1]));
        assert!(!contains_name_path(&list, &name_path!["tags"]));
        assert!(!contains_name_path(&[], &name_path!["tags", 1]));
    }

    #[test]
    fn test_contains_name_path_partial() {
        let list = vec![name_path!["user"]];

        assert!(contains_name_path_partial(&list, &name_path!["user", "name"]));
        assert!(contains_name_path_partial(&list, &name_path!["user"]));
        assert!(!contains_name_path_partial(&list, &name_path!["users"]));
    }

    #[test]
    fn test_index_coercion() {
        assert_eq!(Segment::Key("12".to_string()).as_index(), Some(12));
        assert_eq!(Segment::Key("0".to_string()).as_index(), Some(0));
        assert_eq!(Segment::Key("012".to_string()).as_index(), None);
        assert_eq!(Segment::Key("x".to_string()).as_index(), None);
        assert_eq!(Segment::Index(4).to_key(), "4");
    }
}
