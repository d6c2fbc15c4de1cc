//! Value module for formpath
//!
//! This module defines the Value enum, the tagged tree every store is
//! built from.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::errors::StoreError;

/// Keyed container; iteration follows insertion order
pub type Map = IndexMap<String, Value>;

type CallbackFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A callable stored in form state (change handlers, validators).
///
/// Two callbacks are equal only when they share the same closure.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Callback(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

/// A keyed value that is not a plain data object, such as a date or a
/// file handle wrapped by the caller. Paths can read and write its
/// fields, but merging never descends into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub class: String,
    pub fields: Map,
}

impl Instance {
    pub fn new<S: Into<String>>(class: S) -> Self {
        Instance {
            class: class.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// The different kinds of values a store can hold
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Callable value
    Function(Callback),
    /// Sequence container
    Array(Vec<Value>),
    /// Plain data object
    Object(Map),
    /// Keyed value with its own class
    Instance(Instance),
}

impl Value {
    /// An empty plain data object
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// An empty sequence
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Plain data objects are the only values merge descends into
    pub fn is_plain_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Values that paths can index into
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_) | Value::Instance(_))
    }

    /// Falsy values are null, `false`, zero, NaN and the empty string
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Function(_) | Value::Array(_) | Value::Object(_) | Value::Instance(_) => true,
        }
    }

    /// Keyed fields of an object or instance
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            Value::Instance(instance) => Some(&instance.fields),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            Value::Instance(instance) => Some(&mut instance.fields),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a string representation of the value's type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Instance(_) => "instance",
        }
    }
}

/// Format a Value as compact JSON-like text; strings and keys are escaped
/// the way JSON escapes them
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write_quoted(f, s),
            Value::Function(_) => write!(f, "[function]"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(map) => fmt_map(f, map),
            Value::Instance(instance) => {
                write!(f, "{} ", instance.class)?;
                fmt_map(f, &instance.fields)
            }
        }
    }
}

fn fmt_map(f: &mut fmt::Formatter<'_>, map: &Map) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write_quoted(f, key)?;
        write!(f, ": {}", value)?;
    }
    write!(f, "}}")
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl From<Callback> for Value {
    fn from(callback: Callback) -> Self {
        Value::Function(callback)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

/// Convert a Value into JSON; callbacks have no JSON form
impl TryFrom<&Value> for serde_json::Value {
    type Error = StoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Function(_) => Err(S::Error::custom("functions cannot be serialized")),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) | Value::Instance(Instance { fields: map, .. }) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::Float(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::from("x").is_truthy());
        assert!(Value::object().is_truthy());
        assert!(Value::array().is_truthy());
        assert!(Value::from(Callback::new(|_| Value::Null)).is_truthy());
    }

    #[test]
    fn test_container_kinds() {
        let instance = Value::from(Instance::new("Date").with_field("ts", 0));

        assert!(instance.is_container());
        assert!(!instance.is_plain_object());
        assert!(Value::object().is_plain_object());
        assert!(!Value::array().is_plain_object());
        assert!(!Value::from(3).is_container());
    }

    #[test]
    fn test_callback_identity() {
        let a = Callback::new(|args| args.first().cloned().unwrap_or_default());
        let b = Callback::new(|args| args.first().cloned().unwrap_or_default());

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a.call(&[Value::from(5)]), Value::from(5));
    }

    #[test]
    fn test_json_conversion_keeps_key_order() {
        let value = Value::from(json!({"z": 1, "a": [true, null, 1.5], "m": "s"}));
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);

        let back = serde_json::Value::try_from(&value).unwrap();
        assert_eq!(back, json!({"z": 1, "a": [true, null, 1.5], "m": "s"}));
    }

    #[test]
    fn test_functions_do_not_serialize() {
        let mut map = Map::new();
        map.insert("onChange".to_string(), Callback::new(|_| Value::Null).into());
        let result = serde_json::Value::try_from(&Value::Object(map));
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_value_display() {
        let value = Value::from(json!({"a": [1, "x"], "b": null}));
        assert_eq!(value.to_string(), r#"{"a": [1, "x"], "b": null}"#);
    }

    #[test]
    fn test_display_escapes_strings_and_keys() {
        let value = Value::from(json!({"a\"b": "x\"y", "nl": "1\n2"}));
        assert_eq!(value.to_string(), r#"{"a\"b": "x\"y", "nl": "1\n2"}"#);
    }
}
