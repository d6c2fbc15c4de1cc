//! Value extraction from change-handler arguments

use crate::core::access::get_value;
use crate::core::value::Value;

/// Pull the field value out of the first handler argument.
///
/// When that argument looks like an event (its `target` is a container
/// holding `value_key`), the target's field is returned. A sequence
/// target is read by position, so `value_key` must then be an index.
/// Anything else is taken to be the value itself. `None` means no argument was given.
pub fn default_get_value_from_event(value_key: &str, args: &[Value]) -> Option<Value> {
    let event = args.first()?;

    let from_target = get_value(event, "target")
        .filter(|target| target.is_container())
        .and_then(|target| get_value(target, value_key));

    Some(from_target.unwrap_or(event).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Instance;
    use serde_json::json;

    #[test]
    fn test_event_target_value() {
        let event = Value::from(json!({"type": "change", "target": {"value": "hello"}}));
        assert_eq!(default_get_value_from_event("value", &[event]), Some(Value::from("hello")));
    }

    #[test]
    fn test_custom_value_key() {
        let target = Instance::new("HTMLInputElement").with_field("checked", true);
        let event = Value::from(Instance::new("Event").with_field("target", target));
        assert_eq!(default_get_value_from_event("checked", &[event]), Some(Value::from(true)));
    }

    #[test]
    fn test_sequence_target() {
        let event = Value::from(json!({"target": ["a", "b"]}));
        assert_eq!(default_get_value_from_event("1", &[event.clone()]), Some(Value::from("b")));
        assert_eq!(default_get_value_from_event("value", &[event.clone()]), Some(event));
    }

    #[test]
    fn test_plain_values_pass_through() {
        let value = Value::from(json!({"target": {"other": 1}}));
        assert_eq!(default_get_value_from_event("value", &[value.clone()]), Some(value));

        assert_eq!(
            default_get_value_from_event("value", &[Value::from(3), Value::from(4)]),
            Some(Value::from(3))
        );
        assert_eq!(default_get_value_from_event("value", &[]), None);
    }

    #[test]
    fn test_scalar_target_is_not_an_event() {
        let value = Value::from(json!({"target": "value"}));
        assert_eq!(default_get_value_from_event("value", &[value.clone()]), Some(value));
    }
}
