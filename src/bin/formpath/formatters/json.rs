use anyhow::Result;
use serde_json::json;
use formpath::{NamePath, Value};

use crate::formatters::Formatter;

/// JSON output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter { pretty: true }
    }

    #[cfg(test)]
    pub fn without_pretty() -> Self {
        JsonFormatter { pretty: false }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> serde_json::Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }

    fn message(&self, kind: &str, text: &str) -> String {
        let mut body = serde_json::Map::new();
        body.insert(kind.to_string(), json!(text));
        self.render(&body)
            .unwrap_or_else(|_| format!("{{\"{}\":{:?}}}", kind, text))
    }
}

impl Formatter for JsonFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        Ok(self.render(value)?)
    }

    fn format_paths(&self, paths: &[NamePath]) -> Result<String> {
        let rendered: Vec<String> = paths.iter().map(NamePath::to_string).collect();
        Ok(self.render(&rendered)?)
    }

    fn format_error(&self, error: &str) -> String {
        self.message("error", error)
    }

    fn format_info(&self, info: &str) -> String {
        self.message("info", info)
    }

    fn format_success(&self, success: &str) -> String {
        self.message("success", success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_output() {
        let formatter = JsonFormatter::without_pretty();
        let value = Value::from(serde_json::json!({"b": 1, "a": [true, null]}));

        assert_eq!(formatter.format_value(&value).unwrap(), r#"{"b":1,"a":[true,null]}"#);
        assert_eq!(formatter.format_error("boom"), r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_paths_are_strings() {
        let formatter = JsonFormatter::without_pretty();
        let paths: Vec<NamePath> = vec!["a.b".parse().unwrap(), "list[0]".parse().unwrap()];
        assert_eq!(formatter.format_paths(&paths).unwrap(), r#"["a.b","list[0]"]"#);
    }
}
