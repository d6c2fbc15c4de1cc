use anyhow::Result;
use colored::*;
use formpath::{NamePath, Value};

use crate::formatters::Formatter;

/// Human-readable output
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        TextFormatter { colored: true }
    }

    #[cfg(test)]
    pub fn without_colors() -> Self {
        TextFormatter { colored: false }
    }
}

impl Formatter for TextFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        match value {
            // Bare strings read better unquoted
            Value::String(s) => Ok(s.clone()),
            _ if value.is_container() => Ok(serde_json::to_string_pretty(value)?),
            _ => Ok(value.to_string()),
        }
    }

    fn format_paths(&self, paths: &[NamePath]) -> Result<String> {
        Ok(paths
            .iter()
            .map(NamePath::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }

    fn format_success(&self, success: &str) -> String {
        if self.colored {
            format!("{}", success.green().bold())
        } else {
            format!("Success: {}", success)
        }
    }
}
