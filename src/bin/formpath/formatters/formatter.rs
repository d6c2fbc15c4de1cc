use anyhow::Result;
use formpath::{NamePath, Value};

/// Renders command output
pub trait Formatter {
    /// Format a stored value
    fn format_value(&self, value: &Value) -> Result<String>;

    /// Format a list of paths
    fn format_paths(&self, paths: &[NamePath]) -> Result<String>;

    fn format_error(&self, error: &str) -> String;

    fn format_info(&self, info: &str) -> String;

    fn format_success(&self, success: &str) -> String;
}
