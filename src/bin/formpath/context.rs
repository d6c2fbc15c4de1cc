use std::fs;
use std::io::{self, Read};
use std::path::Path;

use formpath::{FormStore, NamePath, Value};

use crate::formatters::json::JsonFormatter;
use crate::formatters::text::TextFormatter;
use crate::formatters::{Formatter, OutputFormat};
use crate::utils::error::CliError;

/// CLI execution context
pub struct Context {
    /// The loaded document
    store: FormStore,

    /// Current formatter
    formatter: Box<dyn Formatter>,

    /// Verbosity level
    verbosity: u8,
}

impl Context {
    /// Load the document from `input`, or stdin when absent
    pub fn load(input: Option<&Path>, format: OutputFormat, verbosity: u8) -> Result<Self, CliError> {
        let raw = match input {
            Some(path) => fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let document = parse_document(&raw)?;
        Ok(Context::new(document, format, verbosity))
    }

    pub fn new(document: Value, format: OutputFormat, verbosity: u8) -> Self {
        let formatter: Box<dyn Formatter> = match format {
            OutputFormat::Text => Box::new(TextFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        };

        Context {
            store: FormStore::from_value(document),
            formatter,
            verbosity,
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FormStore {
        &mut self.store
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }
}

/// An empty input is an empty document
fn parse_document(raw: &str) -> Result<Value, CliError> {
    if raw.trim().is_empty() {
        return Ok(Value::object());
    }
    parse_json(raw)
}

pub fn parse_json(raw: &str) -> Result<Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::InvalidJson(e.to_string()))
}

pub fn parse_path(raw: &str) -> Result<NamePath, CliError> {
    raw.parse()
        .map_err(|e: formpath::PathError| CliError::InvalidPath(raw.to_string(), e.to_string()))
}
