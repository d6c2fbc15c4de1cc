pub mod formatter;
pub mod json;
pub mod text;

pub use formatter::Formatter;
use clap::ValueEnum;

/// Available output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text
    Text,

    /// Pretty-printed JSON
    Json,
}
