use anyhow::Result;
use log::debug;

use crate::commands::print_document;
use crate::context::{parse_json, parse_path, Context};
use crate::utils::error::CliError;

/// Store a JSON value at `path` and print the updated document
pub fn execute(context: &mut Context, path: &str, raw_value: &str) -> Result<()> {
    let name_path = parse_path(path)?;
    let value = parse_json(raw_value)?;

    let stats = context.store_mut().set(&name_path, value).map_err(CliError::Store)?;
    debug!("set {}: {:?}", name_path, stats);
    if context.verbosity() > 0 {
        eprintln!("{}", context.formatter().format_success(&format!("stored {}", name_path)));
    }

    print_document(context)
}
