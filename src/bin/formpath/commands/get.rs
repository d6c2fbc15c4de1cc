use anyhow::Result;
use log::debug;

use crate::context::{parse_path, Context};
use crate::utils::error::CliError;

/// Print the value stored at `path`
pub fn execute(context: &Context, path: &str) -> Result<()> {
    let name_path = parse_path(path)?;
    debug!("get {}", name_path);

    let value = context
        .store()
        .get(&name_path)
        .ok_or_else(|| CliError::NotFound(path.to_string()))?;

    if context.verbosity() > 0 {
        eprintln!("{}", context.formatter().format_info(&format!("{} ({})", name_path, value.type_name())));
    }
    println!("{}", context.formatter().format_value(value)?);
    Ok(())
}
