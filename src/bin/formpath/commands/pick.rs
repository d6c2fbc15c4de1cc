use anyhow::Result;

use crate::context::{parse_path, Context};
use crate::utils::error::CliError;

/// Print a document holding only `paths`
pub fn execute(context: &Context, paths: &[String]) -> Result<()> {
    let paths = paths
        .iter()
        .map(|raw| parse_path(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let picked = context.store().pick(&paths).map_err(CliError::Store)?;
    println!("{}", context.formatter().format_value(&picked)?);
    Ok(())
}
