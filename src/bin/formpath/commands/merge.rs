use anyhow::Result;
use log::debug;

use crate::commands::print_document;
use crate::context::{parse_json, Context};
use crate::utils::error::CliError;

/// Merge each JSON patch into the document and print the result
pub fn execute(context: &mut Context, patches: &[String]) -> Result<()> {
    let patches = patches
        .iter()
        .map(|raw| parse_json(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let stats = context.store_mut().merge(patches).map_err(CliError::Store)?;
    debug!(
        "merge: {} patches, {} paths changed",
        stats.writes, stats.notified_paths
    );
    if context.verbosity() > 0 {
        eprintln!(
            "{}",
            context
                .formatter()
                .format_success(&format!("{} paths changed", stats.notified_paths))
        );
    }

    print_document(context)
}
