use anyhow::Result;

use crate::commands::print_document;
use crate::context::{parse_path, Context};
use crate::utils::error::CliError;

/// Move one element of the sequence at `path` and print the document
pub fn execute(context: &mut Context, path: &str, from: isize, to: isize) -> Result<()> {
    let name_path = parse_path(path)?;

    let (moved, _) = context
        .store_mut()
        .batch(|batch| batch.move_at(&name_path, from, to))
        .map_err(CliError::Store)?;

    if !moved {
        eprintln!(
            "{}",
            context
                .formatter()
                .format_info(&format!("{} unchanged", name_path))
        );
    }

    print_document(context)
}
