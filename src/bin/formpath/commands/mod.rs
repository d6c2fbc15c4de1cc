pub mod get;
pub mod merge;
pub mod paths;
pub mod pick;
pub mod reorder;
pub mod set;

use anyhow::Result;

use crate::context::Context;

/// Print the whole document in the current format
pub(crate) fn print_document(context: &Context) -> Result<()> {
    let output = context.formatter().format_value(context.store().value())?;
    println!("{}", output);
    Ok(())
}
