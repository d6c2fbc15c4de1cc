use anyhow::Result;

use crate::context::Context;

/// List every endpoint path in document order
pub fn execute(context: &Context) -> Result<()> {
    let paths = context.store().paths();
    println!("{}", context.formatter().format_paths(&paths)?);
    Ok(())
}
