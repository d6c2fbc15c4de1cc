mod app;
mod commands;
mod context;
mod formatters;
mod utils;

use std::process::ExitCode;

use anyhow::Result;

fn main() -> Result<ExitCode> {
    app::run()
}
