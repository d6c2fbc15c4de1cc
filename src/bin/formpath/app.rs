use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands;
use crate::context::Context;
use crate::formatters::{Formatter, OutputFormat};

#[derive(Parser)]
#[command(name = "formpath")]
#[command(about = "Read, write and merge values in a JSON document by path", long_about = None)]
struct Cli {
    /// Verbosity level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// JSON document to operate on (stdin when absent)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value stored at a path
    Get {
        /// Path such as `user.tags[0]`
        path: String,
    },

    /// Write a JSON value at a path and print the document
    Set {
        path: String,
        /// JSON value to store
        value: String,
    },

    /// Merge JSON patches into the document, left to right
    Merge {
        /// JSON objects to merge
        patches: Vec<String>,
    },

    /// Print a document holding only the given paths
    Pick {
        paths: Vec<String>,
    },

    /// List every endpoint path
    Paths,

    /// Move an element of the sequence stored at a path
    Move {
        path: String,
        #[arg(allow_hyphen_values = true)]
        from: isize,
        #[arg(allow_hyphen_values = true)]
        to: isize,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Run the CLI application; command failures are reported through the
/// formatter and turn into a failing exit code
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("formpath starting");
    let mut context = Context::load(cli.input.as_deref(), cli.format, cli.verbose)?;
    debug!("document loaded ({} endpoints)", context.store().paths().len());

    let result = match cli.command {
        Commands::Get { path } => commands::get::execute(&context, &path),
        Commands::Set { path, value } => commands::set::execute(&mut context, &path, &value),
        Commands::Merge { patches } => commands::merge::execute(&mut context, &patches),
        Commands::Pick { paths } => commands::pick::execute(&context, &paths),
        Commands::Paths => commands::paths::execute(&context),
        Commands::Move { path, from, to } => commands::reorder::execute(&mut context, &path, from, to),
    };

    info!("formpath done");
    match failure_message(&result, context.formatter()) {
        None => Ok(ExitCode::SUCCESS),
        Some(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// The one line to report for a failed command
fn failure_message(result: &Result<()>, formatter: &dyn Formatter) -> Option<String> {
    result
        .as_ref()
        .err()
        .map(|e| formatter.format_error(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::json::JsonFormatter;
    use crate::utils::error::CliError;

    #[test]
    fn test_failure_is_reported_once_through_formatter() {
        let formatter = JsonFormatter::without_pretty();

        let failed: Result<()> = Err(CliError::NotFound("a.b".to_string()).into());
        assert_eq!(
            failure_message(&failed, &formatter),
            Some(r#"{"error":"Nothing stored at 'a.b'"}"#.to_string())
        );
        assert_eq!(failure_message(&Ok(()), &formatter), None);
    }
}
