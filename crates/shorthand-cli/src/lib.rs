//! shorthand CLI - abbreviation-aware command interpreter
//!
//! Parses the process arguments, builds the command table (built-ins, demo
//! commands and any manifest commands), runs each argument as a command line
//! and turns the last failure into the exit code.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use shorthand_core::{Flow, Interpreter, Manifest, ParserConfig};
use tracing::debug;

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod prompt;
pub mod shell;
mod utils;

use crate::cli::Cli;
use crate::commands::{Session, command_table};
use crate::error::{ErrorCategory, IntoCliError};
use crate::prompt::{ChoiceStyle, Console};
use crate::shell::Shell;
use crate::utils::initialize_logging;

/// Execute the shorthand CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging, settings or the command table cannot be set
/// up, or if the terminal breaks. Failing command lines are reported and
/// reflected in the returned exit code instead.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    run_with(cli)
}

/// Execute an already parsed command line.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let manifest = load_manifest(&cli)?;
    let table = command_table(manifest.as_ref(), config.array_separator)
        .map_err(|err| err.with_category(ErrorCategory::Config))?;
    debug!(commands = table.registry().len(), "command table ready");

    let style = ChoiceStyle::detect(cli.non_interactive);
    let mut shell = Shell::new(
        Interpreter::new(table, config),
        Session::new(std::io::stdout(), cli.format, config.array_separator),
        Console::new(std::io::stdin().lock(), std::io::stdout(), style),
    );

    let lines = if cli.lines.is_empty() {
        vec![format!("{}?", config.option_char)]
    } else {
        cli.lines
    };
    for line in &lines {
        if shell.execute(line)? == Flow::Exit {
            break;
        }
    }

    std::io::stdout().flush()?;
    Ok(shell.exit_code())
}

fn load_config(cli: &Cli) -> Result<ParserConfig> {
    let config = match &cli.config {
        Some(path) => ParserConfig::load(path),
        None => ParserConfig::load_default(),
    };
    config.map_err(|err| err.with_category(ErrorCategory::Config).into())
}

fn load_manifest(cli: &Cli) -> Result<Option<Manifest>> {
    let Some(path) = &cli.commands else {
        return Ok(None);
    };
    let manifest = Manifest::load(path).map_err(|err| {
        anyhow::Error::from(err)
            .context(format!("Failed to load manifest {}", path.display()))
            .with_category(ErrorCategory::Config)
    })?;
    Ok(Some(manifest))
}
