//! shorthand CLI - abbreviation-aware command interpreter
//!
//! Each argument is one command line; with no arguments the help for every
//! registered command is printed.

use std::process::ExitCode;

use colored::Colorize;
use shorthand_cli::error::exit_code_from_error;

fn main() -> ExitCode {
    match shorthand_cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
