//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::output::OutputFormat;

/// Log level selected by the global flags.
///
/// JSON output keeps stderr down to errors unless verbose/debug was
/// explicitly requested.
pub const fn log_level(cli: &Cli) -> Level {
    if cli.verbose || cli.debug {
        Level::DEBUG
    } else if cli.quiet || matches!(cli.format, OutputFormat::Json) {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Initialize the logging subsystem based on CLI flags.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var("NO_COLOR").ok().is_some();
    let machine_output = matches!(cli.format, OutputFormat::Json);
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shorthand").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(log_level(&parse(&[])), Level::WARN);
    }

    #[test]
    fn test_verbose_and_debug_raise_level() {
        assert_eq!(log_level(&parse(&["-v"])), Level::DEBUG);
        assert_eq!(log_level(&parse(&["--debug", "--format", "json"])), Level::DEBUG);
    }

    #[test]
    fn test_quiet_and_json_lower_level() {
        assert_eq!(log_level(&parse(&["-q"])), Level::ERROR);
        assert_eq!(log_level(&parse(&["--format", "json"])), Level::ERROR);
    }
}
