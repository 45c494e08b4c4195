//! # CLI Structure and Argument Parsing
//!
//! `shorthand` takes command lines as plain arguments and hands each one to
//! the interpreter:
//!
//! ```bash
//! # Positional arguments, abbreviated command words
//! shorthand "u f Alice 24"
//!
//! # Named arguments in any order after the first word
//! shorthand "user name='Elon Musk' age=47 find"
//!
//! # Help for everything, or for commands starting with `u`
//! shorthand "/?"
//! shorthand "u /?"
//!
//! # Interactive loop
//! shorthand prompt
//! ```
//!
//! Extra commands can be declared in a TOML manifest passed with
//! `--commands`; they echo their resolved arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// Main CLI structure for the `shorthand` command
#[derive(Parser, Clone, Debug)]
#[command(name = "shorthand")]
#[command(version)]
#[command(about = "Run abbreviated console commands", long_about = None)]
pub struct Cli {
    /// Command lines to run, in order
    #[arg(value_name = "LINE")]
    pub lines: Vec<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Log resolution decisions
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Parser settings file (defaults to $SHORTHAND_CONFIG, then the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// TOML manifest of extra commands
    #[arg(long, value_name = "MANIFEST")]
    pub commands: Option<PathBuf>,

    /// Fail on ambiguous commands instead of asking
    #[arg(long)]
    pub non_interactive: bool,

    /// Output format for command results
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
