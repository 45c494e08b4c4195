//! # Output Formatting
//!
//! Command results are written either as human-readable text or as one JSON
//! object per command, selected with `--format`:
//!
//! ```bash
//! shorthand "user find Alice 24"
//! shorthand --format json "user find Alice 24" | jq .args.age
//! ```
//!
//! - [`help`]: colored command descriptions for `/?` and `help`
//! - [`render`]: bound arguments of a dispatched command

pub mod help;
pub mod render;

pub use help::{write_help, write_help_for};
pub use render::{write_args, write_json};

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// One JSON object per command
    Json,
}
