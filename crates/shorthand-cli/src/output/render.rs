//! Bound arguments as text or JSON.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use shorthand_core::Args;

use super::OutputFormat;

#[derive(Serialize)]
struct ArgsOutput<'a> {
    command: &'a str,
    args: serde_json::Map<String, serde_json::Value>,
}

/// Write a dispatched command and its argument values.
///
/// Text output lists one `name: value` line per parameter under the command
/// path; JSON output is a single `{"command": .., "args": {..}}` line.
pub fn write_args<W: Write>(
    writer: &mut W,
    args: &Args,
    format: OutputFormat,
    separator: char,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(writer, "{}", args.path().bold())?;
            for (name, value) in args.iter() {
                writeln!(writer, "  {}: {}", name.green(), value.to_text(separator))?;
            }
            Ok(())
        },
        OutputFormat::Json => {
            let mut args_json = serde_json::Map::new();
            for (name, value) in args.iter() {
                args_json.insert(name.to_string(), serde_json::to_value(value)?);
            }
            write_json(
                writer,
                &ArgsOutput {
                    command: args.path(),
                    args: args_json,
                },
            )
        },
    }
}

/// Write one value as a line of JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)
}
