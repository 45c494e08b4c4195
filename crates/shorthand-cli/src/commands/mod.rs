//! Command implementations for the `shorthand` binary.
//!
//! - [`builtin`]: `prompt`, `exit` and `help`
//! - [`demo`]: `user find` and `product counts`
//! - [`echo`]: handler shared by every manifest command

pub mod builtin;
pub mod demo;
pub mod echo;

use std::io::{self, Write};

use serde::Serialize;
use shorthand_core::{CommandTable, Manifest, Result};
use tracing::debug;

use crate::output::{OutputFormat, write_json};

/// Something a handler wants the driver to do once it returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Enter the interactive prompt.
    Prompt,
    /// Describe every command.
    Help,
}

/// State shared by all handlers.
#[derive(Debug)]
pub struct Session<W> {
    out: W,
    format: OutputFormat,
    separator: char,
    request: Option<Request>,
}

impl<W: Write> Session<W> {
    /// Create a session writing results to `out`.
    pub const fn new(out: W, format: OutputFormat, separator: char) -> Self {
        Self {
            out,
            format,
            separator,
            request: None,
        }
    }

    /// Selected output format.
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Array separator for rendering values.
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Result writer.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// The writer, for inspection.
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Ask the driver to act after the current handler.
    pub fn request(&mut self, request: Request) {
        self.request = Some(request);
    }

    /// Take the pending request, if any.
    pub fn take_request(&mut self) -> Option<Request> {
        self.request.take()
    }

    /// Write a text line, or a JSON object in JSON mode.
    pub fn emit<T: Serialize>(&mut self, text: &str, json: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{text}"),
            OutputFormat::Json => write_json(&mut self.out, json),
        }
    }
}

/// Build the command table: built-ins, demos, then manifest commands.
///
/// # Errors
///
/// Fails if a manifest command is invalid or collides with an existing
/// command path.
pub fn command_table<W: Write + 'static>(
    manifest: Option<&Manifest>,
    separator: char,
) -> Result<CommandTable<Session<W>>> {
    let mut table = CommandTable::new();
    builtin::register(&mut table)?;
    demo::register(&mut table, separator)?;

    if let Some(manifest) = manifest {
        for template in manifest.templates(separator)? {
            debug!(command = template.path(), "registering manifest command");
            table.register(template, echo::echo)?;
        }
    }

    Ok(table)
}
