//! Handler for commands declared in a manifest.

use std::io::Write;

use shorthand_core::{Args, Flow};

use super::Session;
use crate::output::write_args;

/// Print the resolved command and its arguments.
pub fn echo<W: Write>(session: &mut Session<W>, args: &Args) -> anyhow::Result<Flow> {
    let (format, separator) = (session.format(), session.separator());
    write_args(session.out(), args, format, separator)?;
    Ok(Flow::Continue)
}
