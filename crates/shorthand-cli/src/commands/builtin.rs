//! Commands every `shorthand` session has.

use std::io::Write;

use shorthand_core::{Args, CommandTable, CommandTemplate, Flow, Result};

use super::{Request, Session};

/// Register `prompt`, `exit` and `help`.
pub fn register<W: Write + 'static>(table: &mut CommandTable<Session<W>>) -> Result<()> {
    table.register(
        CommandTemplate::builder("prompt")
            .help("To enter commands from console")
            .build()?,
        prompt,
    )?;
    table.register(
        CommandTemplate::builder("exit")
            .help("To exit from console")
            .build()?,
        exit,
    )?;
    table.register(
        CommandTemplate::builder("help")
            .help("Describe every command")
            .build()?,
        help,
    )?;
    Ok(())
}

fn prompt<W: Write>(session: &mut Session<W>, _: &Args) -> anyhow::Result<Flow> {
    session.request(Request::Prompt);
    Ok(Flow::Continue)
}

fn exit<W: Write>(_: &mut Session<W>, _: &Args) -> anyhow::Result<Flow> {
    Ok(Flow::Exit)
}

fn help<W: Write>(session: &mut Session<W>, _: &Args) -> anyhow::Result<Flow> {
    session.request(Request::Help);
    Ok(Flow::Continue)
}
