//! Interactive input: the command prompt and ambiguity choices.
//!
//! [`Console`] owns the reader and writer used for both, so the prompt loop
//! and the choice prompt never compete for stdin. Tests drive it with
//! in-memory buffers.

use std::io::{self, BufRead, Write};

use is_terminal::IsTerminal;
use shorthand_core::{Choice, Chooser, Error, RefuseAmbiguity, Result};
use tracing::debug;

/// How the user picks between several matching commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceStyle {
    /// Arrow-key selection list.
    Select,
    /// Numbered list answered by typing a digit.
    Numbered,
    /// No prompt; ambiguity is an error.
    Refuse,
}

impl ChoiceStyle {
    /// Pick a style for the current process.
    ///
    /// The selection list needs a terminal on both ends.
    pub fn detect(non_interactive: bool) -> Self {
        if non_interactive {
            Self::Refuse
        } else if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
            Self::Select
        } else {
            Self::Numbered
        }
    }
}

/// Reader and writer for prompt lines and choices.
#[derive(Debug)]
pub struct Console<R, W> {
    reader: R,
    writer: W,
    style: ChoiceStyle,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console.
    pub const fn new(reader: R, writer: W, style: ChoiceStyle) -> Self {
        Self {
            reader,
            writer,
            style,
        }
    }

    /// Show the `>` prompt and read one line.
    ///
    /// Returns `None` at end of input.
    pub fn read_command(&mut self) -> io::Result<Option<String>> {
        write!(self.writer, ">")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// The writer, for inspection.
    pub const fn writer(&self) -> &W {
        &self.writer
    }
}

impl<R: BufRead, W: Write> Chooser for Console<R, W> {
    fn choose(&mut self, choices: &[Choice]) -> Result<Option<usize>> {
        debug!(choices = choices.len(), style = ?self.style, "asking for a choice");
        match self.style {
            ChoiceStyle::Refuse => RefuseAmbiguity.choose(choices),
            ChoiceStyle::Select => select_choice(choices),
            ChoiceStyle::Numbered => Ok(choose_with_io(
                choices,
                &mut self.reader,
                &mut self.writer,
            )?),
        }
    }
}

/// Ask for a numbered choice over the given reader and writer.
///
/// Returns the zero-based index, or `None` for `0`, end of input, or an
/// answer outside `1..=N`.
pub fn choose_with_io<R: BufRead, W: Write>(
    choices: &[Choice],
    reader: &mut R,
    writer: &mut W,
) -> io::Result<Option<usize>> {
    let count = choices.len();
    writeln!(
        writer,
        "Ambiguous command. Please select what you meant 1-{count}:"
    )?;
    for choice in choices {
        writeln!(writer, "{}: {}", choice.number, choice.label)?;
    }
    writeln!(writer)?;
    write!(writer, "Type number 1-{count} for choice or 0 for exit: ")?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(None);
    }

    match answer.trim().parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => Ok(Some(number - 1)),
        _ => Ok(None),
    }
}

fn select_choice(choices: &[Choice]) -> Result<Option<usize>> {
    let labels: Vec<&str> = choices.iter().map(|choice| choice.label.as_str()).collect();
    match inquire::Select::new("Ambiguous command. Which did you mean?", labels).raw_prompt() {
        Ok(selected) => Ok(Some(selected.index)),
        Err(
            inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted,
        ) => Ok(None),
        Err(inquire::InquireError::IO(err)) => Err(Error::Io(err)),
        Err(err) => Err(Error::Io(io::Error::other(err.to_string()))),
    }
}
