//! Runs command lines against the interpreter and reports the results.
//!
//! The shell owns the interpreter, the handler session and the console. It
//! acts on what handlers request (help, the prompt loop), prints failures to
//! stderr and remembers the category of the last failure for the exit code.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use shorthand_core::{Error, Flow, Interpreter, Outcome, TemplateId, split_lines};
use tracing::{debug, info};

use crate::commands::{Request, Session};
use crate::error::ErrorCategory;
use crate::output::write_help_for;
use crate::prompt::Console;

/// Interpreter, session and console wired together.
pub struct Shell<W, R, P> {
    interpreter: Interpreter<Session<W>>,
    session: Session<W>,
    console: Console<R, P>,
    prompting: bool,
    last_failure: Option<ErrorCategory>,
}

impl<W: Write, R: BufRead, P: Write> Shell<W, R, P> {
    /// Create a shell.
    pub const fn new(
        interpreter: Interpreter<Session<W>>,
        session: Session<W>,
        console: Console<R, P>,
    ) -> Self {
        Self {
            interpreter,
            session,
            console,
            prompting: false,
            last_failure: None,
        }
    }

    /// Run every line of `text`.
    ///
    /// Failing lines are reported and skipped. Returns [`Flow::Exit`] once a
    /// command asks to stop; later lines are not run.
    ///
    /// # Errors
    ///
    /// Only fails when the output or the console breaks.
    pub fn execute(&mut self, text: &str) -> Result<Flow> {
        for line in split_lines(text) {
            let outcomes =
                self.interpreter
                    .run_line(&mut self.session, line, &mut self.console);
            for outcome in outcomes {
                if self.handle(outcome)? == Flow::Exit {
                    return Ok(Flow::Exit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Read and run lines from the console until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Fails when the output or the console breaks.
    pub fn prompt_loop(&mut self) -> Result<Flow> {
        info!("entering prompt");
        self.prompting = true;
        let flow = self.read_eval();
        self.prompting = false;
        flow
    }

    fn read_eval(&mut self) -> Result<Flow> {
        while let Some(line) = self.console.read_command()? {
            if self.execute(&line)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Exit code for the process: the category of the last failure.
    pub fn exit_code(&self) -> ExitCode {
        self.last_failure
            .map_or(ExitCode::SUCCESS, ErrorCategory::as_exit_code)
    }

    /// Category of the last failed line.
    pub const fn last_failure(&self) -> Option<ErrorCategory> {
        self.last_failure
    }

    /// The handler session.
    pub const fn session(&self) -> &Session<W> {
        &self.session
    }

    fn handle(&mut self, outcome: Outcome) -> Result<Flow> {
        let mut flow = Flow::Continue;
        match outcome {
            Outcome::Dispatched(returned) => flow = returned,
            Outcome::Help(ids) => self.write_help(&ids)?,
            Outcome::Cancelled => debug!("choice cancelled"),
            Outcome::Failed(err) => self.report_error(&err),
            Outcome::HandlerFailed(err) => {
                self.report(ErrorCategory::Internal, &format!("{err:#}"));
            },
        }

        match self.session.take_request() {
            Some(Request::Help) => {
                let ids: Vec<TemplateId> = self.interpreter.table().registry().ids().collect();
                self.write_help(&ids)?;
            },
            Some(Request::Prompt) if self.prompting => debug!("already at the prompt"),
            Some(Request::Prompt) => flow = self.prompt_loop()?,
            None => {},
        }
        Ok(flow)
    }

    fn write_help(&mut self, ids: &[TemplateId]) -> Result<()> {
        let separator = self.interpreter.config().array_separator;
        let registry = self.interpreter.table().registry();
        write_help_for(self.session.out(), registry, ids, separator)?;
        Ok(())
    }

    fn report_error(&mut self, err: &Error) {
        self.report(ErrorCategory::of(err), &err.to_string());
        if matches!(err, Error::CommandNotFound(_)) {
            eprintln!(
                "Enter {}? for help.",
                self.interpreter.config().option_char
            );
        }
    }

    fn report(&mut self, category: ErrorCategory, message: &str) {
        eprintln!("{} {message}", "error:".red().bold());
        self.last_failure = Some(category);
    }
}
