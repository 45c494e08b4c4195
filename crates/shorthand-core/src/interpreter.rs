//! Resolve-and-dispatch for whole input texts.

use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::dispatch::{CommandTable, Flow};
use crate::registry::TemplateId;
use crate::resolver::{Chooser, Resolution, Resolver};
use crate::tokenizer::split_lines;
use crate::Error;

/// What happened to one input line.
#[derive(Debug)]
pub enum Outcome {
    /// A handler ran and returned this flow.
    Dispatched(Flow),
    /// Help was requested for these templates.
    Help(Vec<TemplateId>),
    /// The user declined to choose between matches.
    Cancelled,
    /// The line did not resolve, or could not be dispatched.
    Failed(Error),
    /// The handler itself failed.
    HandlerFailed(anyhow::Error),
}

impl Outcome {
    /// Whether the line failed for any reason.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::HandlerFailed(_))
    }

    /// Whether a handler asked to stop.
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Dispatched(Flow::Exit))
    }
}

/// A command table paired with parser settings.
#[derive(Debug)]
pub struct Interpreter<C> {
    table: CommandTable<C>,
    config: ParserConfig,
}

impl<C> Interpreter<C> {
    /// Create an interpreter.
    pub const fn new(table: CommandTable<C>, config: ParserConfig) -> Self {
        Self { table, config }
    }

    /// The command table.
    pub const fn table(&self) -> &CommandTable<C> {
        &self.table
    }

    /// Parser settings.
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// A resolver over this interpreter's registry.
    pub const fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.table.registry(), self.config)
    }

    /// Resolve and dispatch every line of `text`, in order.
    ///
    /// A failing line does not stop later lines; a handler returning
    /// [`Flow::Exit`] does.
    pub fn run_line(&self, ctx: &mut C, text: &str, chooser: &mut dyn Chooser) -> Vec<Outcome> {
        let resolver = self.resolver();
        let mut outcomes = Vec::new();

        for line in split_lines(text) {
            let outcome = match resolver.resolve(line, chooser) {
                Ok(Resolution::Matched(found)) => match self.table.dispatch(ctx, &found) {
                    Ok(flow) => Outcome::Dispatched(flow),
                    Err(err) => match err.downcast::<Error>() {
                        Ok(err) => Outcome::Failed(err),
                        Err(err) => Outcome::HandlerFailed(err),
                    },
                },
                Ok(Resolution::Help(ids)) => Outcome::Help(ids),
                Ok(Resolution::Cancelled) => Outcome::Cancelled,
                Err(err) => {
                    debug!(line, error = %err, "line did not resolve");
                    Outcome::Failed(err)
                },
            };

            if let Outcome::HandlerFailed(err) = &outcome {
                warn!(line, "handler failed: {err:#}");
            }
            let exit = outcome.is_exit();
            outcomes.push(outcome);
            if exit {
                break;
            }
        }

        outcomes
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::resolver::RefuseAmbiguity;
    use crate::template::{CommandTemplate, OptionSpec};
    use crate::types::{ParamType, ScalarType};

    #[derive(Default)]
    struct Log(Vec<String>);

    fn interpreter() -> Interpreter<Log> {
        let mut table = CommandTable::new();
        table
            .register(
                CommandTemplate::builder("exit").build().unwrap(),
                |log: &mut Log, _| {
                    log.0.push("exit".into());
                    Ok(Flow::Exit)
                },
            )
            .unwrap();
        table
            .register(
                CommandTemplate::builder("user find {name} {age}")
                    .param("user_name", ParamType::STRING)
                    .param("age", ScalarType::I32)
                    .option(OptionSpec::new("user_name").name("name"))
                    .option(OptionSpec::new("age").default("24"))
                    .build()
                    .unwrap(),
                |log: &mut Log, args| {
                    let name: String = args.get("user_name")?;
                    let age: i32 = args.get("age")?;
                    log.0.push(format!("{name}:{age}"));
                    Ok(Flow::Continue)
                },
            )
            .unwrap();
        table
            .register(
                CommandTemplate::builder("explode").build().unwrap(),
                |_: &mut Log, _| anyhow::bail!("boom"),
            )
            .unwrap();
        Interpreter::new(table, ParserConfig::default())
    }

    #[test]
    fn test_lines_run_in_order_until_exit() {
        // Given: three lines where the second exits
        let interpreter = interpreter();
        let mut log = Log::default();

        // When: running them as one text
        let outcomes = interpreter.run_line(
            &mut log,
            "user find Alice 24\nexit\nuser find name=Bob",
            &mut RefuseAmbiguity,
        );

        // Then: processing stops after exit
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[1].is_exit());
        assert_eq!(log.0, ["Alice:24", "exit"]);
    }

    #[test]
    fn test_failures_do_not_stop_later_lines() {
        let interpreter = interpreter();
        let mut log = Log::default();

        let outcomes = interpreter.run_line(
            &mut log,
            "user find Alice x\r\nexplode\r\nu f na=Martin a=30",
            &mut RefuseAmbiguity,
        );

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(
            outcomes[0],
            Outcome::Failed(Error::IncorrectArgumentType { .. })
        ));
        assert!(matches!(outcomes[1], Outcome::HandlerFailed(_)));
        assert!(outcomes[1].is_failure());
        assert!(matches!(outcomes[2], Outcome::Dispatched(Flow::Continue)));
        assert_eq!(log.0, ["Martin:30"]);
    }

    #[test]
    fn test_help_outcome() {
        let interpreter = interpreter();
        let outcomes = interpreter.run_line(&mut Log::default(), "e /?", &mut RefuseAmbiguity);

        match &outcomes[..] {
            [Outcome::Help(ids)] => assert_eq!(ids.len(), 2),
            other => panic!("unexpected outcomes: {other:?}"),
        }
    }

    #[test]
    fn test_ambiguity_without_chooser_fails() {
        let interpreter = interpreter();
        let outcomes = interpreter.run_line(&mut Log::default(), "e", &mut RefuseAmbiguity);

        assert!(matches!(
            outcomes[..],
            [Outcome::Failed(Error::AmbiguousCommand { .. })]
        ));
    }
}
