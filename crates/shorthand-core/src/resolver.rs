//! Resolving an input line to a template and its binding.
//!
//! Resolution runs in stages, each narrowing the candidate set:
//!
//! 1. tokenize, stripping flags;
//! 2. keep templates whose first word starts with the first token;
//! 3. drop templates with fewer parts than tokens (skipped for help);
//! 4. bind each survivor, positionally or by name;
//! 5. disambiguate what is left.
//!
//! Candidates never share binding state. A binder failure only removes its
//! candidate; the reason is surfaced when that candidate was the last one
//! standing and the reason is worth reporting.

use serde::Serialize;
use tracing::{debug, trace};

use crate::binder::{self, Binding, Rejection};
use crate::config::ParserConfig;
use crate::registry::{Registry, TemplateId};
use crate::template::{CommandTemplate, Part};
use crate::tokenizer::{Tokenizer, split_lines};
use crate::{Error, Result};

/// A template with a complete binding.
#[derive(Debug, Clone)]
pub struct Match<'r> {
    /// Identity in the registry.
    pub id: TemplateId,
    /// The matched template.
    pub template: &'r CommandTemplate,
    /// Converted arguments by parameter name.
    pub binding: Binding,
}

/// Outcome of resolving one line.
#[derive(Debug, Clone)]
pub enum Resolution<'r> {
    /// Exactly one template was meant.
    Matched(Match<'r>),
    /// A help flag was given; these templates should be described.
    Help(Vec<TemplateId>),
    /// Several templates matched and the user declined to pick one.
    Cancelled,
}

/// One entry of an ambiguity prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// One-based number shown to the user.
    pub number: usize,
    /// Signature words and `option=value` pairs.
    pub label: String,
    /// Template behind the entry.
    pub id: TemplateId,
}

/// Picks one of several matching templates.
pub trait Chooser {
    /// Return the zero-based index of the chosen entry, or `None` to cancel.
    ///
    /// An index past the end is treated as a cancel.
    fn choose(&mut self, choices: &[Choice]) -> Result<Option<usize>>;
}

/// A chooser for non-interactive use: ambiguity is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefuseAmbiguity;

impl Chooser for RefuseAmbiguity {
    fn choose(&mut self, choices: &[Choice]) -> Result<Option<usize>> {
        Err(Error::AmbiguousCommand {
            candidates: choices.iter().map(|choice| choice.label.clone()).collect(),
        })
    }
}

/// Resolves lines against a registry.
#[derive(Debug, Clone)]
pub struct Resolver<'r> {
    registry: &'r Registry,
    config: ParserConfig,
    tokenizer: Tokenizer,
}

impl<'r> Resolver<'r> {
    /// Create a resolver for `registry`.
    pub const fn new(registry: &'r Registry, config: ParserConfig) -> Self {
        Self {
            registry,
            tokenizer: Tokenizer::new(config.option_char),
            config,
        }
    }

    /// The registry being resolved against.
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Active parser settings.
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Resolve every non-empty line of `text`, in order. A failing line does
    /// not stop the rest.
    pub fn resolve_all(
        &self,
        text: &str,
        chooser: &mut dyn Chooser,
    ) -> Vec<Result<Resolution<'r>>> {
        split_lines(text)
            .map(|line| self.resolve(line, chooser))
            .collect()
    }

    /// Resolve a single line.
    ///
    /// Text holding more than one non-empty line is rejected with
    /// [`Error::MultipleLines`]; use [`Resolver::resolve_all`] for it.
    ///
    /// ```rust
    /// use shorthand_core::{
    ///     CommandTemplate, OptionSpec, ParamType, ParserConfig, Registry, RefuseAmbiguity,
    ///     Resolution, Resolver, ScalarType, Value,
    /// };
    ///
    /// let registry = Registry::from_templates([CommandTemplate::builder("user find {name} {age}")
    ///     .param("name", ParamType::STRING)
    ///     .param("age", ScalarType::I32)
    ///     .option(OptionSpec::new("age").default("24"))
    ///     .build()?])?;
    /// let resolver = Resolver::new(&registry, ParserConfig::default());
    ///
    /// let Resolution::Matched(found) = resolver.resolve("u f name=Bob", &mut RefuseAmbiguity)? else {
    ///     panic!("expected a match");
    /// };
    /// assert_eq!(found.binding.get("age"), Some(&Value::I32(24)));
    /// # Ok::<(), shorthand_core::Error>(())
    /// ```
    pub fn resolve(&self, line: &str, chooser: &mut dyn Chooser) -> Result<Resolution<'r>> {
        let lines = split_lines(line).count();
        if lines > 1 {
            return Err(Error::MultipleLines(lines));
        }

        let stream = self.tokenizer.tokenize(line);
        let tokens = stream.tokens;

        let Some(first) = tokens.first() else {
            if stream.help {
                return Ok(Resolution::Help(self.registry.ids().collect()));
            }
            return Err(Error::EmptyCommand);
        };

        let mut candidates: Vec<(TemplateId, &'r CommandTemplate)> = self
            .registry
            .iter()
            .filter(|(_, template)| template.first_word().starts_with(first.as_str()))
            .collect();
        debug!(first = %first, count = candidates.len(), "first word filter");

        if candidates.is_empty() {
            return Err(Error::CommandNotFound(first.clone()));
        }
        if stream.help {
            return Ok(Resolution::Help(candidates.into_iter().map(|(id, _)| id).collect()));
        }

        candidates.retain(|(_, template)| template.parts().len() >= tokens.len());
        if candidates.is_empty() {
            return Err(Error::TooManyArguments);
        }

        let args = binder::classify(&tokens);
        let named = binder::has_named(&args);
        let separator = self.config.array_separator;
        let total = candidates.len();
        let mut bound: Vec<Match<'r>> = Vec::with_capacity(total);

        for (position, (id, template)) in candidates.into_iter().enumerate() {
            let result = if named {
                binder::bind_named(template, &args, separator)
            } else {
                binder::bind_positional(template, &tokens, separator)
            };

            match result {
                Ok(binding) => {
                    trace!(template = template.path(), ?binding, "candidate bound");
                    bound.push(Match {
                        id,
                        template,
                        binding,
                    });
                },
                Err(rejection) => {
                    debug!(template = template.path(), reason = %rejection, "candidate rejected");
                    let last_standing = bound.is_empty() && position + 1 == total;
                    if let (Rejection::Report(err), true) = (rejection, last_standing) {
                        return Err(err);
                    }
                },
            }
        }

        bound.dedup_by_key(|found| found.id);
        self.disambiguate(line, bound, chooser)
    }

    fn disambiguate(
        &self,
        line: &str,
        mut bound: Vec<Match<'r>>,
        chooser: &mut dyn Chooser,
    ) -> Result<Resolution<'r>> {
        match bound.len() {
            0 => Err(Error::CommandNotFound(line.trim().to_string())),
            1 => Ok(bound.pop().map_or(Resolution::Cancelled, Resolution::Matched)),
            count if count > self.config.max_choices => Err(Error::TooAmbiguous { count }),
            _ => {
                let choices: Vec<Choice> = bound
                    .iter()
                    .enumerate()
                    .map(|(index, found)| Choice {
                        number: index + 1,
                        label: self.label(found),
                        id: found.id,
                    })
                    .collect();
                debug!(count = choices.len(), "asking chooser");

                Ok(match chooser.choose(&choices)? {
                    Some(index) if index < bound.len() => {
                        Resolution::Matched(bound.swap_remove(index))
                    },
                    _ => Resolution::Cancelled,
                })
            },
        }
    }

    fn label(&self, found: &Match<'_>) -> String {
        let template = found.template;
        template
            .parts()
            .iter()
            .map(|part| match part {
                Part::Signature(word) => word.clone(),
                Part::Param(index) => {
                    let option = &template.options()[*index];
                    let value = found
                        .binding
                        .get(&template.param_of(option).name)
                        .map(|value| value.to_text(self.config.array_separator))
                        .unwrap_or_default();
                    format!("{}={value}", option.name)
                },
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
