//! Typed dispatch from a matched template to its handler.
//!
//! A [`CommandTable`] owns the registry together with one handler per
//! template. Handlers receive a context of the caller's choosing and an
//! [`Args`] view holding the bound values in declared parameter order.
//!
//! ```rust
//! use shorthand_core::{
//!     CommandTable, CommandTemplate, Flow, ParamType, ParserConfig, RefuseAmbiguity,
//!     Resolution, Resolver, ScalarType,
//! };
//!
//! let mut table: CommandTable<Vec<String>> = CommandTable::new();
//! table.register(
//!     CommandTemplate::builder("greet {name} {times}")
//!         .param("name", ParamType::STRING)
//!         .param("times", ScalarType::U8)
//!         .build()?,
//!     |out, args| {
//!         let name: String = args.get("name")?;
//!         for _ in 0..args.get::<u8>("times")? {
//!             out.push(format!("hello {name}"));
//!         }
//!         Ok(Flow::Continue)
//!     },
//! )?;
//!
//! let resolver = Resolver::new(table.registry(), ParserConfig::default());
//! let Resolution::Matched(found) = resolver.resolve("g Ada 2", &mut RefuseAmbiguity)? else {
//!     unreachable!()
//! };
//! let mut out = Vec::new();
//! table.dispatch(&mut out, &found)?;
//! assert_eq!(out, ["hello Ada", "hello Ada"]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fmt;

use crate::registry::{Registry, TemplateId};
use crate::resolver::Match;
use crate::template::CommandTemplate;
use crate::types::{FromValue, Value};
use crate::{Error, Result};

/// What the driver should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep reading commands.
    #[default]
    Continue,
    /// Stop the prompt loop.
    Exit,
}

/// A command handler.
pub type Handler<C> = Box<dyn Fn(&mut C, &Args) -> anyhow::Result<Flow>>;

/// Bound argument values in declared parameter order.
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    path: String,
    names: Vec<String>,
    values: Vec<Value>,
}

impl Args {
    /// Order a match's binding by the template's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompleteBinding`] unless the binding holds exactly
    /// one value per parameter.
    pub fn from_match(found: &Match<'_>) -> Result<Self> {
        let template = found.template;
        let params = template.params();
        let incomplete = |missing: &str| Error::IncompleteBinding {
            path: template.path().to_string(),
            missing: missing.to_string(),
        };

        let mut values = Vec::with_capacity(params.len());
        for param in params {
            let value = found
                .binding
                .get(&param.name)
                .ok_or_else(|| incomplete(&param.name))?;
            values.push(value.clone());
        }
        if let Some((extra, _)) = found
            .binding
            .iter()
            .find(|(name, _)| template.param(name).is_none())
        {
            return Err(incomplete(extra));
        }

        Ok(Self {
            path: template.path().to_string(),
            names: params.iter().map(|param| param.name.clone()).collect(),
            values,
        })
    }

    /// Typed value of the named parameter.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let index = self
            .names
            .iter()
            .position(|candidate| candidate == name)
            .ok_or_else(|| Error::IncompleteBinding {
                path: self.path.clone(),
                missing: name.to_string(),
            })?;
        self.at(index)
    }

    /// Typed value of the parameter at `index` in declaration order.
    pub fn at<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self
            .values
            .get(index)
            .ok_or_else(|| Error::IncompleteBinding {
                path: self.path.clone(),
                missing: format!("#{index}"),
            })?;
        T::from_value(value).ok_or_else(|| Error::Conversion {
            value: value.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })
    }

    /// Path of the template the values were bound for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(String::as_str).zip(&self.values)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the command takes no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Templates and their handlers, registered together.
pub struct CommandTable<C> {
    registry: Registry,
    handlers: Vec<Handler<C>>,
}

impl<C> Default for CommandTable<C> {
    fn default() -> Self {
        Self {
            registry: Registry::new(),
            handlers: Vec::new(),
        }
    }
}

impl<C> fmt::Debug for CommandTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("registry", &self.registry)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<C> CommandTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template with its handler.
    pub fn register<F>(&mut self, template: CommandTemplate, handler: F) -> Result<TemplateId>
    where
        F: Fn(&mut C, &Args) -> anyhow::Result<Flow> + 'static,
    {
        let id = self.registry.add(template)?;
        self.handlers.push(Box::new(handler));
        Ok(id)
    }

    /// Registered templates.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run the handler of a matched template.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoHandler`] for an unknown template,
    /// [`Error::IncompleteBinding`] for a partial binding, or with whatever
    /// the handler returns.
    pub fn dispatch(&self, ctx: &mut C, found: &Match<'_>) -> anyhow::Result<Flow> {
        let handler = self
            .handlers
            .get(found.id.index())
            .ok_or_else(|| Error::NoHandler(found.template.path().to_string()))?;
        let args = Args::from_match(found)?;
        tracing::debug!(command = found.template.path(), args = args.len(), "dispatching");
        handler(ctx, &args)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::binder::Binding;
    use crate::template::OptionSpec;
    use crate::types::{ParamType, ScalarType};

    fn user_find() -> CommandTemplate {
        CommandTemplate::builder("user find {name} {age}")
            .param("user_name", ParamType::STRING)
            .param("age", ScalarType::I32)
            .option(OptionSpec::new("user_name").name("name"))
            .option(OptionSpec::new("age").default("24"))
            .build()
            .unwrap()
    }

    fn found(table: &CommandTable<Vec<(String, i32)>>, binding: Binding) -> Match<'_> {
        let (id, template) = table.registry().iter().next().unwrap();
        Match {
            id,
            template,
            binding,
        }
    }

    fn table() -> CommandTable<Vec<(String, i32)>> {
        let mut table = CommandTable::new();
        table
            .register(user_find(), |seen: &mut Vec<(String, i32)>, args| {
                seen.push((args.get("user_name")?, args.at(1)?));
                Ok(Flow::Continue)
            })
            .unwrap();
        table
    }

    #[test]
    fn test_dispatch_passes_values_in_param_order() {
        let table = table();
        let binding: Binding = [
            ("age".to_string(), Value::I32(30)),
            ("user_name".to_string(), Value::String("Ada".into())),
        ]
        .into_iter()
        .collect();

        let mut seen = Vec::new();
        let flow = table.dispatch(&mut seen, &found(&table, binding)).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(seen, [("Ada".to_string(), 30)]);
    }

    #[test]
    fn test_partial_binding_is_rejected() {
        let table = table();
        let binding: Binding = [("age".to_string(), Value::I32(30))].into_iter().collect();

        let err = table
            .dispatch(&mut Vec::new(), &found(&table, binding))
            .unwrap_err();
        match err.downcast::<Error>().unwrap() {
            Error::IncompleteBinding { missing, .. } => assert_eq!(missing, "user_name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_binding_entry_is_rejected() {
        let table = table();
        let binding: Binding = [
            ("age".to_string(), Value::I32(30)),
            ("user_name".to_string(), Value::String("Ada".into())),
            ("colour".to_string(), Value::String("red".into())),
        ]
        .into_iter()
        .collect();

        assert!(table
            .dispatch(&mut Vec::new(), &found(&table, binding))
            .is_err());
    }

    #[test]
    fn test_args_type_mismatch_is_conversion_error() {
        let table = table();
        let binding: Binding = [
            ("age".to_string(), Value::I32(30)),
            ("user_name".to_string(), Value::String("Ada".into())),
        ]
        .into_iter()
        .collect();
        let args = Args::from_match(&found(&table, binding)).unwrap();

        assert!(matches!(args.get::<f64>("age"), Err(Error::Conversion { .. })));
        assert!(matches!(
            args.get::<i32>("nope"),
            Err(Error::IncompleteBinding { .. })
        ));
        assert!(args.at::<String>(5).is_err());
        assert_eq!(
            args.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            ["user_name", "age"]
        );
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut table = table();
        let err = table
            .register(user_find(), |_, _| Ok(Flow::Exit))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName { .. }));
        assert_eq!(table.registry().len(), 1);
    }
}
