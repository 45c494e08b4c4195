//! Command templates.
//!
//! A template is a path such as `user find {name} {age}`: literal signature
//! words that the user may abbreviate, and `{placeholder}` slots that receive
//! arguments. Each placeholder is bound to an option, and each option wraps
//! exactly one typed parameter. Options carry the name used for `key=value`
//! arguments (the parameter name unless an alias is given) and an optional
//! default; an option without a default is required.
//!
//! Templates are built once with [`CommandTemplate::builder`] and are
//! immutable afterwards.
//!
//! ```rust
//! use shorthand_core::{CommandTemplate, OptionSpec, ParamType, ScalarType};
//!
//! let template = CommandTemplate::builder("user find {name} {age}")
//!     .help("Command to search for a user by name and age")
//!     .param("user_name", ParamType::STRING)
//!     .param("age", ScalarType::I32)
//!     .option(OptionSpec::new("user_name").name("name"))
//!     .option(OptionSpec::new("age").default("24"))
//!     .build()?;
//!
//! assert_eq!(template.signature_word_count(), 2);
//! assert_eq!(template.default_count(), 1);
//! assert!(template.option("name").is_some());
//! # Ok::<(), shorthand_core::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::convert::{DEFAULT_ARRAY_SEPARATOR, convert};
use crate::types::{ParamType, Value};
use crate::{Error, Result};

/// One element of a template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A literal command word, matched by prefix.
    Signature(String),
    /// A slot filled by the option at this index of [`CommandTemplate::options`].
    Param(usize),
}

/// A typed handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Name, unique within the template.
    pub name: String,
    /// Declared type.
    pub ty: ParamType,
}

/// The user-facing side of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    /// Index into [`CommandTemplate::params`].
    pub param: usize,
    /// Name matched by `key=value` arguments.
    pub name: String,
    /// Pre-converted default; `None` means the option is required.
    pub default: Option<Value>,
    /// Help text, possibly empty.
    pub help: String,
}

impl CommandOption {
    /// Whether the option must be supplied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Declaration of an option before the template is built.
#[derive(Debug, Clone, Default)]
pub struct OptionSpec {
    param: String,
    name: Option<String>,
    default: Option<String>,
    help: Option<String>,
}

impl OptionSpec {
    /// Describe the option for parameter `param`.
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            ..Default::default()
        }
    }

    /// Alias used instead of the parameter name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Default value, written as the user would type it.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Help text shown next to the option.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Builder for [`CommandTemplate`].
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    path: String,
    help: String,
    params: Vec<Param>,
    options: Vec<OptionSpec>,
    separator: char,
}

impl TemplateBuilder {
    /// Help text for the command.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Declare the next handler parameter. Declaration order is the order
    /// values are handed to the handler.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: impl Into<ParamType>) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Attach option metadata (alias, default, help) to a parameter.
    #[must_use]
    pub fn option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    /// Separator used when converting array defaults.
    #[must_use]
    pub const fn array_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Validate the declaration and build the template.
    pub fn build(self) -> Result<CommandTemplate> {
        let path = self.path.split_whitespace().collect::<Vec<_>>().join(" ");
        let malformed = |reason: &str| Error::MalformedPath {
            path: self.path.clone(),
            reason: reason.to_string(),
        };
        if path.is_empty() {
            return Err(malformed("path is empty"));
        }

        let mut params_by_name = HashMap::with_capacity(self.params.len());
        for (index, param) in self.params.iter().enumerate() {
            if params_by_name.insert(param.name.clone(), index).is_some() {
                return Err(Error::DuplicateName {
                    kind: "parameter",
                    name: param.name.clone(),
                    path,
                });
            }
        }

        // One spec per parameter; defaults are converted up front.
        let mut specs: Vec<Option<(OptionSpec, Option<Value>)>> = vec![None; self.params.len()];
        let mut aliases = HashMap::new();
        for spec in self.options {
            let Some(&index) = params_by_name.get(&spec.param) else {
                return Err(Error::UnknownParameter {
                    path,
                    name: spec.param,
                });
            };
            if specs[index].is_some() {
                return Err(Error::DuplicateName {
                    kind: "option",
                    name: spec.param,
                    path,
                });
            }
            let ty = self.params[index].ty;
            let default = match &spec.default {
                Some(text) => Some(convert(text, ty, self.separator).map_err(|_| {
                    Error::InvalidDefault {
                        option: spec.name.clone().unwrap_or_else(|| spec.param.clone()),
                        value: text.clone(),
                        expected: ty,
                    }
                })?),
                None => None,
            };
            if let Some(alias) = &spec.name {
                aliases.insert(alias.clone(), index);
            }
            specs[index] = Some((spec, default));
        }

        let mut parts = Vec::new();
        let mut options: Vec<CommandOption> = Vec::with_capacity(self.params.len());
        let mut options_by_name = HashMap::with_capacity(self.params.len());
        let mut placed = vec![false; self.params.len()];

        for word in path.split(' ') {
            let Some(rest) = word.strip_prefix('{') else {
                parts.push(Part::Signature(word.to_string()));
                continue;
            };
            if parts.is_empty() {
                return Err(malformed("path must start with a command word"));
            }
            let Some(key) = rest.strip_suffix('}') else {
                return Err(malformed("closing brace '}' not found"));
            };
            if key.is_empty() {
                return Err(malformed("empty placeholder '{}'"));
            }

            // A placeholder names either an option alias or a parameter.
            let index = aliases
                .get(key)
                .or_else(|| params_by_name.get(key))
                .copied()
                .ok_or_else(|| Error::UnknownParameter {
                    path: path.clone(),
                    name: key.to_string(),
                })?;

            if std::mem::replace(&mut placed[index], true) {
                return Err(Error::DuplicateName {
                    kind: "placeholder",
                    name: key.to_string(),
                    path: path.clone(),
                });
            }

            let option = match specs[index].take() {
                Some((spec, default)) => CommandOption {
                    param: index,
                    name: spec.name.unwrap_or_else(|| self.params[index].name.clone()),
                    default,
                    help: spec.help.unwrap_or_default(),
                },
                None => CommandOption {
                    param: index,
                    name: self.params[index].name.clone(),
                    default: None,
                    help: String::new(),
                },
            };

            if options_by_name
                .insert(option.name.clone(), options.len())
                .is_some()
            {
                return Err(Error::DuplicateName {
                    kind: "option",
                    name: option.name,
                    path: path.clone(),
                });
            }
            parts.push(Part::Param(options.len()));
            options.push(option);
        }

        if let Some(index) = placed.iter().position(|placed| !placed) {
            return Err(Error::UnboundParameter {
                path,
                name: self.params[index].name.clone(),
            });
        }

        let signature_word_count = parts
            .iter()
            .filter(|part| matches!(part, Part::Signature(_)))
            .count();
        let default_count = options
            .iter()
            .filter(|option| option.default.is_some())
            .count();

        Ok(CommandTemplate {
            path,
            help: self.help,
            parts,
            params: self.params,
            params_by_name,
            options,
            options_by_name,
            signature_word_count,
            default_count,
        })
    }
}

/// An immutable, validated command template.
#[derive(Debug, Clone)]
pub struct CommandTemplate {
    path: String,
    help: String,
    parts: Vec<Part>,
    params: Vec<Param>,
    params_by_name: HashMap<String, usize>,
    options: Vec<CommandOption>,
    options_by_name: HashMap<String, usize>,
    signature_word_count: usize,
    default_count: usize,
}

impl CommandTemplate {
    /// Start declaring a template for `path`.
    pub fn builder(path: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder {
            path: path.into(),
            help: String::new(),
            params: Vec::new(),
            options: Vec::new(),
            separator: DEFAULT_ARRAY_SEPARATOR,
        }
    }

    /// Path with whitespace normalized to single spaces.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Help text, possibly empty.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Path parts in order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Options in path order.
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// Look up a parameter by exact name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params_by_name.get(name).map(|&index| &self.params[index])
    }

    /// Position of a parameter in declaration order.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params_by_name.get(name).copied()
    }

    /// Look up an option by exact name.
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options_by_name
            .get(name)
            .map(|&index| &self.options[index])
    }

    /// The parameter an option wraps.
    pub fn param_of(&self, option: &CommandOption) -> &Param {
        &self.params[option.param]
    }

    /// The first command word; every template has one.
    pub fn first_word(&self) -> &str {
        self.signature_words().next().unwrap_or_default()
    }

    /// Literal words in path order.
    pub fn signature_words(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|part| match part {
            Part::Signature(word) => Some(word.as_str()),
            Part::Param(_) => None,
        })
    }

    /// Number of literal words.
    pub const fn signature_word_count(&self) -> usize {
        self.signature_word_count
    }

    /// Number of options carrying a default.
    pub const fn default_count(&self) -> usize {
        self.default_count
    }

    /// True when every parameter can be filled from a default.
    pub fn all_params_have_default(&self) -> bool {
        self.default_count == self.params.len()
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
