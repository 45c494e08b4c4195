//! Binding tokens to a candidate template's parameters.
//!
//! Two strategies, chosen per input line:
//!
//! - **positional**: tokens line up with the template parts by index;
//! - **named**: signature words are given positionally and every argument is
//!   a `key=value` pair whose key is a prefix of an option name.
//!
//! A binder either produces a complete [`Binding`] or rejects the candidate.
//! Most rejections are [`Rejection::Silent`]: another candidate may still
//! match. [`Rejection::Report`] carries an error worth showing when no other
//! candidate survives.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::Error;
use crate::convert::convert;
use crate::template::{CommandTemplate, Part};
use crate::types::Value;

/// One token, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// A bare token.
    Positional(&'a str),
    /// A `key=value` token, split at the first `=`.
    Named {
        /// Text before the `=`.
        key: &'a str,
        /// Text after the `=`, possibly empty.
        value: &'a str,
    },
}

/// Classify tokens. A token is named when it contains `=` after its first
/// character; a leading `=` keeps it positional.
pub fn classify(tokens: &[String]) -> Vec<Arg<'_>> {
    tokens
        .iter()
        .map(|token| match token.find('=') {
            Some(at) if at > 0 => Arg::Named {
                key: &token[..at],
                value: &token[at + 1..],
            },
            _ => Arg::Positional(token),
        })
        .collect()
}

/// Whether any argument is named, which selects the named binder.
pub fn has_named(args: &[Arg<'_>]) -> bool {
    args.iter().any(|arg| matches!(arg, Arg::Named { .. }))
}

/// Why a candidate was dropped.
#[derive(Debug)]
pub enum Rejection {
    /// Not a match; say nothing.
    Silent(&'static str),
    /// Not a match, with an error to show if this was the last candidate.
    Report(Error),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent(reason) => f.write_str(reason),
            Self::Report(err) => write!(f, "{err}"),
        }
    }
}

/// Parameter name to converted value for one matched template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Binding(BTreeMap<String, Value>);

impl Binding {
    /// Value bound to a parameter.
    pub fn get(&self, param: &str) -> Option<&Value> {
        self.0.get(param)
    }

    /// Whether a parameter is bound.
    pub fn contains(&self, param: &str) -> bool {
        self.0.contains_key(param)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bound parameters ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn insert(&mut self, param: impl Into<String>, value: Value) {
        self.0.insert(param.into(), value);
    }
}

impl FromIterator<(String, Value)> for Binding {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

type BindResult = std::result::Result<Binding, Rejection>;

/// Bind positionally: token `i` fills part `i`.
///
/// When the counts differ the template still matches if every parameter has
/// a default and exactly the signature words were typed (abbreviated as
/// usual). All parameters then take their defaults.
pub fn bind_positional(
    template: &CommandTemplate,
    tokens: &[String],
    separator: char,
) -> BindResult {
    let parts = template.parts();

    if parts.len() != tokens.len() {
        let relaxed = template.all_params_have_default()
            && parts.len() - template.default_count() == tokens.len();
        if !relaxed {
            return Err(Rejection::Silent("argument count differs"));
        }
        if !words_match(template.signature_words(), tokens.iter().map(String::as_str)) {
            return Err(Rejection::Silent("signature word mismatch"));
        }
        return Ok(defaults(template));
    }

    let mut binding = Binding::default();
    for (part, token) in parts.iter().zip(tokens) {
        match part {
            Part::Signature(word) => {
                if !word.starts_with(token.as_str()) {
                    return Err(Rejection::Silent("signature word mismatch"));
                }
            },
            Part::Param(index) => {
                let option = &template.options()[*index];
                let param = template.param_of(option);
                let value = convert(token, param.ty, separator).map_err(|_| {
                    Rejection::Report(Error::IncorrectArgumentType {
                        param: option.name.clone(),
                        expected: param.ty,
                    })
                })?;
                binding.insert(param.name.clone(), value);
            },
        }
    }
    Ok(binding)
}

/// Bind `key=value` arguments by option-name prefix.
///
/// Positional tokens must be exactly the template's signature words, in
/// order. Options not given fall back to their defaults; a missing required
/// option is reported before any value is converted.
pub fn bind_named(template: &CommandTemplate, args: &[Arg<'_>], separator: char) -> BindResult {
    let positional: Vec<&str> = args
        .iter()
        .filter_map(|arg| match arg {
            Arg::Positional(token) => Some(*token),
            Arg::Named { .. } => None,
        })
        .collect();

    if positional.len() != template.signature_word_count() {
        return Err(Rejection::Silent("signature word count differs"));
    }
    if !words_match(template.signature_words(), positional.iter().copied()) {
        return Err(Rejection::Silent("signature word mismatch"));
    }

    let options = template.options();
    let mut supplied: Vec<Option<&str>> = vec![None; options.len()];

    for arg in args {
        let Arg::Named { key, value } = *arg else {
            continue;
        };
        let mut matches = options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.name.starts_with(key));
        let Some((index, option)) = matches.next() else {
            return Err(Rejection::Silent("no option matches key"));
        };
        if matches.next().is_some() {
            return Err(Rejection::Report(Error::AmbiguousOptionName(key.to_string())));
        }
        if supplied[index].replace(value).is_some() {
            return Err(Rejection::Report(Error::DuplicateOption(option.name.clone())));
        }
    }

    let mut binding = Binding::default();
    for (option, value) in options.iter().zip(&supplied) {
        if value.is_none() {
            let Some(default) = &option.default else {
                return Err(Rejection::Report(Error::RequiredOptionMissing(
                    option.name.clone(),
                )));
            };
            binding.insert(template.param_of(option).name.clone(), default.clone());
        }
    }

    for (option, value) in options.iter().zip(supplied) {
        let Some(text) = value else {
            continue;
        };
        let param = template.param_of(option);
        let value = convert(text, param.ty, separator)
            .map_err(|_| Rejection::Silent("option value does not convert"))?;
        binding.insert(param.name.clone(), value);
    }

    Ok(binding)
}

fn words_match<'w, 't>(
    words: impl Iterator<Item = &'w str>,
    tokens: impl Iterator<Item = &'t str>,
) -> bool {
    words.zip(tokens).all(|(word, token)| word.starts_with(token))
}

fn defaults(template: &CommandTemplate) -> Binding {
    template
        .options()
        .iter()
        .filter_map(|option| {
            option
                .default
                .clone()
                .map(|value| (template.param_of(option).name.clone(), value))
        })
        .collect()
}
