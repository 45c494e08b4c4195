//! Error types and handling for shorthand-core operations.
//!
//! This module provides one error type covering every failure the interpreter
//! can report. Errors are categorized so callers can tell configuration
//! mistakes (fatal, surfaced once at startup) from resolution failures (the
//! user typed something that does not match; the prompt loop continues).
//!
//! ## Error Categories
//!
//! - **Template errors**: malformed paths, unknown or unbound parameters,
//!   unsupported parameter types, invalid defaults, duplicate names
//! - **Resolution errors**: empty command, command not found, too many
//!   arguments, incorrect argument type, ambiguous or missing options,
//!   ambiguous commands
//! - **Conversion errors**: a string that cannot become the requested type
//! - **Dispatch errors**: partial bindings, missing handlers
//! - **Configuration errors**: invalid settings or unreadable config files
//!
//! ## Recovery Hints
//!
//! ```rust
//! use shorthand_core::Error;
//!
//! let err = Error::CommandNotFound("frobnicate".to_string());
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "resolve");
//!
//! let err = Error::UnsupportedType("int[][]".to_string());
//! assert!(!err.is_recoverable());
//! assert_eq!(err.category(), "template");
//! ```

use thiserror::Error;

use crate::types::ParamType;

/// The main error type for shorthand-core operations.
///
/// All fallible public functions return `Result<T, Error>`. `Display` gives a
/// message suitable for printing straight back to the person at the prompt.
#[derive(Error, Debug)]
pub enum Error {
    /// A command path could not be parsed.
    ///
    /// ## Common Causes
    ///
    /// - Empty path
    /// - A placeholder missing its closing brace (`{name`)
    /// - A path that starts with a placeholder instead of a command word
    #[error("Malformed command path '{path}': {reason}")]
    MalformedPath {
        /// Path as written by the registry author.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A placeholder or option refers to a parameter the template does not declare.
    #[error("Unknown parameter '{name}' referenced in '{path}'")]
    UnknownParameter {
        /// Path of the template being built.
        path: String,
        /// Name that could not be resolved.
        name: String,
    },

    /// A declared parameter never appears as a placeholder in the path.
    #[error("Parameter '{name}' does not appear in path '{path}'")]
    UnboundParameter {
        /// Path of the template being built.
        path: String,
        /// Parameter left without a slot.
        name: String,
    },

    /// A parameter type is not convertible from text.
    ///
    /// Only scalars and one-dimensional arrays of scalars are supported.
    #[error("Unsupported parameter type '{0}'")]
    UnsupportedType(String),

    /// An option default cannot be converted to its parameter's type.
    #[error("Invalid default '{value}' for option '{option}': expected {expected}")]
    InvalidDefault {
        /// Option carrying the default.
        option: String,
        /// Default as written.
        value: String,
        /// Type the default had to convert to.
        expected: ParamType,
    },

    /// A name that must be unique was declared twice.
    #[error("Duplicate {kind} '{name}' in '{path}'")]
    DuplicateName {
        /// What kind of name collided (parameter, option, placeholder, command).
        kind: &'static str,
        /// The colliding name.
        name: String,
        /// Path of the template (or registry entry) involved.
        path: String,
    },

    /// Nothing was left to resolve after stripping option flags.
    #[error("Command is empty")]
    EmptyCommand,

    /// A single-line resolve was handed several lines.
    #[error("Expected one command line, got {0}")]
    MultipleLines(usize),

    /// No template matches the input.
    ///
    /// Carries the unmatched leading word, or the whole line when candidates
    /// were eliminated during binding.
    #[error("Command not found: '{0}'")]
    CommandNotFound(String),

    /// Every candidate has fewer parts than tokens supplied.
    #[error("Entered too many arguments")]
    TooManyArguments,

    /// A positional argument failed conversion on the last remaining candidate.
    #[error("Incorrect argument '{param}': type must be {expected}")]
    IncorrectArgumentType {
        /// Option name of the slot that failed.
        param: String,
        /// Declared type of the slot.
        expected: ParamType,
    },

    /// A `key=value` key is a prefix of more than one option name.
    #[error("Ambiguous option name: '{0}'")]
    AmbiguousOptionName(String),

    /// Two `key=value` arguments resolved to the same option.
    #[error("Option '{0}' is set more than once")]
    DuplicateOption(String),

    /// An option without a default was not supplied.
    #[error("Required option '{0}' not set")]
    RequiredOptionMissing(String),

    /// Several templates match and no choice was made.
    #[error("Ambiguous command, {} templates match: {}", candidates.len(), candidates.join(" | "))]
    AmbiguousCommand {
        /// Labels of the matching templates.
        candidates: Vec<String>,
    },

    /// More templates match than can be offered as a numbered choice.
    #[error(
        "Ambiguous command, {count} templates match. If you have shortened commands, please add more characters"
    )]
    TooAmbiguous {
        /// Number of templates still matching.
        count: usize,
    },

    /// A string could not be converted to the requested type.
    #[error("Cannot convert '{value}' to {expected}")]
    Conversion {
        /// Input text.
        value: String,
        /// Name of the target type.
        expected: String,
    },

    /// A binding is missing a value for one of the template's parameters.
    #[error("Incomplete binding for '{path}': no value for '{missing}'")]
    IncompleteBinding {
        /// Path of the matched template.
        path: String,
        /// Parameter without a value.
        missing: String,
    },

    /// A matched template has no registered handler.
    #[error("No handler registered for '{0}'")]
    NoHandler(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed (reading config or manifest files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check whether the interpreter can carry on after this error.
    ///
    /// Resolution and conversion failures describe bad input: they are
    /// reported and the next command is read. Template, configuration and
    /// I/O failures mean the registry itself is unusable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.category(), "resolve" | "conversion" | "dispatch")
    }

    /// Get the error category as a string identifier.
    ///
    /// - `"template"` - registry construction
    /// - `"resolve"` - matching and binding user input
    /// - `"conversion"` - string to value conversion
    /// - `"dispatch"` - handing a binding to its handler
    /// - `"config"` - settings
    /// - `"io"` - file access
    /// - `"serialization"` - TOML decoding
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::MalformedPath { .. }
            | Self::UnknownParameter { .. }
            | Self::UnboundParameter { .. }
            | Self::UnsupportedType(_)
            | Self::InvalidDefault { .. }
            | Self::DuplicateName { .. } => "template",
            Self::EmptyCommand
            | Self::MultipleLines(_)
            | Self::CommandNotFound(_)
            | Self::TooManyArguments
            | Self::IncorrectArgumentType { .. }
            | Self::AmbiguousOptionName(_)
            | Self::DuplicateOption(_)
            | Self::RequiredOptionMissing(_)
            | Self::AmbiguousCommand { .. }
            | Self::TooAmbiguous { .. } => "resolve",
            Self::Conversion { .. } => "conversion",
            Self::IncompleteBinding { .. } | Self::NoHandler(_) => "dispatch",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Whether the error means "several commands could be meant".
    #[must_use]
    pub const fn is_ambiguity(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousCommand { .. } | Self::TooAmbiguous { .. } | Self::AmbiguousOptionName(_)
        )
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
