//! # shorthand-core
//!
//! Core functionality for shorthand - an abbreviation-aware console command
//! interpreter.
//!
//! Commands are declared as templates such as `user find {name} {age}`. The
//! interpreter takes a raw line typed by a person, works out which template
//! was meant (command words may be shortened to any prefix, arguments may be
//! positional or `key=value`), converts the arguments to typed values and
//! hands them to the template's handler.
//!
//! ## Architecture
//!
//! - **Tokenizer**: quote and escape aware splitting, flag stripping
//! - **Templates**: validated command declarations, built in code or from a
//!   TOML manifest
//! - **Binder**: positional and named argument binding with defaults
//! - **Resolver**: candidate filtering and disambiguation
//! - **Dispatch**: typed handler table and a line-by-line interpreter
//! - **Error Handling**: one error type with categories and recovery hints
//!
//! ## Quick Start
//!
//! ```rust
//! use shorthand_core::{
//!     CommandTable, CommandTemplate, Flow, Interpreter, OptionSpec, Outcome, ParamType,
//!     ParserConfig, RefuseAmbiguity, ScalarType,
//! };
//!
//! let mut table: CommandTable<Vec<String>> = CommandTable::new();
//! table.register(
//!     CommandTemplate::builder("user find {name} {age}")
//!         .help("Command to search for a user by name and age")
//!         .param("user_name", ParamType::STRING)
//!         .param("age", ScalarType::I32)
//!         .option(OptionSpec::new("user_name").name("name"))
//!         .option(OptionSpec::new("age").default("24"))
//!         .build()?,
//!     |found, args| {
//!         let name: String = args.get("user_name")?;
//!         let age: i32 = args.get("age")?;
//!         found.push(format!("{name} ({age})"));
//!         Ok(Flow::Continue)
//!     },
//! )?;
//!
//! let interpreter = Interpreter::new(table, ParserConfig::default());
//! let mut found = Vec::new();
//! let outcomes = interpreter.run_line(&mut found, "u f na=Bob", &mut RefuseAmbiguity);
//!
//! assert!(matches!(outcomes[..], [Outcome::Dispatched(Flow::Continue)]));
//! assert_eq!(found, ["Bob (24)"]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use shorthand_core::{Error, ParserConfig, RefuseAmbiguity, Registry, Resolver};
//!
//! let registry = Registry::new();
//! let resolver = Resolver::new(&registry, ParserConfig::default());
//! match resolver.resolve("frobnicate", &mut RefuseAmbiguity) {
//!     Ok(_) => unreachable!(),
//!     Err(Error::CommandNotFound(word)) => assert_eq!(word, "frobnicate"),
//!     Err(e) if e.is_recoverable() => eprintln!("Try again: {e}"),
//!     Err(e) => eprintln!("Fatal error: {e}"),
//! }
//! ```

/// Positional and named argument binding
pub mod binder;
/// Parser settings
pub mod config;
/// String to typed-value conversion
pub mod convert;
/// Handler table and argument access
pub mod dispatch;
/// Error types and result aliases
pub mod error;
/// Line-by-line resolve and dispatch
pub mod interpreter;
/// TOML command manifests
pub mod manifest;
/// Template registry
pub mod registry;
/// Candidate filtering and disambiguation
pub mod resolver;
/// Command templates and their builder
pub mod template;
/// Input tokenizer
pub mod tokenizer;
/// Parameter types and values
pub mod types;

// Re-export commonly used types
pub use binder::{Arg, Binding, Rejection};
pub use config::ParserConfig;
pub use convert::{convert, convert_scalar};
pub use dispatch::{Args, CommandTable, Flow, Handler};
pub use error::{Error, Result};
pub use interpreter::{Interpreter, Outcome};
pub use manifest::Manifest;
pub use registry::{Registry, TemplateId};
pub use resolver::{Choice, Chooser, Match, RefuseAmbiguity, Resolution, Resolver};
pub use template::{CommandOption, CommandTemplate, OptionSpec, Param, Part, TemplateBuilder};
pub use tokenizer::{TokenStream, Tokenizer, split_lines};
pub use types::{FromValue, ParamType, ScalarType, Value};
