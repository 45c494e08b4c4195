//! Declaring templates in a TOML manifest.
//!
//! ```toml
//! [[command]]
//! path = "user find {name} {age}"
//! help = "Search for a user"
//!
//!   [[command.param]]
//!   name = "user_name"
//!   type = "string"
//!
//!   [[command.param]]
//!   name = "age"
//!   type = "int"
//!
//!   [[command.option]]
//!   param = "user_name"
//!   name = "name"
//!   help = "User name. Case sensitive."
//!
//!   [[command.option]]
//!   param = "age"
//!   default = 24
//! ```
//!
//! Every entry goes through [`CommandTemplate::builder`], so a manifest is
//! held to the same rules as templates declared in code.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::template::{CommandTemplate, OptionSpec};
use crate::types::ParamType;
use crate::{Error, Result};

/// A parsed manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Declared commands, in file order.
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandEntry>,
}

/// One `[[command]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandEntry {
    /// Template path.
    pub path: String,
    /// Help text.
    #[serde(default)]
    pub help: Option<String>,
    /// Parameters in handler order.
    #[serde(default, rename = "param")]
    pub params: Vec<ParamEntry>,
    /// Option metadata.
    #[serde(default, rename = "option")]
    pub options: Vec<OptionEntry>,
}

/// One `[[command.param]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamEntry {
    /// Parameter name.
    pub name: String,
    /// Type name such as `int`, `f64` or `string[]`.
    #[serde(rename = "type", default = "default_type")]
    pub ty: String,
}

fn default_type() -> String {
    ParamType::STRING.to_string()
}

/// One `[[command.option]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionEntry {
    /// Parameter the option describes.
    pub param: String,
    /// Alias.
    #[serde(default)]
    pub name: Option<String>,
    /// Default, as a string or a TOML scalar or array.
    #[serde(default)]
    pub default: Option<toml::Value>,
    /// Help text.
    #[serde(default)]
    pub help: Option<String>,
}

impl Manifest {
    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let manifest = Self::parse(&text)?;
        debug!(path = %path.display(), commands = manifest.commands.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Build every declared template. Array defaults given as text are split
    /// on `separator`.
    pub fn templates(&self, separator: char) -> Result<Vec<CommandTemplate>> {
        self.commands
            .iter()
            .map(|entry| entry.template(separator))
            .collect()
    }
}

impl CommandEntry {
    /// Build this entry's template.
    pub fn template(&self, separator: char) -> Result<CommandTemplate> {
        let mut builder = CommandTemplate::builder(&self.path).array_separator(separator);
        if let Some(help) = &self.help {
            builder = builder.help(help);
        }
        for param in &self.params {
            builder = builder.param(&param.name, param.ty.parse::<ParamType>()?);
        }
        for option in &self.options {
            let mut spec = OptionSpec::new(&option.param);
            if let Some(name) = &option.name {
                spec = spec.name(name);
            }
            if let Some(default) = &option.default {
                spec = spec.default(default_text(default, separator).ok_or_else(|| {
                    Error::InvalidDefault {
                        option: option.name.clone().unwrap_or_else(|| option.param.clone()),
                        value: default.to_string(),
                        expected: self.param_type(&option.param),
                    }
                })?);
            }
            if let Some(help) = &option.help {
                spec = spec.help(help);
            }
            builder = builder.option(spec);
        }
        builder.build()
    }

    fn param_type(&self, name: &str) -> ParamType {
        self.params
            .iter()
            .find(|param| param.name == name)
            .and_then(|param| param.ty.parse().ok())
            .unwrap_or(ParamType::STRING)
    }
}

/// Render a TOML default the way a user would have typed it.
fn default_text(value: &toml::Value, separator: char) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Integer(n) => Some(n.to_string()),
        toml::Value::Float(n) => Some(n.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    toml::Value::Array(_) | toml::Value::Table(_) => None,
                    scalar => default_text(scalar, separator),
                })
                .collect::<Option<Vec<_>>>()?;
            Some(parts.join(&separator.to_string()))
        },
        toml::Value::Datetime(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{ScalarType, Value};

    const DEMO: &str = r#"
[[command]]
path = "user find {name} {age}"
help = "Command to search for a user by name and age"

  [[command.param]]
  name = "user_name"

  [[command.param]]
  name = "age"
  type = "int"

  [[command.option]]
  param = "user_name"
  name = "name"
  help = "User name. Case sensitive."

  [[command.option]]
  param = "age"
  default = 24
  help = "User age. The maximum value is 90 years."

[[command]]
path = "product counts {counts} {prices}"

  [[command.param]]
  name = "counts"
  type = "int[]"

  [[command.param]]
  name = "prices"
  type = "double[]"

  [[command.option]]
  param = "prices"
  default = [1.5, 2]
"#;

    #[test]
    fn test_manifest_builds_templates() {
        // Given: a manifest with two commands
        let manifest = Manifest::parse(DEMO).unwrap();

        // When: building templates
        let templates = manifest.templates(',').unwrap();

        // Then: types, aliases and defaults carry through
        assert_eq!(templates.len(), 2);
        let user = &templates[0];
        assert_eq!(user.help(), "Command to search for a user by name and age");
        assert_eq!(user.param("user_name").unwrap().ty, ParamType::STRING);
        assert_eq!(user.option("age").unwrap().default, Some(Value::I32(24)));
        assert_eq!(user.option("name").unwrap().help, "User name. Case sensitive.");

        let product = &templates[1];
        assert_eq!(
            product.param("counts").unwrap().ty,
            ParamType::Array(ScalarType::I32)
        );
        assert_eq!(
            product.option("prices").unwrap().default,
            Some(Value::Array(vec![Value::F64(1.5), Value::F64(2.0)]))
        );
    }

    #[test]
    fn test_manifest_errors_surface_from_builder() {
        let manifest = Manifest::parse(
            r#"
[[command]]
path = "user {name}"
  [[command.param]]
  name = "name"
  type = "decimal"
"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.templates(','),
            Err(Error::UnsupportedType(_))
        ));

        let manifest = Manifest::parse(
            r#"
[[command]]
path = "user {name}"
"#,
        )
        .unwrap();
        assert!(matches!(
            manifest.templates(','),
            Err(Error::UnknownParameter { .. })
        ));
    }

    #[test]
    fn test_table_default_is_invalid() {
        let manifest = Manifest::parse(
            r#"
[[command]]
path = "wait {secs}"
  [[command.param]]
  name = "secs"
  type = "u32"
  [[command.option]]
  param = "secs"
  default = { a = 1 }
"#,
        )
        .unwrap();
        let err = manifest.templates(',').unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDefault { expected, .. } if expected == ParamType::Scalar(ScalarType::U32)
        ));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = Manifest::parse("[[command]]\npath = \"x\"\nhlep = \"typo\"\n").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }

    #[test]
    fn test_load_reads_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("commands.toml");
        fs::write(&path, DEMO)?;

        let manifest = Manifest::load(&path)?;
        assert_eq!(manifest.commands.len(), 2);
        Ok(())
    }
}
