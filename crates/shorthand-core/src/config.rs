//! Parser settings.
//!
//! The lexical elements a user types are configurable: the sigil that marks
//! flags such as `/?`, the separator between array elements, and how many
//! matching templates may be offered as a numbered choice before the input is
//! rejected as too ambiguous.
//!
//! ## File Location
//!
//! Settings are read from `config.toml` in the platform config directory:
//!
//! - Linux: `~/.config/shorthand/config.toml`
//! - macOS: `~/Library/Application Support/dev.outfitter.shorthand/config.toml`
//! - Windows: `%APPDATA%\outfitter\shorthand\config\config.toml`
//!
//! `SHORTHAND_CONFIG` overrides the location. A missing file means defaults.
//!
//! ```toml
//! option_char = "/"
//! array_separator = ","
//! max_choices = 9
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::DEFAULT_ARRAY_SEPARATOR;
use crate::{Error, Result};

/// Default flag sigil.
pub const DEFAULT_OPTION_CHAR: char = '/';

/// Default cap on numbered choices. Choices are single digits.
pub const DEFAULT_MAX_CHOICES: usize = 9;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "SHORTHAND_CONFIG";

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Sigil that marks flags (`/?`, `/help`).
    pub option_char: char,
    /// Separator between array elements.
    pub array_separator: char,
    /// Most matches that are offered as a choice.
    pub max_choices: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            option_char: DEFAULT_OPTION_CHAR,
            array_separator: DEFAULT_ARRAY_SEPARATOR,
            max_choices: DEFAULT_MAX_CHOICES,
        }
    }
}

impl ParserConfig {
    /// Load and validate settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds invalid settings.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded parser config");
        Ok(config)
    }

    /// Load settings from the default location, or defaults if the file does
    /// not exist.
    pub fn load_default() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Location of the settings file, honouring `SHORTHAND_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let project_dirs = directories::ProjectDirs::from("dev", "outfitter", "shorthand")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Check that the settings can be told apart from ordinary input.
    pub fn validate(&self) -> Result<()> {
        for (what, c) in [
            ("option_char", self.option_char),
            ("array_separator", self.array_separator),
        ] {
            if c.is_whitespace() || matches!(c, '"' | '\'' | '\\' | '=') {
                return Err(Error::Config(format!(
                    "{what} cannot be {c:?}: it is already part of the input syntax"
                )));
            }
        }
        if self.option_char == self.array_separator {
            return Err(Error::Config(
                "option_char and array_separator must differ".into(),
            ));
        }
        if !(1..=DEFAULT_MAX_CHOICES).contains(&self.max_choices) {
            return Err(Error::Config(format!(
                "max_choices must be between 1 and {DEFAULT_MAX_CHOICES}, got {}",
                self.max_choices
            )));
        }
        Ok(())
    }
}
