//! CLI error handling with semantic exit codes.
//!
//! Every failing command line is reported on stderr and processing moves on
//! to the next line. The process exit code is the category of the last
//! failure, so scripts can tell the kinds of failure apart.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Every line ran |
//! | 1 | `Internal` | A handler failed or I/O broke |
//! | 2 | `Usage` | Bad arguments for a known command |
//! | 3 | `NotFound` | No command matches the line |
//! | 4 | `Ambiguous` | Several commands or options match |
//! | 5 | `Config` | Settings, manifest or command declarations are invalid |
//!
//! # Usage
//!
//! ```bash
//! shorthand --non-interactive "u f Alice 24"
//! case $? in
//!     0) echo "Success" ;;
//!     4) echo "Be more specific" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

use shorthand_core::Error as CoreError;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    ///
    /// Handler failures and broken terminals end up here.
    Internal = 1,

    /// Invalid arguments for a command (exit code 2).
    Usage = 2,

    /// No command matches (exit code 3).
    NotFound = 3,

    /// Several commands or option names match (exit code 4).
    Ambiguous = 4,

    /// Settings, manifest or declarations are invalid (exit code 5).
    Config = 5,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Ambiguous => "ambiguous",
            Self::Config => "configuration error",
        }
    }

    /// Categorize an interpreter error.
    #[must_use]
    pub fn of(err: &CoreError) -> Self {
        if err.is_ambiguity() {
            return Self::Ambiguous;
        }
        match err {
            CoreError::CommandNotFound(_) => Self::NotFound,
            CoreError::Io(_) | CoreError::IncompleteBinding { .. } | CoreError::NoHandler(_) => {
                Self::Internal
            },
            _ => match err.category() {
                "resolve" | "conversion" => Self::Usage,
                _ => Self::Config,
            },
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// ```rust,ignore
/// use shorthand_cli::error::{CliError, ErrorCategory};
/// use anyhow::anyhow;
///
/// let err = CliError::new(ErrorCategory::Config, anyhow!("bad manifest"));
/// assert_eq!(err.exit_code(), 5);
/// ```
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.source()
    }
}

/// Extension trait for converting errors to `CliError`.
pub trait IntoCliError {
    /// Convert to a `CliError` with an explicit category.
    fn with_category(self, category: ErrorCategory) -> CliError;
}

impl<E: Into<anyhow::Error>> IntoCliError for E {
    fn with_category(self, category: ErrorCategory) -> CliError {
        CliError::new(category, self)
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// A `CliError` keeps its category; an interpreter error is categorized by
/// kind; anything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    err.downcast_ref::<CoreError>()
        .map_or(ErrorCategory::Internal, ErrorCategory::of)
        .exit_code()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    mod error_category {
        use super::*;

        #[test]
        fn test_exit_codes() {
            assert_eq!(ErrorCategory::Internal.exit_code(), 1);
            assert_eq!(ErrorCategory::Usage.exit_code(), 2);
            assert_eq!(ErrorCategory::NotFound.exit_code(), 3);
            assert_eq!(ErrorCategory::Ambiguous.exit_code(), 4);
            assert_eq!(ErrorCategory::Config.exit_code(), 5);
        }

        #[test]
        fn test_resolution_errors() {
            assert_eq!(
                ErrorCategory::of(&CoreError::CommandNotFound("x".into())),
                ErrorCategory::NotFound
            );
            assert_eq!(
                ErrorCategory::of(&CoreError::TooManyArguments),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::of(&CoreError::RequiredOptionMissing("name".into())),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::of(&CoreError::Conversion {
                    value: "x".into(),
                    expected: "i32".into(),
                }),
                ErrorCategory::Usage
            );
        }

        #[test]
        fn test_ambiguity_errors() {
            for err in [
                CoreError::AmbiguousCommand {
                    candidates: vec!["user find".into(), "upload file".into()],
                },
                CoreError::TooAmbiguous { count: 12 },
                CoreError::AmbiguousOptionName("a".into()),
            ] {
                assert_eq!(ErrorCategory::of(&err), ErrorCategory::Ambiguous, "{err}");
            }
        }

        #[test]
        fn test_declaration_errors_are_config() {
            assert_eq!(
                ErrorCategory::of(&CoreError::Config("bad".into())),
                ErrorCategory::Config
            );
            assert_eq!(
                ErrorCategory::of(&CoreError::UnsupportedType("map".into())),
                ErrorCategory::Config
            );
            assert_eq!(
                ErrorCategory::of(&CoreError::NoHandler("x".into())),
                ErrorCategory::Internal
            );
        }

        #[test]
        fn test_display() {
            assert_eq!(ErrorCategory::NotFound.to_string(), "not found");
            assert_eq!(ErrorCategory::Config.to_string(), "configuration error");
        }
    }

    mod cli_error {
        use super::*;

        #[test]
        fn test_explicit_category() {
            let err = CliError::new(ErrorCategory::Config, anyhow!("manifest missing"));
            assert_eq!(err.exit_code(), 5);
            assert_eq!(err.to_string(), "manifest missing");
        }

        #[test]
        fn test_with_category_overrides_core_kind() {
            // Given: an interpreter error that would otherwise be a usage error
            let err = CoreError::TooManyArguments.with_category(ErrorCategory::Config);

            // Then: the explicit category wins
            assert_eq!(err.category, ErrorCategory::Config);
            assert_eq!(err.to_string(), "Entered too many arguments");
        }
    }

    mod exit_code_from_error {
        use super::*;

        #[test]
        fn test_cli_error_keeps_category() {
            let err: anyhow::Error = anyhow!("bad").with_category(ErrorCategory::Usage).into();
            assert_eq!(exit_code_from_error(&err), 2);
        }

        #[test]
        fn test_core_error_is_categorized() {
            let err: anyhow::Error = CoreError::CommandNotFound("frob".into()).into();
            assert_eq!(exit_code_from_error(&err), 3);
        }

        #[test]
        fn test_other_errors_are_internal() {
            assert_eq!(exit_code_from_error(&anyhow!("boom")), 1);
        }
    }
}
