//! Help text for registered commands.
//!
//! ```text
//! user find {name} {age}
//!   Command to search for a user by name and age
//!
//!     name      string    required
//!       User name. Case sensitive.
//!
//!     age       i32       not required. Default value: 24
//!       User age. The maximum value is 90 years.
//! ```

use std::io::{self, Write};

use colored::Colorize;
use shorthand_core::{CommandOption, CommandTemplate, Registry, TemplateId};

/// Write the description of one command.
///
/// Array defaults are joined with `separator`.
pub fn write_help<W: Write>(
    writer: &mut W,
    template: &CommandTemplate,
    separator: char,
) -> io::Result<()> {
    writeln!(writer, "{}", template.path().bold())?;
    if !template.help().is_empty() {
        writeln!(writer, "  {}", template.help())?;
    }
    writeln!(writer)?;

    if template.options().is_empty() {
        return Ok(());
    }

    for option in template.options() {
        let ty = template.param_of(option).ty.to_string();
        writeln!(
            writer,
            "    {}{}{}",
            format!("{:<10}", option.name).green(),
            format!("{ty:<10}").cyan(),
            requirement(option, separator)
        )?;
        if !option.help.is_empty() {
            writeln!(writer, "      {}", option.help)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)
}

/// Write the descriptions of several commands, in the given order.
pub fn write_help_for<W: Write>(
    writer: &mut W,
    registry: &Registry,
    ids: &[TemplateId],
    separator: char,
) -> io::Result<()> {
    for template in ids.iter().filter_map(|id| registry.get(*id)) {
        write_help(writer, template, separator)?;
    }
    Ok(())
}

fn requirement(option: &CommandOption, separator: char) -> String {
    option.default.as_ref().map_or_else(
        || "required".yellow().to_string(),
        |default| {
            format!(
                "not required. Default value: {}",
                default.to_text(separator)
            )
        },
    )
}
