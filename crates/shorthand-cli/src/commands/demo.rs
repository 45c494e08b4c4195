//! Sample commands showing typed scalar and array parameters.

use std::io::Write;

use serde_json::json;
use shorthand_core::{
    Args, CommandTable, CommandTemplate, Flow, OptionSpec, ParamType, Result, ScalarType,
};

use super::Session;

/// Register `user find {name} {age}` and `product counts {counts} {prices}`.
pub fn register<W: Write + 'static>(
    table: &mut CommandTable<Session<W>>,
    separator: char,
) -> Result<()> {
    table.register(
        CommandTemplate::builder("user find {name} {age}")
            .help("Command to search for a user by name and age")
            .param("user_name", ParamType::STRING)
            .param("age", ScalarType::I32)
            .option(
                OptionSpec::new("user_name")
                    .name("name")
                    .help("User name. Case sensitive."),
            )
            .option(
                OptionSpec::new("age")
                    .default("24")
                    .help("User age. The maximum value is 90 years."),
            )
            .array_separator(separator)
            .build()?,
        user_find,
    )?;
    table.register(
        CommandTemplate::builder("product counts {counts} {prices}")
            .help("Pair product counts with their prices")
            .param("counts", ParamType::Array(ScalarType::I32))
            .param("prices", ParamType::Array(ScalarType::F64))
            .array_separator(separator)
            .build()?,
        product_counts,
    )?;
    Ok(())
}

fn user_find<W: Write>(session: &mut Session<W>, args: &Args) -> anyhow::Result<Flow> {
    let name: String = args.get("user_name")?;
    let age: i32 = args.get("age")?;

    session.emit(
        &format!("User {name}, age {age}"),
        &json!({ "name": name, "age": age }),
    )?;
    Ok(Flow::Continue)
}

fn product_counts<W: Write>(session: &mut Session<W>, args: &Args) -> anyhow::Result<Flow> {
    let counts: Vec<i32> = args.get("counts")?;
    let prices: Vec<f64> = args.get("prices")?;

    let text = if counts.len() == prices.len() {
        let total: f64 = counts
            .iter()
            .zip(&prices)
            .map(|(count, price)| f64::from(*count) * price)
            .sum();
        format!("{} products, total {total:.2}", counts.len())
    } else {
        format!(
            "{} counts but {} prices",
            counts.len(),
            prices.len()
        )
    };
    session.emit(&text, &json!({ "counts": counts, "prices": prices }))?;
    Ok(Flow::Continue)
}
