//! String to typed-value conversion.
//!
//! Conversion never panics. A failure is an [`Error::Conversion`]; the
//! binders treat it as "this candidate does not match" rather than as a fatal
//! error.
//!
//! Booleans are lenient in the way a console user expects: `1`, `t`, `tr`,
//! `tru`, `true` are true; `0`, `f`, ..., `false` are false. Matching is
//! case-exact.

use crate::types::{ParamType, ScalarType, Value};
use crate::{Error, Result};

/// Default separator between array elements.
pub const DEFAULT_ARRAY_SEPARATOR: char = ',';

/// Convert `text` to a value of type `ty`.
///
/// Arrays are split on `separator`; empty elements are skipped and every
/// remaining element must convert to the element type.
///
/// ```rust
/// use shorthand_core::{convert, ParamType, ScalarType, Value};
///
/// let counts = convert("10,20,30", ParamType::Array(ScalarType::I32), ',')?;
/// assert_eq!(counts, Value::Array(vec![Value::I32(10), Value::I32(20), Value::I32(30)]));
///
/// assert!(convert("ten", ParamType::Scalar(ScalarType::I32), ',').is_err());
/// # Ok::<(), shorthand_core::Error>(())
/// ```
pub fn convert(text: &str, ty: ParamType, separator: char) -> Result<Value> {
    match ty {
        ParamType::Scalar(scalar) => convert_scalar(text, scalar),
        ParamType::Array(scalar) => text
            .split(separator)
            .filter(|element| !element.is_empty())
            .map(|element| convert_scalar(element, scalar))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
    }
}

/// Convert a single token to a scalar value.
pub fn convert_scalar(text: &str, ty: ScalarType) -> Result<Value> {
    let value = match ty {
        ScalarType::Bool => parse_bool(text).map(Value::Bool),
        ScalarType::Char => single_char(text).map(Value::Char),
        ScalarType::String => Some(Value::String(text.to_string())),
        ScalarType::I8 => text.parse().ok().map(Value::I8),
        ScalarType::I16 => text.parse().ok().map(Value::I16),
        ScalarType::I32 => text.parse().ok().map(Value::I32),
        ScalarType::I64 => text.parse().ok().map(Value::I64),
        ScalarType::U8 => text.parse().ok().map(Value::U8),
        ScalarType::U16 => text.parse().ok().map(Value::U16),
        ScalarType::U32 => text.parse().ok().map(Value::U32),
        ScalarType::U64 => text.parse().ok().map(Value::U64),
        ScalarType::F32 => text.parse().ok().map(Value::F32),
        ScalarType::F64 => text.parse().ok().map(Value::F64),
    };

    value.ok_or_else(|| Error::Conversion {
        value: text.to_string(),
        expected: ty.to_string(),
    })
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.is_empty() {
        return None;
    }
    if text == "1" || "true".starts_with(text) {
        Some(true)
    } else if text == "0" || "false".starts_with(text) {
        Some(false)
    } else {
        None
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
