//! Parameter types and typed argument values.
//!
//! A command parameter is declared with a [`ParamType`]: a [`ScalarType`] or a
//! one-dimensional array of one. Every supported type is convertible from the
//! text a user types, which is what makes it a legal parameter type. Type names
//! can be parsed from strings so templates can also be declared in a manifest:
//!
//! ```rust
//! use shorthand_core::{ParamType, ScalarType};
//!
//! assert_eq!("int".parse::<ParamType>()?, ParamType::Scalar(ScalarType::I32));
//! assert_eq!("double[]".parse::<ParamType>()?, ParamType::Array(ScalarType::F64));
//! assert!("int[][]".parse::<ParamType>().is_err());
//! # Ok::<(), shorthand_core::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{Error, Result};

/// A scalar type that can be parsed from a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// `true`/`false`, `1`/`0`, or any prefix of the words.
    Bool,
    /// Exactly one character.
    Char,
    /// Text taken verbatim.
    String,
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// Single precision float.
    F32,
    /// Double precision float.
    F64,
}

impl ScalarType {
    /// Canonical name used in help output and error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "bool" | "boolean" => Self::Bool,
            "char" => Self::Char,
            "string" | "str" | "text" => Self::String,
            "i8" | "sbyte" => Self::I8,
            "i16" | "short" => Self::I16,
            "i32" | "int" => Self::I32,
            "i64" | "long" => Self::I64,
            "u8" | "byte" => Self::U8,
            "u16" | "ushort" => Self::U16,
            "u32" | "uint" => Self::U32,
            "u64" | "ulong" => Self::U64,
            "f32" | "float" | "single" => Self::F32,
            "f64" | "double" => Self::F64,
            _ => return None,
        };
        Some(scalar)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// A single value.
    Scalar(ScalarType),
    /// A separator-delimited list of values of one scalar type.
    Array(ScalarType),
}

impl ParamType {
    /// Shorthand for `ParamType::Scalar(ScalarType::String)`.
    pub const STRING: Self = Self::Scalar(ScalarType::String);

    /// The scalar type of the value or of each array element.
    #[must_use]
    pub const fn element(self) -> ScalarType {
        match self {
            Self::Scalar(scalar) | Self::Array(scalar) => scalar,
        }
    }

    /// Whether values of this type are arrays.
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Array(scalar) => write!(f, "{scalar}[]"),
        }
    }
}

impl From<ScalarType> for ParamType {
    fn from(scalar: ScalarType) -> Self {
        Self::Scalar(scalar)
    }
}

impl FromStr for ParamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        let unsupported = || Error::UnsupportedType(s.to_string());

        if let Some(element) = name.strip_suffix("[]") {
            // Only one level of nesting converts from a flat token.
            if element.ends_with("[]") {
                return Err(unsupported());
            }
            return ScalarType::from_name(element)
                .map(Self::Array)
                .ok_or_else(unsupported);
        }

        ScalarType::from_name(&name)
            .map(Self::Scalar)
            .ok_or_else(unsupported)
    }
}

/// A converted argument value.
///
/// Serializes untagged, so a binding renders as plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Text.
    String(String),
    /// Signed 8-bit integer.
    I8(i8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// Single precision float.
    F32(f32),
    /// Double precision float.
    F64(f64),
    /// Ordered, fixed-length sequence of scalars.
    Array(Vec<Value>),
}

impl Value {
    /// Render the value as text, joining array elements with `separator`.
    ///
    /// Feeding the result back through [`crate::convert`] with the same
    /// separator yields an equal value (strings containing the separator
    /// excepted).
    #[must_use]
    pub fn to_text(&self, separator: char) -> String {
        match self {
            Self::Array(items) => {
                let mut out = String::new();
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(separator);
                    }
                    out.push_str(&item.to_text(separator));
                }
                out
            },
            scalar => scalar.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Array(_) => f.write_str(&self.to_text(',')),
        }
    }
}

/// Typed extraction of a [`Value`], used by command handlers.
///
/// ```rust
/// use shorthand_core::{FromValue, Value};
///
/// let counts = Value::Array(vec![Value::I32(10), Value::I32(20)]);
/// assert_eq!(Vec::<i32>::from_value(&counts), Some(vec![10, 20]));
/// assert_eq!(String::from_value(&counts), None);
/// ```
pub trait FromValue: Sized {
    /// Extract `Self` if the value holds exactly this type.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(*inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(text.clone()),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}
