use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::error::ComposeError;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::{NumberType, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}

impl PropertyKey {
    /// Checks that this key can name a method. Only non-empty strings and symbols
    /// qualify.
    pub fn validate_method_name(&self) -> Result<(), ComposeError> {
        match self {
            PropertyKey::Str(s) if s.is_empty() => Err(ComposeError::InvalidArgument(
                "method name must not be empty".to_string(),
            )),
            PropertyKey::Str(_) | PropertyKey::Sym(_) => Ok(()),
            PropertyKey::Int(i) => Err(ComposeError::InvalidArgument(format!(
                "method name must be a string or symbol, got {}",
                i
            ))),
        }
    }

    /// Converts a runtime value into a method name key.
    pub fn from_method_name_value(value: &Value) -> Result<Self, ComposeError> {
        let key = match value {
            Value::String(s) => PropertyKey::Str(s.to_string()),
            Value::Symbol(s) => PropertyKey::Sym(s.clone()),
            other => {
                return Err(ComposeError::InvalidArgument(format!(
                    "method name must be a string or symbol, got {}",
                    other
                )))
            }
        };
        key.validate_method_name()?;
        Ok(key)
    }

    pub fn to_value(&self) -> Value {
        match self {
            PropertyKey::Str(s) => Value::String(s.to_string()),
            PropertyKey::Int(i) => Value::Number(NumberType::Integer(*i as i64)),
            PropertyKey::Sym(s) => Value::Symbol(s.clone()),
        }
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::Str(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::Str(s)
    }
}

impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        PropertyKey::Int(i)
    }
}

impl From<SymbolData> for PropertyKey {
    fn from(s: SymbolData) -> Self {
        PropertyKey::Sym(s)
    }
}

/// An own property slot. There are no accessors and no write protection: a slot is
/// a value plus whether it takes part in copying by `extend`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

impl Property {
    pub fn new(value: Value) -> Self {
        Property {
            value,
            enumerable: true,
        }
    }

    pub fn hidden(value: Value) -> Self {
        Property {
            value,
            enumerable: false,
        }
    }
}
