use std::fmt;

use serde::{Deserialize, Serialize};

use super::UnknownCode;

/// Value type of a user-defined field. Stored and exchanged as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum FieldType {
    String,
    Int,
    Bool,
    Datetime,
}

impl FieldType {
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::String => 1,
            Self::Int => 2,
            Self::Bool => 3,
            Self::Datetime => 4,
        }
    }

    /// Only string and int fields may hold several values.
    #[must_use]
    pub const fn supports_array(self) -> bool {
        matches!(self, Self::String | Self::Int)
    }
}

impl TryFrom<i64> for FieldType {
    type Error = UnknownCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::String),
            2 => Ok(Self::Int),
            3 => Ok(Self::Bool),
            4 => Ok(Self::Datetime),
            _ => Err(UnknownCode {
                kind: "field type",
                code,
            }),
        }
    }
}

impl From<FieldType> for i64 {
    fn from(value: FieldType) -> Self {
        value.code()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
        };
        f.write_str(name)
    }
}
