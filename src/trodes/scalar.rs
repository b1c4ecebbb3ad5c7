use serde::Serialize;
use std::fmt;

/// Fixed-width scalar types a field may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

/// Header type tokens and the scalar types they name.
const TYPE_TOKENS: &[(&str, ScalarType)] = &[
    ("uint8", ScalarType::UInt8),
    ("uint16", ScalarType::UInt16),
    ("uint32", ScalarType::UInt32),
    ("uint64", ScalarType::UInt64),
    ("int8", ScalarType::Int8),
    ("int16", ScalarType::Int16),
    ("int32", ScalarType::Int32),
    ("int64", ScalarType::Int64),
    ("float32", ScalarType::Float32),
    ("float64", ScalarType::Float64),
    ("single", ScalarType::Float32),
    ("double", ScalarType::Float64),
];

impl ScalarType {
    /// Resolve a header type token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        TYPE_TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, ty)| *ty)
    }

    /// Width of one value in bytes
    pub fn width(self) -> usize {
        match self {
            ScalarType::UInt8 | ScalarType::Int8 => 1,
            ScalarType::UInt16 | ScalarType::Int16 => 2,
            ScalarType::UInt32 | ScalarType::Int32 | ScalarType::Float32 => 4,
            ScalarType::UInt64 | ScalarType::Int64 | ScalarType::Float64 => 8,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ScalarType::UInt8 => "uint8",
            ScalarType::UInt16 => "uint16",
            ScalarType::UInt32 => "uint32",
            ScalarType::UInt64 => "uint64",
            ScalarType::Int8 => "int8",
            ScalarType::Int16 => "int16",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Float32 => "float32",
            ScalarType::Float64 => "float64",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
