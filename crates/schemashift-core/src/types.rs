use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Primitive type names understood by the target engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeCode {
    Bool,
    Bytes,
    Date,
    Float32,
    Float64,
    Int64,
    Json,
    Numeric,
    String,
    Timestamp,
}

impl TypeCode {
    /// Canonical DDL spelling of the type name.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeCode::Bool => "BOOL",
            TypeCode::Bytes => "BYTES",
            TypeCode::Date => "DATE",
            TypeCode::Float32 => "FLOAT32",
            TypeCode::Float64 => "FLOAT64",
            TypeCode::Int64 => "INT64",
            TypeCode::Json => "JSON",
            TypeCode::Numeric => "NUMERIC",
            TypeCode::String => "STRING",
            TypeCode::Timestamp => "TIMESTAMP",
        }
    }

    /// Whether the type carries a declared length.
    pub fn is_sized(self) -> bool {
        matches!(self, TypeCode::String | TypeCode::Bytes)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared length of a STRING or BYTES column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Unbounded, rendered as `MAX`.
    Max,
    Bounded(u64),
}

impl Default for Length {
    fn default() -> Self {
        Length::Bounded(0)
    }
}

/// Target column type: primitive name, length and array flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TargetType {
    pub name: TypeCode,
    #[serde(default)]
    pub len: Length,
    #[serde(default)]
    pub is_array: bool,
}

impl TargetType {
    /// Scalar type without a length.
    pub fn scalar(name: TypeCode) -> Self {
        Self {
            name,
            len: Length::default(),
            is_array: false,
        }
    }

    /// Variable-length type with an explicit length.
    pub fn sized(name: TypeCode, len: Length) -> Self {
        Self {
            name,
            len,
            is_array: false,
        }
    }

    /// Unbounded `STRING(MAX)`.
    pub fn unbounded_string() -> Self {
        Self::sized(TypeCode::String, Length::Max)
    }

    /// Array of this type.
    pub fn into_array(self) -> Self {
        Self {
            is_array: true,
            ..self
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = if self.name.is_sized() {
            match self.len {
                Length::Max => format!("{}(MAX)", self.name),
                Length::Bounded(len) => format!("{}({len})", self.name),
            }
        } else {
            self.name.to_string()
        };

        if self.is_array {
            write!(f, "ARRAY<{base}>")
        } else {
            f.write_str(&base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ddl_spelling() {
        assert_eq!(TargetType::scalar(TypeCode::Int64).to_string(), "INT64");
        assert_eq!(TargetType::unbounded_string().to_string(), "STRING(MAX)");
        assert_eq!(
            TargetType::sized(TypeCode::Bytes, Length::Bounded(16))
                .into_array()
                .to_string(),
            "ARRAY<BYTES(16)>"
        );
    }
}
