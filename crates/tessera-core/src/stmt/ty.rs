use std::fmt;

/// The type of a [`Value`](super::Value).
///
/// For attributes this is the attribute classification; for columns it is
/// the data type the session platform converts values into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// String type
    String,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// UUID value
    Uuid,

    /// An instance of the named class
    Object(String),

    /// The null type can be assigned to any type.
    Null,
}

impl Type {
    /// Parses one of the scalar type names understood by the registry.
    pub fn from_scalar_name(name: &str) -> Option<Type> {
        match name {
            "bool" => Some(Type::Bool),
            "string" | "String" => Some(Type::String),
            "i32" => Some(Type::I32),
            "i64" => Some(Type::I64),
            "uuid" | "Uuid" => Some(Type::Uuid),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_i32(&self) -> bool {
        matches!(self, Self::I32)
    }

    pub fn is_i64(&self) -> bool {
        matches!(self, Self::I64)
    }

    pub fn is_uuid(&self) -> bool {
        matches!(self, Self::Uuid)
    }

    pub fn as_object(&self) -> Option<&str> {
        match self {
            Self::Object(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::Uuid => f.write_str("uuid"),
            Self::Object(name) => f.write_str(name),
            Self::Null => f.write_str("null"),
        }
    }
}
