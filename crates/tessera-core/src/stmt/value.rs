use super::Type;
use crate::reflect::{KeyType, Object};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// String value
    String(String),

    /// UUID value
    Uuid(uuid::Uuid),

    /// Null value
    #[default]
    Null,

    /// An instance of a class: an entity, an embedded object or a key class
    Object(Object),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_object(&self) -> &Object {
        match self {
            Self::Object(object) => object,
            _ => panic!("expected object, but was {self:?}"),
        }
    }

    /// Infers the type of the value.
    pub fn infer_ty(&self) -> Type {
        match self {
            Self::Bool(_) => Type::Bool,
            Self::I32(_) => Type::I32,
            Self::I64(_) => Type::I64,
            Self::String(_) => Type::String,
            Self::Uuid(_) => Type::Uuid,
            Self::Null => Type::Null,
            Self::Object(object) => Type::Object(object.class().name().to_string()),
        }
    }

    /// Returns `true` if the value can be stored in a slot of type `ty`.
    ///
    /// `Null` is assignable to every type.
    pub fn is_a(&self, ty: &Type) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(_) => ty.is_bool(),
            Self::I32(_) => ty.is_i32(),
            Self::I64(_) => ty.is_i64(),
            Self::String(_) => ty.is_string(),
            Self::Uuid(_) => ty.is_uuid(),
            Self::Object(object) => ty.as_object() == Some(object.class().name()),
        }
    }

    /// The runtime "class" of the value when it is used as a primary key.
    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Object(object) => KeyType::Class(object.class().clone()),
            _ => KeyType::Scalar(self.infer_ty()),
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(src: uuid::Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<Object> for Value {
    fn from(src: Object) -> Self {
        Self::Object(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}
