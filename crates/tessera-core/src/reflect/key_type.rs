use super::{Class, ClassField, Method, Object};
use crate::{stmt::Type, Error, Result};

use std::{fmt, sync::Arc};

/// The runtime "class" of a primary key.
///
/// A key is either a bare scalar (single-column keys without a dedicated
/// key class) or an instance of a key class with one field or property per
/// key column.
#[derive(Clone)]
pub enum KeyType {
    Scalar(Type),
    Class(Arc<Class>),
}

impl KeyType {
    pub fn name(&self) -> String {
        match self {
            Self::Scalar(ty) => ty.to_string(),
            Self::Class(class) => class.name().to_string(),
        }
    }

    /// Looks up a declared field. Scalar types declare none.
    pub fn field(&self, name: &str) -> Result<&ClassField> {
        match self {
            Self::Class(class) => class.field(name),
            Self::Scalar(ty) => Err(Error::no_such_field(ty.to_string(), name)),
        }
    }

    /// Looks up a method by name and arity. Scalar types declare none.
    pub fn method(&self, name: &str, arity: usize) -> Result<&Method> {
        match self {
            Self::Class(class) => class.method(name, arity),
            Self::Scalar(ty) => Err(Error::no_such_method(ty.to_string(), name)),
        }
    }

    /// Creates a blank instance of the key class.
    ///
    /// Scalar key types have no blank instance and return `Ok(None)`.
    pub fn new_instance(&self) -> Result<Option<Object>> {
        match self {
            Self::Class(class) => class.new_instance().map(Some),
            Self::Scalar(_) => Ok(None),
        }
    }
}

impl PartialEq for KeyType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ty) => write!(f, "KeyType::Scalar({ty})"),
            Self::Class(class) => write!(f, "KeyType::Class({})", class.name()),
        }
    }
}

impl From<Type> for KeyType {
    fn from(ty: Type) -> Self {
        Self::Scalar(ty)
    }
}

impl From<Arc<Class>> for KeyType {
    fn from(class: Arc<Class>) -> Self {
        Self::Class(class)
    }
}

impl From<&Arc<Class>> for KeyType {
    fn from(class: &Arc<Class>) -> Self {
        Self::Class(class.clone())
    }
}
