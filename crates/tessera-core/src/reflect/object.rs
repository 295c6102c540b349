use super::Class;
use crate::{stmt::Value, Error, Result};

use std::{fmt, sync::Arc};

/// An instance of a [`Class`].
///
/// Field values are stored positionally, parallel to the class's declared
/// fields.
#[derive(Clone)]
pub struct Object {
    class: Arc<Class>,
    values: Vec<Value>,
}

impl Object {
    pub(crate) fn blank(class: Arc<Class>) -> Object {
        let values = vec![Value::Null; class.fields().len()];
        Object { class, values }
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Returns the value of field `name`, or `None` if the class declares no
    /// such field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.class
            .field_index(name)
            .map(|index| &self.values[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.class
            .field_index(name)
            .map(|index| &mut self.values[index])
    }

    /// Assigns field `name`.
    ///
    /// Fails if the class declares no such field or the value is not
    /// assignable to the field's type.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let index = self
            .class
            .field_index(name)
            .ok_or_else(|| Error::no_such_field(self.class.name(), name))?;

        let field = self.class.field_at(index);
        if !value.is_a(&field.ty) {
            return Err(Error::type_conversion(value, field.ty.to_string()).context(
                crate::err!("cannot assign field `{}` of `{}`", name, self.class.name()),
            ));
        }

        self.values[index] = value;
        Ok(())
    }

    /// Builder-style [`Object::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Object> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Invokes the zero-argument method `name`.
    pub fn invoke_getter(&self, name: &str) -> Result<Value> {
        self.class.method(name, 0)?.invoke_getter(self)
    }

    /// Invokes the one-argument method `name`.
    pub fn invoke_setter(&mut self, name: &str, value: Value) -> Result<()> {
        let method = self.class.method(name, 1)?.clone();
        method.invoke_setter(self, value)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.class, &other.class) || self.class == other.class)
            && self.values == other.values
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.class.name());
        for (field, value) in self.class.fields().zip(&self.values) {
            s.field(&field.name, value);
        }
        s.finish()
    }
}
