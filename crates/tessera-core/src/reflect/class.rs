use super::{getter_name, setter_name, Method, Object};
use crate::{stmt::Type, Error, Result};

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Runtime description of a class.
pub struct Class {
    name: String,

    /// Declared fields, in declaration order.
    fields: IndexMap<String, ClassField>,

    methods: Vec<Method>,

    /// False when the class has no default constructor.
    instantiable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassField {
    pub name: String,
    pub ty: Type,
}

pub struct ClassBuilder {
    class: Class,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            class: Class {
                name: name.into(),
                fields: IndexMap::new(),
                methods: vec![],
                instantiable: true,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = &ClassField> + '_ {
        self.fields.values()
    }

    /// Returns the declared field `name`.
    pub fn field(&self, name: &str) -> Result<&ClassField> {
        self.fields
            .get(name)
            .ok_or_else(|| Error::no_such_field(&self.name, name))
    }

    pub(crate) fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    pub(crate) fn field_at(&self, index: usize) -> &ClassField {
        &self.fields[index]
    }

    /// Returns the method `name` taking `arity` arguments.
    pub fn method(&self, name: &str, arity: usize) -> Result<&Method> {
        self.methods
            .iter()
            .find(|method| method.name() == name && method.arity() == arity)
            .ok_or_else(|| Error::no_such_method(&self.name, name))
    }

    /// Creates an instance with every field set to `Null`.
    pub fn new_instance(self: &Arc<Self>) -> Result<Object> {
        if !self.instantiable {
            return Err(Error::instantiation_failed(
                &self.name,
                "class has no default constructor",
            ));
        }

        Ok(Object::blank(self.clone()))
    }
}

impl ClassBuilder {
    /// Declares a field.
    pub fn field(mut self, name: impl Into<String>, ty: Type) -> Self {
        let name = name.into();
        self.class
            .fields
            .insert(name.clone(), ClassField { name, ty });
        self
    }

    /// Declares a method.
    pub fn method(mut self, method: Method) -> Self {
        self.class.methods.push(method);
        self
    }

    /// Declares a bean property `attribute` stored in the field `backing`:
    /// the field plus a `getX` / `setX` pair reading and writing it.
    pub fn property(self, attribute: &str, backing: &str, ty: Type) -> Self {
        let get_field = backing.to_string();
        let set_field = backing.to_string();

        self.field(backing, ty)
            .method(Method::getter(getter_name(attribute), move |object| {
                object
                    .get(&get_field)
                    .cloned()
                    .ok_or_else(|| Error::no_such_field(object.class().name(), &get_field))
            }))
            .method(Method::setter(
                setter_name(attribute),
                move |object, value| object.set(&set_field, value),
            ))
    }

    /// Marks the class as lacking a default constructor.
    pub fn abstract_class(mut self) -> Self {
        self.class.instantiable = false;
        self
    }

    pub fn build(self) -> Arc<Class> {
        Arc::new(self.class)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .field("methods", &self.methods)
            .finish()
    }
}
