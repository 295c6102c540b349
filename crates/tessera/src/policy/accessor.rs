use tessera_core::{
    reflect::{setter_name_for_getter, Method, Object},
    schema::Column,
    stmt::Value,
    Error, Result,
};

/// Reads and writes one element of a primary key.
///
/// There is exactly one accessor per primary-key column of the owning
/// descriptor, in the descriptor's declared column order.
#[derive(Debug, Clone)]
pub struct KeyElementAccessor {
    attribute_name: String,
    column: Column,
    kind: AccessorKind,
}

/// How a key element is reached from the key value.
#[derive(Debug, Clone)]
pub enum AccessorKind {
    /// The key is a scalar and is itself the element.
    KeyIsElement,

    /// Declared field of the key class.
    Field(String),

    /// Zero-argument getter of the key class. The matching setter is looked
    /// up on the key's class when a value is written.
    Property(Method),
}

impl KeyElementAccessor {
    pub fn new(attribute_name: impl Into<String>, column: Column, kind: AccessorKind) -> Self {
        KeyElementAccessor {
            attribute_name: attribute_name.into(),
            column,
            kind,
        }
    }

    pub fn key_is_element(attribute_name: impl Into<String>, column: Column) -> Self {
        KeyElementAccessor::new(attribute_name, column, AccessorKind::KeyIsElement)
    }

    /// Name of the entity attribute the element maps to.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// The primary-key column the element maps to.
    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn kind(&self) -> &AccessorKind {
        &self.kind
    }

    pub fn is_key_is_element(&self) -> bool {
        matches!(self.kind, AccessorKind::KeyIsElement)
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, AccessorKind::Field(_))
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, AccessorKind::Property(_))
    }

    /// Reads the element from `key`.
    pub fn get_value(&self, key: &Value) -> Result<Value> {
        match &self.kind {
            AccessorKind::KeyIsElement => Ok(key.clone()),
            AccessorKind::Field(name) => {
                let object = expect_key_object(key)?;
                object
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::no_such_field(object.class().name(), name))
            }
            AccessorKind::Property(getter) => getter.invoke_getter(expect_key_object(key)?),
        }
    }

    /// Writes the element into `key`.
    pub fn set_value(&self, key: &mut Value, value: Value) -> Result<()> {
        match &self.kind {
            AccessorKind::KeyIsElement => {
                *key = value;
                Ok(())
            }
            AccessorKind::Field(name) => expect_key_object_mut(key)?.set(name, value),
            AccessorKind::Property(getter) => {
                let object = expect_key_object_mut(key)?;
                let setter = setter_name_for_getter(getter.name())
                    .ok_or_else(|| Error::no_such_method(object.class().name(), getter.name()))?;
                object.invoke_setter(&setter, value)
            }
        }
    }
}

fn expect_key_object(key: &Value) -> Result<&Object> {
    match key {
        Value::Object(object) => Ok(object),
        other => Err(Error::type_conversion(other.clone(), "key class instance")),
    }
}

fn expect_key_object_mut(key: &mut Value) -> Result<&mut Object> {
    match key {
        Value::Object(object) => Ok(object),
        other => Err(Error::type_conversion(other.clone(), "key class instance")),
    }
}
