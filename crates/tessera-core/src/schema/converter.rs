use crate::{session::Session, stmt::Type, stmt::Value, Error, Result};

/// Converts attribute values to the values stored in a column.
///
/// Converters are attached to direct mappings and run before the session
/// platform coerces the result to the column's data type.
#[derive(Debug, Clone)]
pub enum Converter {
    /// Coerces the attribute value to `Type` through the session platform.
    TypeConversion(Type),

    /// Looks the attribute value up in an explicit table.
    ObjectType(ObjectTypeConverter),
}

/// Explicit attribute value to data value table, e.g. for enum-like
/// attributes stored as codes.
#[derive(Debug, Clone, Default)]
pub struct ObjectTypeConverter {
    entries: Vec<(Value, Value)>,
}

impl Converter {
    pub fn to_data_value(&self, value: Value, session: &Session) -> Result<Value> {
        match self {
            Self::TypeConversion(ty) => session.platform().convert(value, ty),
            Self::ObjectType(converter) => converter.to_data_value(value),
        }
    }
}

impl ObjectTypeConverter {
    pub fn new() -> ObjectTypeConverter {
        ObjectTypeConverter::default()
    }

    /// Maps `attribute` to `data`.
    pub fn entry(mut self, attribute: impl Into<Value>, data: impl Into<Value>) -> Self {
        self.entries.push((attribute.into(), data.into()));
        self
    }

    pub fn to_data_value(&self, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(value);
        }

        self.entries
            .iter()
            .find(|(attribute, _)| *attribute == value)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| {
                Error::type_conversion(value, "data value").context(crate::err!(
                    "no object type conversion entry for attribute value"
                ))
            })
    }
}

impl From<ObjectTypeConverter> for Converter {
    fn from(converter: ObjectTypeConverter) -> Self {
        Self::ObjectType(converter)
    }
}
