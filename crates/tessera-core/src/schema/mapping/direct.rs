use crate::{
    schema::{Column, Converter},
    session::Session,
    stmt, Result,
};

/// Direct-to-field mapping: one attribute stored in one column.
#[derive(Debug, Clone)]
pub struct DirectMapping {
    pub attribute: String,

    /// Attribute classification
    pub attribute_ty: stmt::Type,

    pub column: Column,

    /// Applied before the platform coerces to the column type.
    pub converter: Option<Converter>,

    pub read_only: bool,
}

impl DirectMapping {
    pub fn new(attribute: impl Into<String>, column: impl Into<Column>, ty: stmt::Type) -> Self {
        DirectMapping {
            attribute: attribute.into(),
            attribute_ty: ty,
            column: column.into(),
            converter: None,
            read_only: false,
        }
    }

    pub fn converter(mut self, converter: impl Into<Converter>) -> Self {
        self.converter = Some(converter.into());
        self
    }

    /// Converts an attribute value into the column's data value: the
    /// converter runs first, then the session platform coerces the result to
    /// the column type, if the column declares one.
    pub fn field_value(&self, value: stmt::Value, session: &Session) -> Result<stmt::Value> {
        let value = match &self.converter {
            Some(converter) => converter.to_data_value(value, session)?,
            None => value,
        };

        match &self.column.ty {
            Some(ty) => session.platform().convert(value, ty),
            None => Ok(value),
        }
    }
}
