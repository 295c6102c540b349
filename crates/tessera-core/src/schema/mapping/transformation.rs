use crate::{schema::Column, stmt};

/// Attribute derived from one or more columns by a transformer.
///
/// Key values pass through these mappings without conversion.
#[derive(Debug, Clone)]
pub struct TransformationMapping {
    pub attribute: String,
    pub attribute_ty: stmt::Type,
    pub columns: Vec<Column>,
    pub read_only: bool,
}

impl TransformationMapping {
    pub fn new(attribute: impl Into<String>, column: impl Into<Column>, ty: stmt::Type) -> Self {
        TransformationMapping {
            attribute: attribute.into(),
            attribute_ty: ty,
            columns: vec![column.into()],
            read_only: false,
        }
    }
}
