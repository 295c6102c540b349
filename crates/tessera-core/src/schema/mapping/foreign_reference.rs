use crate::schema::Column;

/// Reference to another entity through foreign-key columns.
#[derive(Debug, Clone)]
pub struct ForeignReferenceMapping {
    pub attribute: String,

    /// Name of the referenced entity's class
    pub target: String,

    /// Foreign-key columns in the owning table
    pub columns: Vec<Column>,

    pub read_only: bool,
}

impl ForeignReferenceMapping {
    pub fn new(
        attribute: impl Into<String>,
        target: impl Into<String>,
        columns: impl IntoIterator<Item = Column>,
    ) -> Self {
        ForeignReferenceMapping {
            attribute: attribute.into(),
            target: target.into(),
            columns: columns.into_iter().collect(),
            read_only: false,
        }
    }
}
