use crate::stmt::Type;

use std::{fmt, hash};

/// A database column.
///
/// Two columns are the same column when their table and name match; the
/// data type does not take part in identity.
#[derive(Clone)]
pub struct Column {
    /// The column name
    pub name: String,

    /// The owning table, if qualified
    pub table: Option<String>,

    /// Data type values are converted to before reaching the database
    pub ty: Option<Type>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Column {
        Column {
            name: name.into(),
            table: None,
            ty: None,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Column {
        self.table = Some(table.into());
        self
    }

    pub fn ty(mut self, ty: Type) -> Column {
        self.ty = Some(ty);
        self
    }

    /// Returns `TABLE.NAME`, or just `NAME` when unqualified.
    pub fn qualified_name(&self) -> String {
        match &self.table {
            Some(table) => format!("{table}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.table == other.table
    }
}

impl Eq for Column {}

impl hash::Hash for Column {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.table.hash(state);
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Column({})", self.qualified_name())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}
