mod aggregate;
pub use aggregate::AggregateMapping;

mod direct;
pub use direct::DirectMapping;

mod foreign_reference;
pub use foreign_reference::ForeignReferenceMapping;

mod transformation;
pub use transformation::TransformationMapping;

use super::{Column, Descriptor};
use crate::{reflect::Object, session::Session, stmt, Error, Result};

use std::sync::Arc;

/// Binds one attribute of a class to one or more columns.
#[derive(Debug)]
pub enum Mapping {
    /// Attribute stored in a single column, optionally converted.
    Direct(DirectMapping),

    /// Attribute computed to and from columns by a transformer; values are
    /// not converted on the way to the database.
    Transformation(TransformationMapping),

    /// Embedded object whose attributes are mapped by a nested descriptor.
    Aggregate(AggregateMapping),

    /// Reference to another entity through foreign-key columns.
    ForeignReference(ForeignReferenceMapping),
}

impl Mapping {
    pub fn attribute_name(&self) -> &str {
        match self {
            Self::Direct(mapping) => &mapping.attribute,
            Self::Transformation(mapping) => &mapping.attribute,
            Self::Aggregate(mapping) => &mapping.attribute,
            Self::ForeignReference(mapping) => &mapping.attribute,
        }
    }

    /// True if the mapping only reads its columns.
    pub fn is_read_only(&self) -> bool {
        match self {
            Self::Direct(mapping) => mapping.read_only,
            Self::Transformation(mapping) => mapping.read_only,
            Self::Aggregate(mapping) => mapping.read_only,
            Self::ForeignReference(mapping) => mapping.read_only,
        }
    }

    /// Marks the mapping read-only.
    pub fn read_only(mut self) -> Self {
        match &mut self {
            Self::Direct(mapping) => mapping.read_only = true,
            Self::Transformation(mapping) => mapping.read_only = true,
            Self::Aggregate(mapping) => mapping.read_only = true,
            Self::ForeignReference(mapping) => mapping.read_only = true,
        }
        self
    }

    pub fn is_direct_to_field(&self) -> bool {
        matches!(self, Self::Direct(..))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(..))
    }

    pub fn is_foreign_reference(&self) -> bool {
        matches!(self, Self::ForeignReference(..))
    }

    pub fn as_direct(&self) -> Option<&DirectMapping> {
        match self {
            Self::Direct(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_aggregate(&self) -> Option<&AggregateMapping> {
        match self {
            Self::Aggregate(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// The descriptor of the embedded class, for aggregate mappings.
    pub fn reference_descriptor(&self) -> Option<&Arc<Descriptor>> {
        self.as_aggregate()
            .map(|aggregate| &aggregate.reference_descriptor)
    }

    /// The type of the attribute's value.
    pub fn attribute_classification(&self) -> stmt::Type {
        match self {
            Self::Direct(mapping) => mapping.attribute_ty.clone(),
            Self::Transformation(mapping) => mapping.attribute_ty.clone(),
            Self::Aggregate(mapping) => {
                stmt::Type::Object(mapping.reference_descriptor.class().name().to_string())
            }
            Self::ForeignReference(mapping) => stmt::Type::Object(mapping.target.clone()),
        }
    }

    /// Columns written or read by the mapping. Aggregates cover every column
    /// of their nested descriptor.
    pub fn columns(&self) -> Vec<Column> {
        match self {
            Self::Direct(mapping) => vec![mapping.column.clone()],
            Self::Transformation(mapping) => mapping.columns.clone(),
            Self::Aggregate(mapping) => mapping.reference_descriptor.mapped_columns(),
            Self::ForeignReference(mapping) => mapping.columns.clone(),
        }
    }

    /// Reads the attribute from `object`.
    pub fn real_attribute_value(&self, object: &Object) -> Result<stmt::Value> {
        let name = self.attribute_name();
        object
            .get(name)
            .cloned()
            .ok_or_else(|| Error::no_such_field(object.class().name(), name))
    }

    /// Writes the attribute into `object`.
    pub fn set_real_attribute_value(&self, object: &mut Object, value: stmt::Value) -> Result<()> {
        object.set(self.attribute_name(), value)
    }

    /// Converts an attribute value to the value stored in the database.
    ///
    /// Only direct mappings convert; every other mapping returns the value
    /// unchanged.
    pub fn field_value(&self, value: stmt::Value, session: &Session) -> Result<stmt::Value> {
        match self {
            Self::Direct(mapping) => mapping.field_value(value, session),
            _ => Ok(value),
        }
    }
}

impl From<DirectMapping> for Mapping {
    fn from(value: DirectMapping) -> Self {
        Self::Direct(value)
    }
}

impl From<TransformationMapping> for Mapping {
    fn from(value: TransformationMapping) -> Self {
        Self::Transformation(value)
    }
}

impl From<AggregateMapping> for Mapping {
    fn from(value: AggregateMapping) -> Self {
        Self::Aggregate(value)
    }
}

impl From<ForeignReferenceMapping> for Mapping {
    fn from(value: ForeignReferenceMapping) -> Self {
        Self::ForeignReference(value)
    }
}
