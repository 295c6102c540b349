//! Descriptor and mapping metadata.
//!
//! A [`Descriptor`] describes how one class maps to a table: its ordered
//! primary-key columns and the [`Mapping`]s binding attributes to columns.
//! Aggregate (embedded) mappings point at a nested descriptor for the
//! embedded class.

mod column;
pub use column::Column;

mod converter;
pub use converter::{Converter, ObjectTypeConverter};

mod descriptor;
pub use descriptor::{Descriptor, DescriptorBuilder, DescriptorKind};

mod instantiation;
pub use instantiation::InstantiationPolicy;

mod mapping;
pub use mapping::{
    AggregateMapping, DirectMapping, ForeignReferenceMapping, Mapping, TransformationMapping,
};
