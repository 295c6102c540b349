use super::{Column, InstantiationPolicy, Mapping};
use crate::{
    reflect::{Class, Object},
    Error, Result,
};

use by_address::ByAddress;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Mapping metadata for one class.
#[derive(Debug)]
pub struct Descriptor {
    name: String,

    class: Arc<Class>,

    kind: DescriptorKind,

    /// Primary-key columns in declared order. Empty for aggregates.
    primary_key_fields: Vec<Column>,

    /// Mappings in declaration order
    mappings: Vec<Arc<Mapping>>,

    by_attribute: IndexMap<String, Arc<Mapping>>,

    /// The writable mapping for each column
    by_field: IndexMap<Column, Arc<Mapping>>,

    /// Additional read-only mappings for each column
    read_only_by_field: IndexMap<Column, Vec<Arc<Mapping>>>,

    /// Distinct leaf mappings owning the primary-key columns
    primary_key_mappings: Vec<Arc<Mapping>>,

    instantiation: InstantiationPolicy,

    /// Name of the primary-key class, resolved later through a registry
    primary_key_class_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// An entity with its own table and primary key
    Root,

    /// An embeddable class stored in its owner's table
    Aggregate,
}

#[derive(Debug)]
pub struct DescriptorBuilder {
    name: String,
    class: Arc<Class>,
    kind: DescriptorKind,
    primary_key_fields: Vec<Column>,
    mappings: Vec<Mapping>,
    instantiation: InstantiationPolicy,
    primary_key_class_name: Option<String>,
}

impl Descriptor {
    /// Starts a root (entity) descriptor for `class`, named after the class.
    pub fn builder(class: &Arc<Class>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: class.name().to_string(),
            class: class.clone(),
            kind: DescriptorKind::Root,
            primary_key_fields: vec![],
            mappings: vec![],
            instantiation: InstantiationPolicy::Default,
            primary_key_class_name: None,
        }
    }

    /// Starts an aggregate (embeddable) descriptor for `class`.
    pub fn aggregate_builder(class: &Arc<Class>) -> DescriptorBuilder {
        let mut builder = Descriptor::builder(class);
        builder.kind = DescriptorKind::Aggregate;
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    pub fn is_aggregate(&self) -> bool {
        self.kind == DescriptorKind::Aggregate
    }

    pub fn primary_key_fields(&self) -> &[Column] {
        &self.primary_key_fields
    }

    pub fn mappings(&self) -> &[Arc<Mapping>] {
        &self.mappings
    }

    pub fn mapping_for_attribute_name(&self, name: &str) -> Option<&Arc<Mapping>> {
        self.by_attribute.get(name)
    }

    /// The writable mapping for `column`.
    pub fn mapping_for_field(&self, column: &Column) -> Option<&Arc<Mapping>> {
        self.by_field.get(column)
    }

    /// Read-only mappings for `column`, in declaration order.
    pub fn read_only_mappings_for_field(&self, column: &Column) -> &[Arc<Mapping>] {
        self.read_only_by_field
            .get(column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Distinct mappings owning the primary-key columns, resolved through
    /// aggregates to the mapping that stores each column.
    pub fn primary_key_mappings(&self) -> &[Arc<Mapping>] {
        &self.primary_key_mappings
    }

    /// Every column mapped by this descriptor, writable ones first.
    pub fn mapped_columns(&self) -> Vec<Column> {
        let columns: IndexSet<&Column> = self
            .by_field
            .keys()
            .chain(self.read_only_by_field.keys())
            .collect();
        columns.into_iter().cloned().collect()
    }

    /// Creates a blank instance of the described class.
    pub fn new_instance(&self) -> Result<Object> {
        self.instantiation.build_new_instance(&self.class)
    }

    pub fn primary_key_class_name(&self) -> Option<&str> {
        self.primary_key_class_name.as_deref()
    }
}

impl DescriptorBuilder {
    /// Overrides the descriptor name (defaults to the class name).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a primary-key column.
    pub fn primary_key(mut self, column: impl Into<Column>) -> Self {
        self.primary_key_fields.push(column.into());
        self
    }

    pub fn mapping(mut self, mapping: impl Into<Mapping>) -> Self {
        self.mappings.push(mapping.into());
        self
    }

    pub fn instantiation(mut self, policy: InstantiationPolicy) -> Self {
        self.instantiation = policy;
        self
    }

    pub fn primary_key_class_name(mut self, name: impl Into<String>) -> Self {
        self.primary_key_class_name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Arc<Descriptor>> {
        if self.kind == DescriptorKind::Aggregate && !self.primary_key_fields.is_empty() {
            return Err(Error::from_args(format_args!(
                "aggregate descriptor `{}` cannot declare primary key columns",
                self.name
            )));
        }

        let mut mappings = Vec::with_capacity(self.mappings.len());
        let mut by_attribute = IndexMap::new();
        let mut by_field = IndexMap::new();
        let mut read_only_by_field: IndexMap<Column, Vec<Arc<Mapping>>> = IndexMap::new();

        for mapping in self.mappings {
            let mapping = Arc::new(mapping);
            let attribute = mapping.attribute_name().to_string();

            if by_attribute.contains_key(&attribute) {
                crate::bail!(
                    "descriptor `{}` maps attribute `{}` more than once",
                    self.name,
                    attribute
                );
            }

            for column in mapping.columns() {
                if mapping.is_read_only() {
                    read_only_by_field
                        .entry(column)
                        .or_default()
                        .push(mapping.clone());
                } else if by_field.contains_key(&column) {
                    crate::bail!(
                        "descriptor `{}` has more than one writable mapping for column {}",
                        self.name,
                        column
                    );
                } else {
                    by_field.insert(column, mapping.clone());
                }
            }

            by_attribute.insert(attribute, mapping.clone());
            mappings.push(mapping);
        }

        let primary_key_mappings =
            resolve_primary_key_mappings(&self.primary_key_fields, &by_field);

        tracing::trace!(
            descriptor = %self.name,
            mappings = mappings.len(),
            primary_key_fields = self.primary_key_fields.len(),
            "built descriptor"
        );

        Ok(Arc::new(Descriptor {
            name: self.name,
            class: self.class,
            kind: self.kind,
            primary_key_fields: self.primary_key_fields,
            mappings,
            by_attribute,
            by_field,
            read_only_by_field,
            primary_key_mappings,
            instantiation: self.instantiation,
            primary_key_class_name: self.primary_key_class_name,
        }))
    }
}

fn resolve_primary_key_mappings(
    primary_key_fields: &[Column],
    by_field: &IndexMap<Column, Arc<Mapping>>,
) -> Vec<Arc<Mapping>> {
    let mut resolved = IndexSet::new();

    for column in primary_key_fields {
        let Some(mut mapping) = by_field.get(column).cloned() else {
            continue;
        };

        while let Some(nested) = mapping
            .reference_descriptor()
            .and_then(|descriptor| descriptor.mapping_for_field(column))
            .cloned()
        {
            mapping = nested;
        }

        resolved.insert(ByAddress(mapping));
    }

    resolved.into_iter().map(|mapping| mapping.0).collect()
}
