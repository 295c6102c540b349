use super::{AccessorKind, KeyElementAccessor};

use by_address::ByAddress;
use std::{collections::HashSet, sync::Arc};
use tessera_core::{
    reflect::{getter_name, KeyType},
    schema::{Column, Descriptor, Mapping},
    Error, Result,
};

/// Output of accessor derivation.
pub(super) struct Derived {
    pub(super) accessors: Vec<KeyElementAccessor>,

    /// Set when an element resolved as a scalar key: the classification of
    /// the attribute it resolved to.
    pub(super) pk_class: Option<KeyType>,
}

/// Derives one accessor per primary-key column of `descriptor`.
///
/// `key_type` of `None` means the key is a bare scalar.
pub(super) fn derive_accessors(
    descriptor: &Descriptor,
    key_type: Option<&KeyType>,
) -> Result<Derived> {
    let single_key_mapping = descriptor.primary_key_mappings().len() == 1;
    let mut derived = Derived {
        accessors: Vec::with_capacity(descriptor.primary_key_fields().len()),
        pk_class: None,
    };

    for column in descriptor.primary_key_fields() {
        let accessor = resolve_column(
            descriptor,
            column,
            key_type,
            single_key_mapping,
            &mut derived.pk_class,
        )
        .map_err(|cause| {
            let subject = key_type.map_or_else(|| "<scalar>".to_string(), KeyType::name);
            cause.context(Error::error_using_primary_key(subject, descriptor.name()))
        })?;

        tracing::trace!(
            descriptor = descriptor.name(),
            column = %column,
            attribute = accessor.attribute_name(),
            kind = ?accessor.kind(),
            "resolved primary key element"
        );

        derived.accessors.push(accessor);
    }

    Ok(derived)
}

/// Resolves the accessor for a single primary-key column.
///
/// Candidate mappings are kept on a stack: the column's read-only mappings
/// are pushed first and its writable mapping last, so the writable mapping
/// is tried first. Aggregates are replaced by the candidates of their
/// nested descriptor. Each aggregate is expanded at most once.
fn resolve_column(
    descriptor: &Descriptor,
    column: &Column,
    key_type: Option<&KeyType>,
    single_key_mapping: bool,
    pk_class: &mut Option<KeyType>,
) -> Result<KeyElementAccessor> {
    let mut candidates = candidates_for(descriptor, column);
    let mut expanded = HashSet::new();
    let mut failure = None;

    while let Some(mapping) = candidates.pop() {
        match &*mapping {
            // Key columns resolve through direct or aggregate mappings only
            Mapping::ForeignReference(_) => continue,
            Mapping::Aggregate(aggregate) => {
                if expanded.insert(ByAddress(mapping.clone())) {
                    candidates.extend(candidates_for(&aggregate.reference_descriptor, column));
                }
                continue;
            }
            Mapping::Direct(_) | Mapping::Transformation(_) => {}
        }

        let attribute = mapping.attribute_name();

        let Some(key_type) = key_type else {
            *pk_class = Some(KeyType::Scalar(mapping.attribute_classification()));
            return Ok(KeyElementAccessor::key_is_element(attribute, column.clone()));
        };

        match lookup_element(key_type, attribute) {
            Ok(kind) => return Ok(KeyElementAccessor::new(attribute, column.clone(), kind)),
            Err(_) if single_key_mapping => {
                // A single-column key handed over with a class that has no
                // matching member is the key itself.
                *pk_class = Some(KeyType::Scalar(mapping.attribute_classification()));
                return Ok(KeyElementAccessor::key_is_element(attribute, column.clone()));
            }
            Err(err) => failure = Some(err),
        }
    }

    Err(failure.unwrap_or_else(|| {
        tessera_core::err!("no direct or aggregate mapping for primary key column {column}")
    }))
}

fn candidates_for(descriptor: &Descriptor, column: &Column) -> Vec<Arc<Mapping>> {
    let mut candidates = descriptor.read_only_mappings_for_field(column).to_vec();
    candidates.extend(descriptor.mapping_for_field(column).cloned());
    candidates
}

/// Finds `attribute` on the key type: a declared field, otherwise a
/// zero-argument `getX` method.
fn lookup_element(key_type: &KeyType, attribute: &str) -> Result<AccessorKind> {
    if let Ok(field) = key_type.field(attribute) {
        return Ok(AccessorKind::Field(field.name.clone()));
    }

    let getter = key_type.method(&getter_name(attribute), 0)?;
    Ok(AccessorKind::Property(getter.clone()))
}
