use crate::schema::Descriptor;

use std::sync::Arc;

/// Embedded object mapping.
///
/// The embedded object's attributes are mapped by `reference_descriptor`
/// onto columns of the owning table.
#[derive(Debug, Clone)]
pub struct AggregateMapping {
    pub attribute: String,
    pub reference_descriptor: Arc<Descriptor>,
    pub read_only: bool,
}

impl AggregateMapping {
    pub fn new(attribute: impl Into<String>, reference_descriptor: Arc<Descriptor>) -> Self {
        AggregateMapping {
            attribute: attribute.into(),
            reference_descriptor,
            read_only: false,
        }
    }
}
