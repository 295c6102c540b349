use super::{element_mapping, KeyPolicy};

use tessera_core::{
    reflect::Object,
    schema::{Descriptor, Mapping},
    stmt::Value,
    Error, Result,
};

impl KeyPolicy {
    /// Builds a template entity: a blank instance of the descriptor's class
    /// with only its primary-key attributes set from `key`.
    ///
    /// Key elements stored inside embedded objects are written into those
    /// objects, which are created when the entity has none yet.
    pub fn create_bean_using_key(&self, key: &Value) -> Result<Object> {
        self.bean_using_key(key)
            .map_err(|cause| self.error_using_key(key, cause))
    }

    /// Builds an instance of the primary-key class from the key attributes
    /// of `entity`. The inverse of [`KeyPolicy::create_bean_using_key`].
    ///
    /// Scalar keys are returned as the bare attribute value.
    pub fn create_primary_key_instance(&self, entity: &Object) -> Result<Value> {
        self.primary_key_instance(entity)
            .map_err(|cause| self.error_using_key(entity, cause))
    }

    fn bean_using_key(&self, key: &Value) -> Result<Object> {
        let shape = self.key_shape(&key.key_type())?;
        let mut entity = self.descriptor.new_instance()?;

        for accessor in shape.accessors() {
            let value = accessor.get_value(key)?;

            let mut target = &mut entity;
            let mut mapping = element_mapping(&self.descriptor, accessor)?;

            while let Some(nested) = mapping.reference_descriptor() {
                target = aggregate_object(target, mapping, nested)?;
                mapping = element_mapping(nested, accessor)?;
            }

            mapping.set_real_attribute_value(target, value)?;
        }

        Ok(entity)
    }

    fn primary_key_instance(&self, entity: &Object) -> Result<Value> {
        let shape = match self.shape.get() {
            Some(shape) => shape,
            None => {
                let Some(pk_class) = self.pk_class()? else {
                    tessera_core::bail!(
                        "primary key class `{}` has not been resolved",
                        self.pk_class_name().unwrap_or_default()
                    );
                };
                self.key_shape(&pk_class)?
            }
        };
        let mut key = shape
            .key_type()
            .new_instance()?
            .map_or(Value::Null, Value::Object);

        for accessor in shape.accessors() {
            let mut source = entity;
            let mut mapping = element_mapping(&self.descriptor, accessor)?;

            while let Some(nested) = mapping.reference_descriptor() {
                match embedded_object(source, mapping)? {
                    Some(object) => source = object,
                    None => break,
                }
                mapping = element_mapping(nested, accessor)?;
            }

            let value = if mapping.is_aggregate() {
                // The entity has no embedded object for this element yet
                Value::Null
            } else {
                mapping.real_attribute_value(source)?
            };

            accessor.set_value(&mut key, value)?;
        }

        Ok(key)
    }
}

/// Returns the embedded object stored by `mapping` in `target`, creating it
/// through the embedded descriptor when the attribute is null.
fn aggregate_object<'a>(
    target: &'a mut Object,
    mapping: &Mapping,
    nested: &Descriptor,
) -> Result<&'a mut Object> {
    let attribute = mapping.attribute_name();
    let current = target
        .get(attribute)
        .ok_or_else(|| Error::no_such_field(target.class().name(), attribute))?;

    if current.is_null() {
        let object = nested.new_instance()?;
        target.set(attribute, object)?;
    }

    match target.get_mut(attribute) {
        Some(Value::Object(object)) => Ok(object),
        other => Err(Error::type_conversion(
            other.cloned().unwrap_or_default(),
            nested.class().name(),
        )),
    }
}

/// Returns the embedded object stored by `mapping` in `source`, or `None`
/// when the attribute is null.
fn embedded_object<'a>(source: &'a Object, mapping: &Mapping) -> Result<Option<&'a Object>> {
    let attribute = mapping.attribute_name();

    match source.get(attribute) {
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(Value::Null) => Ok(None),
        Some(other) => Err(Error::type_conversion(
            other.clone(),
            mapping.attribute_classification().to_string(),
        )),
        None => Err(Error::no_such_field(source.class().name(), attribute)),
    }
}
