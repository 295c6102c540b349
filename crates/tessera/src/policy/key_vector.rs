use super::KeyPolicy;

use tessera_core::{
    session::Session,
    stmt::{Value, ValueRecord},
    Result,
};

impl KeyPolicy {
    /// Breaks `key` into its column values, in primary-key column order.
    ///
    /// Elements stored through direct-to-field mappings are converted to
    /// their data values; other elements are returned as read from the key.
    pub fn create_pk_vector_from_key(&self, key: &Value, session: &Session) -> Result<ValueRecord> {
        self.pk_vector(key, session)
            .map_err(|cause| self.error_using_key(key, cause))
    }

    fn pk_vector(&self, key: &Value, session: &Session) -> Result<ValueRecord> {
        let shape = self.key_shape(&key.key_type())?;
        let mut record = ValueRecord::with_capacity(shape.len());

        for (accessor, mapping) in shape.iter() {
            let value = accessor.get_value(key)?;

            let value = match mapping.as_direct() {
                Some(direct) => direct.field_value(value, session)?,
                None => value,
            };

            record.push(value);
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tessera_core::{
        reflect::Class,
        schema::{Column, DirectMapping, TransformationMapping},
        stmt::Type,
        Descriptor,
    };

    #[test]
    fn transformation_elements_are_not_converted() {
        let class = Class::builder("Reading")
            .field("stamp", Type::String)
            .build();
        let descriptor = Descriptor::builder(&class)
            .primary_key("STAMP")
            .mapping(TransformationMapping::new(
                "stamp",
                Column::new("STAMP").ty(Type::I64),
                Type::String,
            ))
            .build()
            .unwrap();

        let policy = KeyPolicy::new(descriptor);
        let record = policy
            .create_pk_vector_from_key(&Value::from("1700000000"), &Session::new())
            .unwrap();
        assert_eq!(record, [Value::from("1700000000")]);
    }

    #[test]
    fn direct_elements_are_coerced_to_column_type() {
        let class = Class::builder("Account").field("id", Type::I32).build();
        let descriptor: Arc<Descriptor> = Descriptor::builder(&class)
            .primary_key("ID")
            .mapping(DirectMapping::new("id", Column::new("ID").ty(Type::I64), Type::I32))
            .build()
            .unwrap();

        let policy = KeyPolicy::new(descriptor);
        let record = policy
            .create_pk_vector_from_key(&Value::I32(42), &Session::new())
            .unwrap();
        assert_eq!(record, [Value::I64(42)]);
    }
}
