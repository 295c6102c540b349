use super::{Class, KeyType};
use crate::stmt::Type;

use indexmap::IndexMap;
use std::sync::Arc;

/// Resolves class names to classes.
///
/// Metadata may name a primary-key class before the class itself is
/// available; the registry turns such names into [`KeyType`]s once it is.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    classes: IndexMap<String, Arc<Class>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers a class under its name, replacing any previous entry.
    pub fn register(&mut self, class: Arc<Class>) -> &mut Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    pub fn class(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    /// Loads `name` as a key type: a registered class, or one of the scalar
    /// type names (`bool`, `string`, `i32`, `i64`, `uuid`).
    pub fn load(&self, name: &str) -> Option<KeyType> {
        if let Some(class) = self.classes.get(name) {
            return Some(KeyType::Class(class.clone()));
        }

        Type::from_scalar_name(name).map(KeyType::Scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_classes_and_scalars() {
        let mut registry = Registry::new();
        registry.register(Class::builder("EmployeePK").field("deptId", Type::I64).build());

        assert_eq!(
            registry.load("EmployeePK").map(|ty| ty.name()).as_deref(),
            Some("EmployeePK")
        );
        assert_eq!(registry.load("i64"), Some(KeyType::Scalar(Type::I64)));
        assert_eq!(registry.load("ProjectPK"), None);
    }
}
