use crate::{reflect::Class, reflect::Object, Result};

use std::{fmt, sync::Arc};

/// How a descriptor creates new instances of its class.
#[derive(Clone, Default)]
pub enum InstantiationPolicy {
    /// Blank instance through the class's default constructor.
    #[default]
    Default,

    /// Custom factory.
    Factory(Arc<dyn Fn(&Arc<Class>) -> Result<Object> + Send + Sync>),
}

impl InstantiationPolicy {
    pub fn factory(f: impl Fn(&Arc<Class>) -> Result<Object> + Send + Sync + 'static) -> Self {
        Self::Factory(Arc::new(f))
    }

    pub fn build_new_instance(&self, class: &Arc<Class>) -> Result<Object> {
        match self {
            Self::Default => class.new_instance(),
            Self::Factory(f) => f(class),
        }
    }
}

impl fmt::Debug for InstantiationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
