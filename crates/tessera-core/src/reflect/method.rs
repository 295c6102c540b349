use super::Object;
use crate::{stmt::Value, Result};

use std::{fmt, sync::Arc};

/// Body of a zero-argument getter.
pub type GetterFn = dyn Fn(&Object) -> Result<Value> + Send + Sync;

/// Body of a one-argument setter.
pub type SetterFn = dyn Fn(&mut Object, Value) -> Result<()> + Send + Sync;

/// A named method declared by a [`Class`](super::Class).
///
/// Only the two shapes the key policy needs are modeled: zero-argument
/// getters and one-argument setters.
#[derive(Clone)]
pub struct Method {
    name: String,
    body: MethodBody,
}

#[derive(Clone)]
enum MethodBody {
    Getter(Arc<GetterFn>),
    Setter(Arc<SetterFn>),
}

impl Method {
    pub fn getter(
        name: impl Into<String>,
        f: impl Fn(&Object) -> Result<Value> + Send + Sync + 'static,
    ) -> Method {
        Method {
            name: name.into(),
            body: MethodBody::Getter(Arc::new(f)),
        }
    }

    pub fn setter(
        name: impl Into<String>,
        f: impl Fn(&mut Object, Value) -> Result<()> + Send + Sync + 'static,
    ) -> Method {
        Method {
            name: name.into(),
            body: MethodBody::Setter(Arc::new(f)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments, not counting the receiver.
    pub fn arity(&self) -> usize {
        match self.body {
            MethodBody::Getter(_) => 0,
            MethodBody::Setter(_) => 1,
        }
    }

    /// Invokes the method with no arguments.
    pub fn invoke_getter(&self, receiver: &Object) -> Result<Value> {
        match &self.body {
            MethodBody::Getter(f) => f(receiver),
            MethodBody::Setter(_) => crate::bail!(
                "method `{}` on `{}` expects 1 argument, got 0",
                self.name,
                receiver.class().name()
            ),
        }
    }

    /// Invokes the method with a single argument.
    pub fn invoke_setter(&self, receiver: &mut Object, value: Value) -> Result<()> {
        match &self.body {
            MethodBody::Setter(f) => f(receiver, value),
            MethodBody::Getter(_) => crate::bail!(
                "method `{}` on `{}` expects 0 arguments, got 1",
                self.name,
                receiver.class().name()
            ),
        }
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({}/{})", self.name, self.arity())
    }
}
