use super::Error;

/// Error when a class declares no method with the requested name and arity.
#[derive(Debug)]
pub(super) struct NoSuchMethod {
    class: Box<str>,
    method: Box<str>,
}

impl std::error::Error for NoSuchMethod {}

impl core::fmt::Display for NoSuchMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no such method `{}` on `{}`", self.method, self.class)
    }
}

impl Error {
    /// Creates a missing method error.
    pub fn no_such_method(class: impl Into<String>, method: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoSuchMethod(NoSuchMethod {
            class: class.into().into(),
            method: method.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing method error.
    pub fn is_no_such_method(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSuchMethod(_))
    }
}
