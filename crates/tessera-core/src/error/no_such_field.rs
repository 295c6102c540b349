use super::Error;

/// Error when a class declares no field with the requested name.
#[derive(Debug)]
pub(super) struct NoSuchField {
    class: Box<str>,
    field: Box<str>,
}

impl std::error::Error for NoSuchField {}

impl core::fmt::Display for NoSuchField {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "no such field `{}` on `{}`", self.field, self.class)
    }
}

impl Error {
    /// Creates a missing field error.
    pub fn no_such_field(class: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NoSuchField(NoSuchField {
            class: class.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing field error.
    pub fn is_no_such_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NoSuchField(_))
    }
}
