use super::Error;

/// Error when a configured primary-key class name cannot be loaded.
///
/// This is an illegal-argument failure: the name was supplied by the
/// metadata and the registry has no class (or scalar type) under it.
#[derive(Debug)]
pub(super) struct PkClassNotFound {
    name: Box<str>,
}

impl std::error::Error for PkClassNotFound {}

impl core::fmt::Display for PkClassNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "illegal argument: primary key class `{}` not found",
            self.name
        )
    }
}

impl Error {
    /// Creates a primary key class not found error.
    pub fn pk_class_not_found(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PkClassNotFound(PkClassNotFound {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a primary key class not found error.
    pub fn is_pk_class_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PkClassNotFound(_))
    }
}
