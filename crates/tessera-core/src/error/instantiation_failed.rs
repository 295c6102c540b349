use super::Error;

/// Error when a blank instance of a class cannot be created.
#[derive(Debug)]
pub(super) struct InstantiationFailed {
    class: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for InstantiationFailed {}

impl core::fmt::Display for InstantiationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot instantiate `{}`: {}", self.class, self.reason)
    }
}

impl Error {
    /// Creates an instantiation failure for `class`.
    pub fn instantiation_failed(class: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InstantiationFailed(InstantiationFailed {
            class: class.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an instantiation failure.
    pub fn is_instantiation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InstantiationFailed(_))
    }
}
