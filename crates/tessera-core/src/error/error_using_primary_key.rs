use super::Error;

/// Error raised by the key policy when a primary key cannot be used with a
/// descriptor.
///
/// This occurs when:
/// - No field, getter or scalar fallback matches a primary-key column on the key type
/// - Reading or writing a key element fails
/// - A template entity cannot be built from a key
///
/// The underlying lookup or invocation failure is kept as the cause.
#[derive(Debug)]
pub(super) struct ErrorUsingPrimaryKey {
    subject: Box<str>,
    descriptor: Box<str>,
}

impl std::error::Error for ErrorUsingPrimaryKey {}

impl core::fmt::Display for ErrorUsingPrimaryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "error using primary key `{}` with descriptor `{}`",
            self.subject, self.descriptor
        )
    }
}

impl Error {
    /// Creates an error-using-primary-key error.
    ///
    /// `subject` describes the key, key type or object involved. Attach the
    /// root cause with [`Error::context`]:
    /// `cause.context(Error::error_using_primary_key(..))`.
    pub fn error_using_primary_key(
        subject: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ErrorUsingPrimaryKey(ErrorUsingPrimaryKey {
            subject: subject.into().into(),
            descriptor: descriptor.into().into(),
        }))
    }

    /// Returns `true` if this error is an error-using-primary-key error.
    pub fn is_error_using_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ErrorUsingPrimaryKey(_))
    }
}
