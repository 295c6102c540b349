mod adhoc;
mod error_using_primary_key;
mod instantiation_failed;
mod no_such_field;
mod no_such_method;
mod pk_class_not_found;
mod type_conversion;

use adhoc::AdhocError;
use error_using_primary_key::ErrorUsingPrimaryKey;
use instantiation_failed::InstantiationFailed;
use no_such_field::NoSuchField;
use no_such_method::NoSuchMethod;
use pk_class_not_found::PkClassNotFound;
use std::sync::Arc;
use type_conversion::TypeConversionError;

/// Returns early with an ad hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while resolving or using primary keys.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let kind = match consequent.inner {
            Some(inner) => match Arc::try_unwrap(inner) {
                Ok(inner) => {
                    debug_assert!(
                        inner.cause.is_none(),
                        "consequent error must not already have a cause"
                    );
                    inner.kind
                }
                // A shared consequent keeps its own chain; wrap it as ad hoc text instead.
                Err(shared) => ErrorKind::Adhoc(AdhocError::new(shared.kind.to_string())),
            },
            None => ErrorKind::Unknown,
        };

        Error {
            inner: Some(Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            })),
        }
    }

    /// Returns the innermost error of the chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.cause() {
            err = cause;
        }
        err
    }

    /// Returns the error this one wraps, if any.
    pub fn cause(&self) -> Option<&Error> {
        self.inner.as_ref().and_then(|inner| inner.cause.as_ref())
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.cause()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => self
                .cause()
                .map(|cause| cause as &(dyn std::error::Error + 'static)),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    ErrorUsingPrimaryKey(ErrorUsingPrimaryKey),
    InstantiationFailed(InstantiationFailed),
    NoSuchField(NoSuchField),
    NoSuchMethod(NoSuchMethod),
    PkClassNotFound(PkClassNotFound),
    TypeConversion(TypeConversionError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            ErrorUsingPrimaryKey(err) => core::fmt::Display::fmt(err, f),
            InstantiationFailed(err) => core::fmt::Display::fmt(err, f),
            NoSuchField(err) => core::fmt::Display::fmt(err, f),
            NoSuchMethod(err) => core::fmt::Display::fmt(err, f),
            PkClassNotFound(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown tessera error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = err!("root cause");
        let mid = err!("middle context");
        let top = err!("top context");

        let chained = root.context(mid).context(top);
        assert_eq!(
            chained.to_string(),
            "top context: middle context: root cause"
        );
        assert_eq!(chained.root().to_string(), "root cause");
    }

    #[test]
    fn source_follows_cause() {
        use std::error::Error as _;

        let err = Error::no_such_field("EmployeePK", "deptId").context(err!("resolving key"));
        let source = err.source().expect("wrapped error has a source");
        assert_eq!(source.to_string(), "no such field `deptId` on `EmployeePK`");
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn parse_int_bridge() {
        let our_err: Error = "x1".parse::<i64>().unwrap_err().into();
        assert_eq!(our_err.to_string(), "invalid digit found in string");
    }

    #[test]
    fn type_conversion_error() {
        let value = crate::stmt::Value::I64(42);
        let err = Error::type_conversion(value, "String");
        assert_eq!(err.to_string(), "cannot convert I64 to String");
        assert!(err.is_type_conversion());
    }

    #[test]
    fn error_using_primary_key_with_cause() {
        let err = Error::no_such_method("EmployeePK", "getEmpNum")
            .context(Error::error_using_primary_key("EmployeePK", "Employee"));

        assert!(err.is_error_using_primary_key());
        assert!(err.root().is_no_such_method());
        assert_eq!(
            err.to_string(),
            "error using primary key `EmployeePK` with descriptor `Employee`: \
             no such method `getEmpNum` on `EmployeePK`"
        );
    }

    #[test]
    fn pk_class_not_found() {
        let err = Error::pk_class_not_found("com.acme.MissingPK");
        assert!(err.is_pk_class_not_found());
        assert_eq!(
            err.to_string(),
            "illegal argument: primary key class `com.acme.MissingPK` not found"
        );
    }

    #[test]
    fn instantiation_failed() {
        let err = Error::instantiation_failed("AbstractKey", "class has no default constructor");
        assert!(err.is_instantiation_failed());
        assert_eq!(
            err.to_string(),
            "cannot instantiate `AbstractKey`: class has no default constructor"
        );
    }
}
