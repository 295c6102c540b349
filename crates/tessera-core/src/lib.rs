mod error;
pub use error::{Error, IntoError};

pub mod reflect;

pub mod schema;
pub use schema::Descriptor;

pub mod session;
pub use session::Session;

pub mod stmt;

/// A Result type alias that uses Tessera's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
