//! Primary-key handling for mapped entities.
//!
//! [`KeyPolicy`] turns primary-key values, scalar or compound, into ordered
//! column values and template entities, using accessors derived once per
//! key shape from a [`Descriptor`].

pub mod policy;
pub use policy::{AccessorKind, KeyElementAccessor, KeyPolicy, KeyShape};

pub use tessera_core::{reflect, schema, session, stmt, Descriptor, Error, Result, Session};
