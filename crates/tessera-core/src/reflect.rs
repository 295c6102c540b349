//! Runtime class metadata.
//!
//! Entities, embedded objects and key classes are described by [`Class`]
//! values and instantiated as [`Object`]s. The key policy introspects these
//! the way a reflective runtime would: it looks up declared fields and
//! zero-argument getters by name, and derives setters from getter names.

mod class;
pub use class::{Class, ClassBuilder, ClassField};

mod key_type;
pub use key_type::KeyType;

mod method;
pub use method::{GetterFn, Method, SetterFn};

mod object;
pub use object::Object;

mod registry;
pub use registry::Registry;

/// Returns the bean-style getter name for an attribute: `deptId` becomes
/// `getDeptId`. Only the first letter is uppercased.
pub fn getter_name(attribute: &str) -> String {
    format!("get{}", capitalize(attribute))
}

/// Returns the bean-style setter name for an attribute: `deptId` becomes
/// `setDeptId`.
pub fn setter_name(attribute: &str) -> String {
    format!("set{}", capitalize(attribute))
}

fn capitalize(attribute: &str) -> String {
    let mut chars = attribute.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derives the setter name matching a getter name (`getX` to `setX`).
pub fn setter_name_for_getter(getter: &str) -> Option<String> {
    getter
        .strip_prefix("get")
        .filter(|rest| !rest.is_empty())
        .map(|rest| format!("set{rest}"))
}
