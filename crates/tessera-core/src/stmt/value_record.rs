use super::Value;

use std::ops;

/// An ordered sequence of values.
///
/// The key policy returns primary keys in this form: one converted column
/// value per primary-key column, in the descriptor's declared order.
#[derive(Debug, Default, Clone)]
pub struct ValueRecord {
    pub fields: Vec<Value>,
}

impl ValueRecord {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.fields.push(value.into());
    }
}

impl ops::Deref for ValueRecord {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.fields[..]
    }
}

impl PartialEq for ValueRecord {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl PartialEq<[Value]> for ValueRecord {
    fn eq(&self, other: &[Value]) -> bool {
        **self == *other
    }
}

impl<const N: usize> PartialEq<[Value; N]> for ValueRecord {
    fn eq(&self, other: &[Value; N]) -> bool {
        **self == other[..]
    }
}
