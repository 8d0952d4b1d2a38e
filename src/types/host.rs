//! Host value model walked by the save driver
//!
//! Save does not require the crate's own [`Value`]: any host representation
//! can be encoded by describing each value through [`HostValue::kind`].
//! Kinds outside the closed serializable set report
//! [`HostKind::Unsupported`] and fail the save.

use super::{Table, Value};
use crate::error::SaveError;

/// Dynamic kind of a host value, borrowed from it
pub enum HostKind<'a, V> {
    Nil,
    Boolean(bool),
    Number(f64),
    String(&'a [u8]),
    Table(&'a dyn HostTable<V>),
    /// Functions, threads, userdata and the like. Carries the host's type name.
    Unsupported(&'static str),
}

impl<V> HostKind<'_, V> {
    /// True for kinds that may not be used as table keys: nil and NaN
    pub fn is_invalid_key(&self) -> bool {
        match self {
            HostKind::Nil => true,
            HostKind::Number(x) => x.is_nan(),
            _ => false,
        }
    }
}

pub trait HostValue: Sized {
    fn kind(&self) -> HostKind<'_, Self>;
}

/// Host table: key/value pairs plus the host's notion of dense length
pub trait HostTable<V> {
    /// Length of the array-like prefix (`#t`)
    fn border(&self) -> usize;

    /// Visit every pair in natural iteration order, stopping at the first error
    fn try_for_each_pair(
        &self,
        f: &mut dyn FnMut(&V, &V) -> Result<(), SaveError>,
    ) -> Result<(), SaveError>;
}

impl HostValue for Value {
    fn kind(&self) -> HostKind<'_, Self> {
        match self {
            Value::Nil => HostKind::Nil,
            Value::Boolean(b) => HostKind::Boolean(*b),
            Value::Number(x) => HostKind::Number(*x),
            Value::String(s) => HostKind::String(s),
            Value::Table(t) => HostKind::Table(t),
        }
    }
}

impl HostTable<Value> for Table {
    fn border(&self) -> usize {
        Table::border(self)
    }

    fn try_for_each_pair(
        &self,
        f: &mut dyn FnMut(&Value, &Value) -> Result<(), SaveError>,
    ) -> Result<(), SaveError> {
        for (key, value) in self.iter() {
            f(&key, value)?;
        }
        Ok(())
    }
}
