//! Value types

use super::{HostValue, Table};

/// Value type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Nil = b'-',
    False = b'0',
    True = b'1',
    Number = b'N',
    String = b'S',
    Table = b'T',
}

impl Tag {
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            b'-' => Some(Tag::Nil),
            b'0' => Some(Tag::False),
            b'1' => Some(Tag::True),
            b'N' => Some(Tag::Number),
            b'S' => Some(Tag::String),
            b'T' => Some(Tag::Table),
            _ => None,
        }
    }

    pub fn boolean(b: bool) -> Self {
        if b { Tag::True } else { Tag::False }
    }
}

/// A serializable value
///
/// Strings are raw byte sequences and may contain embedded zeros.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Number(f64),
    String(Vec<u8>),
    Table(Table),
}

impl Value {
    /// Get the leading tag this value encodes with
    pub fn tag(&self) -> Tag {
        match self {
            Value::Nil => Tag::Nil,
            Value::Boolean(b) => Tag::boolean(*b),
            Value::Number(_) => Tag::Number,
            Value::String(_) => Tag::String,
            Value::Table(_) => Tag::Table,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// True for values that may not be used as table keys
    pub fn is_invalid_key(&self) -> bool {
        self.kind().is_invalid_key()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as UTF-8 text
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|s| std::str::from_utf8(s).ok())
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Interpret as an array index (positive integral number)
    pub(crate) fn as_index(&self) -> Option<usize> {
        match self {
            Value::Number(x) if *x >= 1.0 && x.fract() == 0.0 && *x <= usize::MAX as f64 => {
                Some(*x as usize)
            }
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v.into())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::String(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.as_bytes().to_vec())
    }
}

impl From<Table> for Value {
    fn from(v: Table) -> Self {
        Value::Table(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}
