//! Tables with a dense array part and a hashed part

use super::Value;
use indexmap::{Equivalent, IndexMap};
use rustc_hash::FxBuildHasher;
use std::borrow::Cow;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("table index is nil")]
    IndexIsNil,

    #[error("table index is NaN")]
    IndexIsNaN,
}

/// Hash part key. Never nil or NaN, so equality is reflexive.
#[derive(Debug, Clone)]
struct Key(Value);

/// Borrowed lookup key
struct KeyRef<'a>(&'a Value);

/// Borrowed string lookup key
struct Field<'a>(&'a [u8]);

const STRING_DISCRIMINANT: u8 = 3;

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::Nil => state.write_u8(0),
        Value::Boolean(b) => {
            state.write_u8(1);
            b.hash(state);
        }
        Value::Number(x) => {
            state.write_u8(2);
            // -0.0 == 0.0
            let bits = if *x == 0.0 { 0 } else { x.to_bits() };
            state.write_u64(bits);
        }
        Value::String(s) => hash_bytes(s, state),
        Value::Table(t) => {
            // Equal tables share their array part and hash part size
            state.write_u8(4);
            state.write_usize(t.array.len());
            for v in &t.array {
                hash_value(v, state);
            }
            state.write_usize(t.hash.len());
        }
    }
}

fn hash_bytes<H: Hasher>(bytes: &[u8], state: &mut H) {
    state.write_u8(STRING_DISCRIMINANT);
    bytes.hash(state);
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Key {}

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(self.0, state);
    }
}

impl Equivalent<Key> for KeyRef<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        *self.0 == key.0
    }
}

impl Hash for Field<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bytes(self.0, state);
    }
}

impl Equivalent<Key> for Field<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        matches!(&key.0, Value::String(s) if s.as_slice() == self.0)
    }
}

/// A key/value mapping in the shape of a Lua table.
///
/// Keys `1..=n` with non-nil values live in the array part; everything else
/// lives in the hash part, which iterates in insertion order until a key is
/// removed. The hash part never holds the key `n + 1`, so the array length
/// is always a valid border.
#[derive(Debug, Clone, Default)]
pub struct Table {
    array: Vec<Value>,
    hash: IndexMap<Key, Value, FxBuildHasher>,
}

impl From<Vec<Value>> for Table {
    fn from(values: Vec<Value>) -> Self {
        let mut table = Table::with_capacity(values.len(), 0);
        for value in values {
            table.push(value);
        }
        table
    }
}

impl Table {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(array_len: usize, hash_len: usize) -> Self {
        Self {
            array: Vec::with_capacity(array_len),
            hash: IndexMap::with_capacity_and_hasher(hash_len, FxBuildHasher),
        }
    }

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    /// Pairs of the hash part
    pub fn hash(&self) -> impl ExactSizeIterator<Item = (&Value, &Value)> {
        self.hash.iter().map(|(k, v)| (&k.0, v))
    }

    /// Number of key/value pairs
    pub fn len(&self) -> usize {
        self.array.len() + self.hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the dense `1..=n` prefix (`#t`)
    pub fn border(&self) -> usize {
        self.array.len()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        if let Some(i) = key.as_index() {
            if let Some(value) = self.array.get(i - 1) {
                return Some(value);
            }
        }
        self.hash.get(&KeyRef(key))
    }

    pub fn get_index(&self, i: usize) -> Option<&Value> {
        self.get(&Value::Number(i as f64))
    }

    pub fn get_field(&self, field: &str) -> Option<&Value> {
        self.hash.get(&Field(field.as_bytes()))
    }

    /// Raw assignment. Assigning nil removes the key.
    pub fn set<K, V>(&mut self, key: K, value: V) -> Result<(), TableError>
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let key = key.into();
        let value = value.into();
        match key {
            Value::Nil => return Err(TableError::IndexIsNil),
            Value::Number(x) if x.is_nan() => return Err(TableError::IndexIsNaN),
            _ => (),
        }

        if let Some(i) = key.as_index() {
            if i <= self.array.len() {
                if value.is_nil() {
                    let tail = self.array.split_off(i - 1);
                    for (offset, v) in tail.into_iter().enumerate().skip(1) {
                        self.hash.insert(Key(Value::Number((i + offset) as f64)), v);
                    }
                } else {
                    self.array[i - 1] = value;
                }
                return Ok(());
            }
            if i == self.array.len() + 1 && !value.is_nil() {
                self.array.push(value);
                self.migrate_from_hash();
                return Ok(());
            }
        }

        if value.is_nil() {
            self.hash.swap_remove(&KeyRef(&key));
        } else {
            self.hash.insert(Key(key), value);
        }
        Ok(())
    }

    /// Append at `#t + 1`. Pushing nil is a no-op.
    pub fn push<V: Into<Value>>(&mut self, value: V) {
        let value = value.into();
        if !value.is_nil() {
            self.array.push(value);
            self.migrate_from_hash();
        }
    }

    /// Iterate pairs, array part first
    pub fn iter(&self) -> impl Iterator<Item = (Cow<'_, Value>, &Value)> {
        let array = self
            .array
            .iter()
            .enumerate()
            .map(|(i, v)| (Cow::Owned(Value::Number((i + 1) as f64)), v));
        let hash = self.hash.iter().map(|(k, v)| (Cow::Borrowed(&k.0), v));
        array.chain(hash)
    }

    fn migrate_from_hash(&mut self) {
        while !self.hash.is_empty() {
            let next = Value::Number((self.array.len() + 1) as f64);
            match self.hash.swap_remove(&KeyRef(&next)) {
                Some(value) => self.array.push(value),
                None => break,
            }
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.array == other.array
            && self.hash.len() == other.hash.len()
            && self.hash.iter().all(|(k, v)| other.hash.get(k) == Some(v))
    }
}
