//! Decoding of value tuples
//!
//! Every length field is checked against the remaining input before it is
//! trusted, and a load either returns every value of the tuple or nothing.

mod cursor;
mod table;
mod value;

pub use cursor::LoadCursor;
pub use table::{load_table, min_table_data_size};
pub use value::load_value;

use crate::error::LoadError;
use crate::types::{MAX_TABLE_NESTING, MAX_TUPLE, Value};
use std::io::Read;

/// Knobs for [`load_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Deepest table nesting accepted, `None` for no limit.
    ///
    /// Defaults to the depth save is able to produce.
    pub max_nesting: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_nesting: Some(MAX_TABLE_NESTING),
        }
    }
}

/// Decode a complete tuple with default options
pub fn load(data: &[u8]) -> Result<Vec<Value>, LoadError> {
    load_with(data, &LoadOptions::default())
}

/// Decode a complete tuple.
///
/// The tuple size is the length of the returned vector. Trailing bytes after
/// the last value are an error.
pub fn load_with(data: &[u8], options: &LoadOptions) -> Result<Vec<Value>, LoadError> {
    let mut cursor = LoadCursor::new(data);

    let count = cursor.read_byte().inspect_err(|_| {
        log::debug!("load: failed to read tuple size byte");
    })?;
    let count = usize::from(count);
    if count > MAX_TUPLE {
        log::debug!("load: tuple too large: {count}");
        return Err(LoadError::CorruptSize);
    }

    log::trace!("load: tuple size {count}");
    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        log::trace!("load: loading tuple item {i}");
        values.push(load_value(&mut cursor, 0, options)?);
    }

    if cursor.unread() > 0 {
        log::debug!("load: {} bytes left at tail", cursor.unread());
        return Err(LoadError::TrailingData(cursor.unread()));
    }
    Ok(values)
}

/// Read everything from `reader` and decode it as one tuple
pub fn read<R: Read>(reader: &mut R) -> Result<Vec<Value>, LoadError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    load(&data)
}
