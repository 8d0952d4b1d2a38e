//! Value decoding

use super::LoadOptions;
use super::cursor::LoadCursor;
use super::table::load_table;
use crate::error::LoadError;
use crate::types::{Tag, Value};

/// Decode one value. `nesting` is the depth of the enclosing table (0 at top level).
pub fn load_value(
    cursor: &mut LoadCursor<'_>,
    nesting: usize,
    options: &LoadOptions,
) -> Result<Value, LoadError> {
    let tag_byte = cursor.read_byte().inspect_err(|_| {
        log::debug!("load: failed to read value type byte");
    })?;
    let Some(tag) = Tag::from_u8(tag_byte) else {
        log::debug!("load: unknown type char 0x{tag_byte:02X} found");
        return Err(LoadError::CorruptData);
    };

    let value = match tag {
        Tag::Nil => Value::Nil,
        Tag::False => Value::Boolean(false),
        Tag::True => Value::Boolean(true),
        Tag::Number => Value::Number(cursor.read_number()?),
        Tag::String => {
            let len = cursor.read_size()?;
            let bytes = cursor.eat(len as usize).ok_or_else(|| {
                log::debug!("load: string of {len} bytes runs past the input");
                LoadError::CorruptSize
            })?;
            Value::String(bytes.to_vec())
        }
        Tag::Table => Value::Table(load_table(cursor, nesting + 1, options)?),
    };
    log::trace!("load: {tag:?}");
    Ok(value)
}
