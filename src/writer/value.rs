//! Recursive value and table encoding

use super::primitives::{
    write_boolean, write_nil, write_number, write_string, write_table_header,
    write_table_header_at,
};
use crate::buffer::{Allocator, SaveBuffer};
use crate::error::SaveError;
use crate::types::{HostKind, HostTable, HostValue, MAX_TABLE_NESTING};

/// Write one value. `nesting` is the depth of the enclosing table (0 at top level).
pub fn save_value<V: HostValue, A: Allocator>(
    sb: &mut SaveBuffer<A>,
    value: &V,
    nesting: usize,
) -> Result<(), SaveError> {
    match value.kind() {
        HostKind::Nil => write_nil(sb)?,
        HostKind::Boolean(b) => write_boolean(sb, b)?,
        HostKind::Number(x) => write_number(sb, x)?,
        HostKind::String(s) => write_string(sb, s)?,
        HostKind::Table(table) => save_table(sb, table, nesting + 1)?,
        HostKind::Unsupported(type_name) => {
            log::debug!("save: unsupported type {type_name}");
            return Err(SaveError::UnsupportedType(type_name));
        }
    }
    Ok(())
}

/// Write a placeholder header, the pairs, then patch the header with the real counts
fn save_table<V: HostValue, A: Allocator>(
    sb: &mut SaveBuffer<A>,
    table: &dyn HostTable<V>,
    nesting: usize,
) -> Result<(), SaveError> {
    if nesting > MAX_TABLE_NESTING {
        log::debug!("save: table nesting {nesting} is too deep");
        return Err(SaveError::TooDeep);
    }

    let header_pos = sb.len();
    write_table_header(sb, 0, 0)?;

    let mut total = 0usize;
    table.try_for_each_pair(&mut |key, value| {
        if key.kind().is_invalid_key() {
            log::debug!("save: nil or NaN table key");
            return Err(SaveError::InvalidKey);
        }
        save_value(sb, key, nesting)?;
        save_value(sb, value, nesting)?;
        total += 1;
        Ok(())
    })?;

    let array_size = total.min(table.border());
    let hash_size = total - array_size;
    log::trace!("save: table a:{array_size} + h:{hash_size} at {header_pos}");

    let (Ok(array_size), Ok(hash_size)) = (i32::try_from(array_size), i32::try_from(hash_size))
    else {
        return Err(SaveError::TableTooLarge(total));
    };
    write_table_header_at(sb, header_pos, array_size, hash_size)?;
    Ok(())
}
