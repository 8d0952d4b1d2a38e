//! Table decoding

use super::LoadOptions;
use super::cursor::LoadCursor;
use super::value::load_value;
use crate::error::LoadError;
use crate::types::{MAX_ARRAY_SIZE, MAX_HASH_BITS, MIN_LARGE_VALUE_SIZE, Table};

/// Cheapest possible encoding of `total` key/value pairs.
///
/// Only two keys (true and false) fit in one byte, every other key takes at
/// least a string header, and every value takes at least one byte.
pub fn min_table_data_size(total: usize) -> usize {
    if total > 2 {
        (total - 2)
            .saturating_mul(MIN_LARGE_VALUE_SIZE + 1)
            .saturating_add(2 * 2)
    } else {
        total * 2
    }
}

fn ceil_log2(x: u32) -> u32 {
    debug_assert!(x > 0);
    u32::BITS - (x - 1).leading_zeros()
}

/// Decode a table body (after its tag). `nesting` is this table's depth.
pub fn load_table(
    cursor: &mut LoadCursor<'_>,
    nesting: usize,
    options: &LoadOptions,
) -> Result<Table, LoadError> {
    if let Some(max) = options.max_nesting {
        if nesting > max {
            log::debug!("load: table nesting {nesting} exceeds {max}");
            return Err(LoadError::TooDeep(max));
        }
    }

    let array_size = cursor.read_int()?;
    let hash_size = cursor.read_int()?;

    let (Ok(array_len), Ok(hash_len)) = (usize::try_from(array_size), usize::try_from(hash_size))
    else {
        log::debug!("load: negative table size a:{array_size} h:{hash_size}");
        return Err(LoadError::CorruptSize);
    };
    let total = array_len + hash_len;
    if array_size > MAX_ARRAY_SIZE
        || (hash_size > 0 && ceil_log2(hash_size as u32) > MAX_HASH_BITS)
        || cursor.unread() < min_table_data_size(total)
    {
        log::debug!(
            "load: bad table size a:{array_size} h:{hash_size} with {} bytes left",
            cursor.unread()
        );
        return Err(LoadError::CorruptSize);
    }

    log::trace!("load: creating table a:{array_len} + h:{hash_len} = {total}");
    let mut table = Table::with_capacity(array_len, hash_len);
    for _ in 0..total {
        let key = load_value(cursor, nesting, options)?;
        if key.is_invalid_key() {
            log::debug!("load: nil or NaN as key detected");
            return Err(LoadError::CorruptData);
        }
        let value = load_value(cursor, nesting, options)?;
        table.set(key, value).map_err(|_| LoadError::CorruptData)?;
    }
    Ok(table)
}
