//! Wire format constants
//!
//! These values are part of the frozen byte contract. Changing any of them
//! makes previously written data unreadable.

/// Maximum number of values in a saved tuple
pub const MAX_TUPLE: usize = 250;

/// Maximum table nesting depth accepted by save
pub const MAX_TABLE_NESTING: usize = 250;

/// Largest array part a loaded table may declare
pub const MAX_ARRAY_SIZE: i32 = 1 << 26;

/// Largest `ceil(log2(hash_size))` a loaded table may declare
pub const MAX_HASH_BITS: u32 = 30;

/// Width of the table size fields
pub const INT_SIZE: usize = 4;

/// Width of the string length field
pub const SIZE_T_SIZE: usize = 4;

/// Width of a number payload
pub const NUMBER_SIZE: usize = 8;

/// Encoded size of a table header (tag + array size + hash size)
pub const TABLE_HEADER_SIZE: usize = 1 + INT_SIZE + INT_SIZE;

/// Smallest encoded size of a value that is neither nil nor boolean.
///
/// Strings have the shortest header of the three.
pub const MIN_LARGE_VALUE_SIZE: usize = {
    let number = 1 + NUMBER_SIZE;
    let string = 1 + SIZE_T_SIZE;
    let smallest = if number < string { number } else { string };
    if TABLE_HEADER_SIZE < smallest {
        TABLE_HEADER_SIZE
    } else {
        smallest
    }
};
