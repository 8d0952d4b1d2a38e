//! Encode-side codec: append one tagged value to a buffer
//!
//! All integer fields are native-endian and fixed width; numbers are raw
//! native-endian IEEE-754 doubles.

use crate::buffer::{Allocator, SaveBuffer};
use crate::error::{AllocationFailed, SaveError};
use crate::types::{INT_SIZE, NUMBER_SIZE, SIZE_T_SIZE, TABLE_HEADER_SIZE, Tag};
use byteorder::{ByteOrder, NativeEndian};

pub fn write_tuple_size<A: Allocator>(
    sb: &mut SaveBuffer<A>,
    count: u8,
) -> Result<(), AllocationFailed> {
    sb.write_char(count)
}

pub fn write_nil<A: Allocator>(sb: &mut SaveBuffer<A>) -> Result<(), AllocationFailed> {
    sb.write_char(Tag::Nil as u8)
}

pub fn write_boolean<A: Allocator>(
    sb: &mut SaveBuffer<A>,
    value: bool,
) -> Result<(), AllocationFailed> {
    sb.write_char(Tag::boolean(value) as u8)
}

pub fn write_number<A: Allocator>(
    sb: &mut SaveBuffer<A>,
    value: f64,
) -> Result<(), AllocationFailed> {
    let mut bytes = [0u8; 1 + NUMBER_SIZE];
    bytes[0] = Tag::Number as u8;
    NativeEndian::write_f64(&mut bytes[1..], value);
    sb.write(&bytes)
}

pub fn write_string<A: Allocator>(sb: &mut SaveBuffer<A>, value: &[u8]) -> Result<(), SaveError> {
    let len = u32::try_from(value.len()).map_err(|_| SaveError::StringTooLong(value.len()))?;
    let mut header = [0u8; 1 + SIZE_T_SIZE];
    header[0] = Tag::String as u8;
    NativeEndian::write_u32(&mut header[1..], len);
    sb.write(&header)?;
    sb.write(value)?;
    Ok(())
}

/// Append a table header
pub fn write_table_header<A: Allocator>(
    sb: &mut SaveBuffer<A>,
    array_size: i32,
    hash_size: i32,
) -> Result<(), AllocationFailed> {
    sb.write(&table_header(array_size, hash_size))
}

/// Rewrite a table header previously written at `offset`
pub fn write_table_header_at<A: Allocator>(
    sb: &mut SaveBuffer<A>,
    offset: usize,
    array_size: i32,
    hash_size: i32,
) -> Result<(), AllocationFailed> {
    sb.overwrite(offset, &table_header(array_size, hash_size))
}

fn table_header(array_size: i32, hash_size: i32) -> [u8; TABLE_HEADER_SIZE] {
    let mut bytes = [0u8; TABLE_HEADER_SIZE];
    bytes[0] = Tag::Table as u8;
    NativeEndian::write_i32(&mut bytes[1..1 + INT_SIZE], array_size);
    NativeEndian::write_i32(&mut bytes[1 + INT_SIZE..], hash_size);
    bytes
}
