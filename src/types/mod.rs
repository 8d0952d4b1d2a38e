//! Core types for the luabins format

mod format;
mod host;
mod table;
mod value;

pub use format::{
    INT_SIZE, MAX_ARRAY_SIZE, MAX_HASH_BITS, MAX_TABLE_NESTING, MAX_TUPLE, MIN_LARGE_VALUE_SIZE,
    NUMBER_SIZE, SIZE_T_SIZE, TABLE_HEADER_SIZE,
};
pub use host::{HostKind, HostTable, HostValue};
pub use table::{Table, TableError};
pub use value::{Tag, Value};
