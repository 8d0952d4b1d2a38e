//! luabins - Compact binary serialization for Lua-style value tuples
//!
//! Encodes a tuple of up to 250 values (nil, boolean, number, string and
//! nested tables) into a dense byte string, and loads it back while rejecting
//! malformed, truncated or size-inconsistent input.
//!
//! # Format
//!
//! ```text
//! Tuple  := Count(1 byte, 0..=250) Value*
//! Value  := '-' | '0' | '1'
//!         | 'N' Double(8)
//!         | 'S' Length(4) Bytes
//!         | 'T' ArraySize(4) HashSize(4) (Value Value)*
//! ```
//!
//! Integers and doubles are written in native byte order, so data is only
//! portable between machines sharing endianness and float representation.
//!
//! # Example
//!
//! ```rust
//! use luabins::{Table, Value, load, save};
//!
//! let mut config = Table::new();
//! config.set("name", "demo").unwrap();
//! config.set("ratio", 0.75).unwrap();
//!
//! let values = vec![Value::from(true), Value::Table(config)];
//! let bytes = save(&values).unwrap();
//! assert_eq!(load(&bytes).unwrap(), values);
//! ```

pub mod buffer;
pub mod error;
pub mod parser;
pub mod types;
pub mod writer;

// Re-export common types at crate root
pub use buffer::{Allocator, MIN_ALLOC, SaveBuffer, SystemAllocator};
pub use error::{AllocationFailed, LoadError, SaveError};
pub use parser::{LoadOptions, load, load_with};
pub use types::{
    HostKind, HostTable, HostValue, MAX_TABLE_NESTING, MAX_TUPLE, Table, TableError, Tag, Value,
};
pub use writer::{save, save_into, save_range};
