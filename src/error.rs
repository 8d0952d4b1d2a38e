//! Error types for luabins

use crate::types::{MAX_TABLE_NESTING, MAX_TUPLE};

/// The buffer allocator could not provide the requested memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("can't save: failed to allocate memory")]
pub struct AllocationFailed;

/// Errors raised while saving a tuple
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    AllocationFailed(#[from] AllocationFailed),

    /// A value outside {nil, boolean, number, string, table}
    #[error("can't save: unsupported type detected ({0})")]
    UnsupportedType(&'static str),

    #[error("can't save: nesting is too deep (limit {limit})", limit = MAX_TABLE_NESTING)]
    TooDeep,

    #[error("can't save: too many arguments ({0}, limit {limit})", limit = MAX_TUPLE)]
    TooManyValues(usize),

    #[error("can't save: bad indices {from}..={to} (stack top {top})")]
    BadIndices { from: usize, to: usize, top: usize },

    /// A host table produced a nil or NaN key
    #[error("can't save: table key is nil or NaN")]
    InvalidKey,

    /// String length does not fit the 4-byte length field
    #[error("can't save: string of {0} bytes is too long")]
    StringTooLong(usize),

    /// A table part does not fit the 4-byte size field
    #[error("can't save: table of {0} entries is too large")]
    TableTooLarge(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a tuple
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Malformed tag, invalid key or not enough bytes
    #[error("can't load: corrupt data")]
    CorruptData,

    /// Impossible size field
    #[error("can't load: corrupt data, bad size")]
    CorruptSize,

    /// Bytes left over after the declared tuple
    #[error("can't load: extra data at end ({0} bytes)")]
    TrailingData(usize),

    /// Table nesting exceeds the configured ceiling
    #[error("can't load: nesting is too deep (limit {0})")]
    TooDeep(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_messages() {
        assert_eq!(LoadError::CorruptData.to_string(), "can't load: corrupt data");
        assert_eq!(
            LoadError::CorruptSize.to_string(),
            "can't load: corrupt data, bad size"
        );
        assert!(
            LoadError::TrailingData(3)
                .to_string()
                .starts_with("can't load: extra data at end")
        );
    }

    #[test]
    fn test_allocation_failure_converts() {
        let err: SaveError = AllocationFailed.into();
        assert!(matches!(err, SaveError::AllocationFailed(_)));
        assert_eq!(err.to_string(), "can't save: failed to allocate memory");
    }

    #[test]
    fn test_oversized_table_is_not_an_arity_error() {
        let err = SaveError::TableTooLarge(1 << 31);
        assert_eq!(
            err.to_string(),
            "can't save: table of 2147483648 entries is too large"
        );
        assert!(!err.to_string().contains("arguments"));
    }
}
