//! Serialization of value tuples

mod primitives;
mod value;

pub use primitives::{
    write_boolean, write_nil, write_number, write_string, write_table_header,
    write_table_header_at, write_tuple_size,
};
pub use value::save_value;

use crate::buffer::{Allocator, SaveBuffer};
use crate::error::SaveError;
use crate::types::{HostValue, MAX_TUPLE};
use std::io::Write;

/// Encode `values` as one tuple into `sb`.
///
/// On failure the buffer is released, whatever it held before.
pub fn save_into<V: HostValue, A: Allocator>(
    sb: &mut SaveBuffer<A>,
    values: &[V],
) -> Result<(), SaveError> {
    let result = save_tuple(sb, values);
    if result.is_err() {
        sb.destroy();
    }
    result
}

fn save_tuple<V: HostValue, A: Allocator>(
    sb: &mut SaveBuffer<A>,
    values: &[V],
) -> Result<(), SaveError> {
    let count = u8::try_from(values.len())
        .ok()
        .filter(|&n| usize::from(n) <= MAX_TUPLE)
        .ok_or(SaveError::TooManyValues(values.len()))?;

    write_tuple_size(sb, count)?;
    for (i, value) in values.iter().enumerate() {
        log::trace!("save: tuple item {i}");
        save_value(sb, value, 0)?;
    }
    Ok(())
}

/// Encode `values` as one tuple
pub fn save<V: HostValue>(values: &[V]) -> Result<Vec<u8>, SaveError> {
    let mut sb = SaveBuffer::new();
    save_into(&mut sb, values)?;
    Ok(sb.into_vec())
}

/// Encode the 1-based inclusive range `from..=to` of a host stack.
///
/// `to < from` selects the empty tuple.
pub fn save_range<V: HostValue>(stack: &[V], from: usize, to: usize) -> Result<Vec<u8>, SaveError> {
    save(select_range(stack, from, to)?)
}

fn select_range<V>(stack: &[V], from: usize, to: usize) -> Result<&[V], SaveError> {
    if to < from {
        return Ok(&[]);
    }
    let count = to - from + 1;
    if count > MAX_TUPLE {
        return Err(SaveError::TooManyValues(count));
    }
    if from == 0 || to > stack.len() {
        log::debug!("save: bad indices {from}..={to}, stack top {}", stack.len());
        return Err(SaveError::BadIndices {
            from,
            to,
            top: stack.len(),
        });
    }
    Ok(&stack[from - 1..to])
}

/// Encode `values` as one tuple and write it out
pub fn write<W: Write, V: HostValue>(writer: &mut W, values: &[V]) -> Result<(), SaveError> {
    let bytes = save(values)?;
    writer.write_all(&bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::tests::{FailingAllocator, RecordingAllocator};
    use crate::types::{HostKind, HostTable, Table, Value};

    /// Host with kinds the format cannot carry
    enum Host {
        Plain(Value),
        Function,
        Pairs(HostPairs),
    }

    struct HostPairs(Vec<(Host, Host)>);

    impl HostTable<Host> for HostPairs {
        fn border(&self) -> usize {
            0
        }

        fn try_for_each_pair(
            &self,
            f: &mut dyn FnMut(&Host, &Host) -> Result<(), SaveError>,
        ) -> Result<(), SaveError> {
            for (k, v) in &self.0 {
                f(k, v)?;
            }
            Ok(())
        }
    }

    impl HostValue for Host {
        fn kind(&self) -> HostKind<'_, Self> {
            match self {
                Host::Plain(Value::Nil) => HostKind::Nil,
                Host::Plain(Value::Boolean(b)) => HostKind::Boolean(*b),
                Host::Plain(Value::Number(x)) => HostKind::Number(*x),
                Host::Plain(Value::String(s)) => HostKind::String(s),
                Host::Plain(Value::Table(_)) => HostKind::Unsupported("table"),
                Host::Function => HostKind::Unsupported("function"),
                Host::Pairs(pairs) => HostKind::Table(pairs),
            }
        }
    }

    #[test]
    fn test_empty_tuple() {
        assert_eq!(save::<Value>(&[]).unwrap(), [0u8]);
    }

    #[test]
    fn test_true_number_string() {
        let bytes = save(&[Value::from(true), Value::from(42.0), Value::from("ab")]).unwrap();

        let mut expected = vec![0x03, 0x31, 0x4E];
        expected.extend_from_slice(&42.0f64.to_ne_bytes());
        expected.push(0x53);
        expected.extend_from_slice(&2u32.to_ne_bytes());
        expected.extend_from_slice(b"ab");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_tuple_arity_limit() {
        let values = vec![Value::Nil; MAX_TUPLE];
        let bytes = save(&values).unwrap();
        assert_eq!(bytes.len(), 1 + MAX_TUPLE);
        assert_eq!(bytes[0], 250);

        let values = vec![Value::Nil; MAX_TUPLE + 1];
        assert!(matches!(save(&values), Err(SaveError::TooManyValues(251))));

        let values = vec![Value::Nil; 300];
        assert!(matches!(save(&values), Err(SaveError::TooManyValues(300))));
    }

    #[test]
    fn test_unsupported_type() {
        let values = [Host::Plain(Value::from(1)), Host::Function];
        assert!(matches!(
            save(&values),
            Err(SaveError::UnsupportedType("function"))
        ));
    }

    #[test]
    fn test_unsupported_type_in_table() {
        let values = [Host::Pairs(HostPairs(vec![(
            Host::Plain(Value::from("f")),
            Host::Function,
        )]))];
        assert!(matches!(
            save(&values),
            Err(SaveError::UnsupportedType("function"))
        ));
    }

    #[test]
    fn test_nil_and_nan_keys_rejected() {
        let nil_key = [Host::Pairs(HostPairs(vec![(
            Host::Plain(Value::Nil),
            Host::Plain(Value::from(1)),
        )]))];
        assert!(matches!(save(&nil_key), Err(SaveError::InvalidKey)));

        let nan_key = [Host::Pairs(HostPairs(vec![(
            Host::Plain(Value::Number(f64::NAN)),
            Host::Plain(Value::from(1)),
        )]))];
        assert!(matches!(save(&nan_key), Err(SaveError::InvalidKey)));
    }

    #[test]
    fn test_host_table_counts_everything_as_hash() {
        let values = [Host::Pairs(HostPairs(vec![
            (Host::Plain(Value::from(1)), Host::Plain(Value::from(true))),
            (Host::Plain(Value::from(2)), Host::Plain(Value::from(false))),
        ]))];
        let bytes = save(&values).unwrap();
        assert_eq!(&bytes[..2], &[1, b'T']);
        assert_eq!(&bytes[2..6], &0i32.to_ne_bytes());
        assert_eq!(&bytes[6..10], &2i32.to_ne_bytes());
    }

    #[test]
    fn test_save_range() {
        let stack = [Value::from("a"), Value::from("b"), Value::from("c")];
        assert_eq!(save_range(&stack, 2, 3).unwrap(), save(&stack[1..]).unwrap());
        assert_eq!(save_range(&stack, 1, 3).unwrap(), save(&stack).unwrap());
        assert_eq!(save_range(&stack, 3, 2).unwrap(), [0u8]);
        assert_eq!(save_range(&stack, 4, 3).unwrap(), [0u8]);
    }

    #[test]
    fn test_save_range_bad_indices() {
        let stack = [Value::from("a"), Value::from("b")];
        assert!(matches!(
            save_range(&stack, 0, 1),
            Err(SaveError::BadIndices { from: 0, to: 1, top: 2 })
        ));
        assert!(matches!(
            save_range(&stack, 1, 3),
            Err(SaveError::BadIndices { .. })
        ));
        assert!(matches!(
            save_range(&stack, 1, 300),
            Err(SaveError::TooManyValues(300))
        ));
    }

    #[test]
    fn test_failure_releases_buffer() {
        let mut sb = SaveBuffer::with_allocator(RecordingAllocator::default());
        let values = [Host::Plain(Value::from("x")), Host::Function];
        assert!(save_into(&mut sb, &values).is_err());
        assert!(sb.is_empty());
        assert_eq!(sb.allocator().events, vec![(0, 256), (256, 0)]);
    }

    #[test]
    fn test_allocation_failure() {
        let mut sb = SaveBuffer::with_allocator(FailingAllocator);
        assert!(matches!(
            save_into(&mut sb, &[Value::Nil]),
            Err(SaveError::AllocationFailed(_))
        ));
        assert!(sb.is_empty());
    }

    #[test]
    fn test_write_to_io() {
        let mut out = Vec::new();
        write(&mut out, &[Value::from(false)]).unwrap();
        assert_eq!(out, [1, b'0']);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_io_error() {
        match write(&mut BrokenPipe, &[Value::from("x")]) {
            Err(SaveError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_table_bytes() {
        let inner = Table::from(vec![Value::from("x")]);
        let outer = Table::from(vec![Value::Table(inner)]);
        let bytes = save(&[Value::Table(outer)]).unwrap();
        // count, outer header, key 1, inner header, key 1, "x"
        assert_eq!(bytes.len(), 1 + 9 + 9 + 9 + 9 + 6);
    }
}
