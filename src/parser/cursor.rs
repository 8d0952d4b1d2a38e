//! Fail-sticky read cursor over caller-owned bytes

use crate::error::LoadError;
use crate::types::{INT_SIZE, NUMBER_SIZE, SIZE_T_SIZE};
use byteorder::{ByteOrder, NativeEndian};

/// Forward-only view of the unread input.
///
/// The first read that runs past the end poisons the cursor: it reports
/// nothing left to read and every later read fails without looking at the
/// input again.
#[derive(Debug, Clone, Copy)]
pub struct LoadCursor<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> LoadCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: Some(data) }
    }

    /// False once a read has run out of input
    pub fn is_good(&self) -> bool {
        self.rest.is_some()
    }

    pub fn unread(&self) -> usize {
        self.rest.map_or(0, <[u8]>::len)
    }

    /// Consume exactly `len` bytes without copying
    pub fn eat(&mut self, len: usize) -> Option<&'a [u8]> {
        let rest = self.rest?;
        if rest.len() < len {
            log::debug!("load: failed to read {len} bytes, {} left", rest.len());
            self.rest = None;
            return None;
        }
        let (head, tail) = rest.split_at(len);
        self.rest = Some(tail);
        Some(head)
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], LoadError> {
        self.eat(len).ok_or(LoadError::CorruptData)
    }

    pub fn read_byte(&mut self) -> Result<u8, LoadError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_int(&mut self) -> Result<i32, LoadError> {
        Ok(NativeEndian::read_i32(self.read_bytes(INT_SIZE)?))
    }

    pub fn read_size(&mut self) -> Result<u32, LoadError> {
        Ok(NativeEndian::read_u32(self.read_bytes(SIZE_T_SIZE)?))
    }

    pub fn read_number(&mut self) -> Result<f64, LoadError> {
        Ok(NativeEndian::read_f64(self.read_bytes(NUMBER_SIZE)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sequence() {
        let mut data = vec![7u8];
        data.extend_from_slice(&(-5i32).to_ne_bytes());
        data.extend_from_slice(&9u32.to_ne_bytes());
        data.extend_from_slice(&1.5f64.to_ne_bytes());

        let mut cursor = LoadCursor::new(&data);
        assert_eq!(cursor.read_byte().unwrap(), 7);
        assert_eq!(cursor.read_int().unwrap(), -5);
        assert_eq!(cursor.read_size().unwrap(), 9);
        assert_eq!(cursor.read_number().unwrap(), 1.5);
        assert_eq!(cursor.unread(), 0);
        assert!(cursor.is_good());
    }

    #[test]
    fn test_empty_input() {
        let mut cursor = LoadCursor::new(&[]);
        assert!(cursor.is_good());
        assert!(matches!(cursor.read_byte(), Err(LoadError::CorruptData)));
        assert!(!cursor.is_good());
    }

    #[test]
    fn test_short_read_poisons() {
        let data = b"abc";
        let mut cursor = LoadCursor::new(data);
        assert!(cursor.eat(4).is_none());
        assert!(!cursor.is_good());
        assert_eq!(cursor.unread(), 0);
        // Bytes that were available before are gone too
        assert!(cursor.eat(1).is_none());
        assert!(cursor.eat(0).is_none());
    }

    #[test]
    fn test_eat_zero_and_all() {
        let data = b"hello";
        let mut cursor = LoadCursor::new(data);
        assert_eq!(cursor.eat(0), Some(&b""[..]));
        assert_eq!(cursor.eat(5), Some(&b"hello"[..]));
        assert_eq!(cursor.unread(), 0);
        assert!(cursor.is_good());
    }

    #[test]
    fn test_eat_is_zero_copy() {
        let data = b"hello";
        let mut cursor = LoadCursor::new(data);
        let slice = cursor.eat(5).unwrap();
        assert!(std::ptr::eq(slice.as_ptr(), data.as_ptr()));
    }
}
