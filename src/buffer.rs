//! Growable byte buffer backing the save path
//!
//! Capacity grows geometrically (about 1.5x per step, never by less than
//! [`MIN_ALLOC`] bytes) and memory is obtained through an [`Allocator`], so
//! exhaustion is reported as [`AllocationFailed`] instead of aborting.
//!
//! Besides appending, the buffer supports patching bytes at an absolute
//! offset, which the table encoder uses to fill in a header after the
//! table's contents have been written.

use crate::error::AllocationFailed;

/// Smallest capacity increment
pub const MIN_ALLOC: usize = 256;

/// Memory source for [`SaveBuffer`]
pub trait Allocator {
    /// Resize `block` to exactly `new_size` bytes, preserving its contents.
    ///
    /// The old size is `block.len()`.
    fn resize(&mut self, block: Vec<u8>, new_size: usize) -> Result<Vec<u8>, AllocationFailed>;

    /// Give a non-empty block back
    fn release(&mut self, block: Vec<u8>) {
        drop(block);
    }
}

/// Global heap, with fallible reservation
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn resize(&mut self, mut block: Vec<u8>, new_size: usize) -> Result<Vec<u8>, AllocationFailed> {
        if new_size > block.len() {
            block
                .try_reserve_exact(new_size - block.len())
                .map_err(|_| AllocationFailed)?;
        }
        block.resize(new_size, 0);
        Ok(block)
    }
}

/// Append-and-patch byte buffer.
///
/// `data.len()` is the capacity; `end` is the logical length.
pub struct SaveBuffer<A: Allocator = SystemAllocator> {
    data: Vec<u8>,
    end: usize,
    alloc: A,
}

impl SaveBuffer<SystemAllocator> {
    pub fn new() -> Self {
        Self::with_allocator(SystemAllocator)
    }
}

impl Default for SaveBuffer<SystemAllocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> SaveBuffer<A> {
    pub fn with_allocator(alloc: A) -> Self {
        Self {
            data: Vec::new(),
            end: 0,
            alloc,
        }
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub fn allocator_mut(&mut self) -> &mut A {
        &mut self.alloc
    }

    /// Logical length
    pub fn len(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Written bytes. Invalidated by the next mutation.
    pub fn buffer(&self) -> &[u8] {
        &self.data[..self.end]
    }

    /// Ensure room for `delta` more bytes past the logical end
    pub fn grow(&mut self, delta: usize) -> Result<(), AllocationFailed> {
        let needed = self.end.checked_add(delta).ok_or(AllocationFailed)?;
        let buf_size = self.data.len();
        if needed <= buf_size {
            return Ok(());
        }

        let mut add = (buf_size / 2).max(MIN_ALLOC);
        let mut new_size = buf_size.checked_add(add).ok_or(AllocationFailed)?;
        while new_size < needed {
            add = add.checked_add(new_size / 2).ok_or(AllocationFailed)?;
            new_size = new_size.checked_add(add).ok_or(AllocationFailed)?;
        }

        let block = std::mem::take(&mut self.data);
        match self.alloc.resize(block, new_size) {
            Ok(block) => {
                self.data = block;
                Ok(())
            }
            Err(err) => {
                log::debug!("save buffer: failed to grow from {buf_size} to {new_size} bytes");
                self.end = 0;
                Err(err)
            }
        }
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<(), AllocationFailed> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.grow(bytes.len())?;
        self.data[self.end..self.end + bytes.len()].copy_from_slice(bytes);
        self.end += bytes.len();
        Ok(())
    }

    pub fn write_char(&mut self, byte: u8) -> Result<(), AllocationFailed> {
        self.write(&[byte])
    }

    /// Write `bytes` at `offset`, extending the buffer if they run past the end.
    ///
    /// Offsets beyond the logical end are clamped to it, turning the call
    /// into an append.
    pub fn overwrite(&mut self, offset: usize, bytes: &[u8]) -> Result<(), AllocationFailed> {
        if bytes.is_empty() {
            return Ok(());
        }
        let offset = offset.min(self.end);
        let stop = offset + bytes.len();
        if stop > self.end {
            self.grow(stop - self.end)?;
            self.end = stop;
        }
        self.data[offset..stop].copy_from_slice(bytes);
        Ok(())
    }

    pub fn overwrite_char(&mut self, offset: usize, byte: u8) -> Result<(), AllocationFailed> {
        self.overwrite(offset, &[byte])
    }

    /// Free the storage and reset to empty. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        let block = std::mem::take(&mut self.data);
        self.end = 0;
        if !block.is_empty() {
            self.alloc.release(block);
        }
    }

    /// Hand the written bytes to the caller
    pub fn into_vec(mut self) -> Vec<u8> {
        let mut data = std::mem::take(&mut self.data);
        data.truncate(self.end);
        self.end = 0;
        data
    }
}

impl<A: Allocator> Drop for SaveBuffer<A> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<A: Allocator> std::fmt::Debug for SaveBuffer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveBuffer")
            .field("end", &self.end)
            .field("buf_size", &self.data.len())
            .finish()
    }
}
