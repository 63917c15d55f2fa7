//! Append-only string arena addressed by offset
//!
//! Strings are stored back to back, each followed by a NUL byte. Callers hold
//! a [`StrOffset`] rather than a reference, so the backing buffer can be
//! reallocated without invalidating anything handed out earlier.

use std::fmt;

use bstr::{BStr, ByteSlice};

use crate::error::{IpeError, Result};

/// Starting capacity used by [`StringTable::new`]
pub const DEFAULT_CAPACITY: usize = 128;

/// Byte offset of a NUL-terminated string within a string table
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrOffset(u32);

impl StrOffset {
    pub fn new(offset: u32) -> Self {
        Self(offset)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StrOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Growable byte buffer of NUL-terminated strings
#[derive(Debug)]
pub struct StringTable {
    /// Backing storage; `buffer.len()` is the number of bytes used
    buffer: Vec<u8>,
    /// Capacity according to the growth policy
    capacity: usize,
}

impl StringTable {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(DEFAULT_CAPACITY),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create an empty table with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| IpeError::Alloc { requested: capacity })?;
        Ok(Self { buffer, capacity })
    }

    /// Append `text` plus a NUL terminator, returning where `text` begins
    ///
    /// When the remaining room is too small the table grows to
    /// `2 * capacity + text.len()` bytes. On error the table is unchanged.
    pub fn insert(&mut self, text: &str) -> Result<StrOffset> {
        let bytes = text.as_bytes();
        if let Some(position) = bytes.find_byte(0) {
            return Err(IpeError::InteriorNul { position });
        }

        let used = self.buffer.len();
        let needed = used + bytes.len() + 1;
        if needed > u32::MAX as usize {
            return Err(IpeError::OffsetOverflow { used });
        }

        if needed > self.capacity {
            self.grow(bytes.len(), needed)?;
        }

        self.buffer.extend_from_slice(bytes);
        self.buffer.push(0);
        Ok(StrOffset(used as u32))
    }

    fn grow(&mut self, len: usize, needed: usize) -> Result<()> {
        // A zero-capacity table would otherwise grow to exactly `len`.
        let new_capacity = self
            .capacity
            .checked_mul(2)
            .and_then(|c| c.checked_add(len))
            .ok_or(IpeError::Alloc { requested: usize::MAX })?
            .max(needed);

        self.buffer
            .try_reserve_exact(new_capacity - self.buffer.len())
            .map_err(|_| IpeError::Alloc { requested: new_capacity })?;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Resolve an offset previously returned by [`insert`](Self::insert)
    pub fn get(&self, offset: StrOffset) -> Result<&BStr> {
        read_cstr(&self.buffer, offset)
    }

    /// Number of bytes occupied, terminators included
    pub fn used(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the table and hand over the finished buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the NUL-terminated string starting at `offset` in `bytes`
pub fn read_cstr(bytes: &[u8], offset: StrOffset) -> Result<&BStr> {
    let start = offset.get() as usize;
    if start >= bytes.len() {
        return Err(IpeError::OffsetOutOfBounds { offset: offset.get() });
    }

    let tail = &bytes[start..];
    let end = tail
        .find_byte(0)
        .ok_or(IpeError::Unterminated { offset: offset.get() })?;
    Ok(tail[..end].as_bstr())
}
