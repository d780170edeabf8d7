use std::ops::Index;

use crate::{Bytes, Error, Result};

/// Growable byte store with a read cursor.
///
/// Appends always land at the end and never move the cursor; only reads,
/// [`skip`](Buffer::skip) and [`set_position`](Buffer::set_position) do.
/// `position <= size()` holds at all times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    data: Vec<u8>,
    position: usize,
}

impl Buffer {
    pub fn new() -> Buffer {
        Buffer::default()
    }

    pub fn with_capacity(capacity: usize) -> Buffer {
        Buffer {
            data: Vec::with_capacity(capacity),
            position: 0,
        }
    }

    /// A buffer holding a copy of `bytes`, cursor at the start.
    pub fn from_bytes(bytes: &Bytes) -> Buffer {
        Buffer::from(bytes.as_slice())
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::out_of_range(position, self.data.len()));
        }
        self.position = position;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        let target = self
            .position
            .checked_add(n)
            .filter(|target| *target <= self.data.len())
            .ok_or_else(|| Error::out_of_range(self.position.saturating_add(n), self.data.len()))?;
        self.position = target;
        Ok(())
    }

    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Grows with zeroes or truncates. A cursor past the new end is pulled back to it.
    pub fn resize(&mut self, len: usize) {
        self.data.resize(len, 0);
        if self.position > len {
            self.position = len;
        }
    }

    pub fn clear(&mut self) {
        tracing::trace!(size = self.data.len(), "clearing buffer");
        self.data.clear();
        self.position = 0;
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.data.push(byte);
    }

    #[inline]
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn append_bytes(&mut self, bytes: &Bytes) {
        self.extend_from_slice(bytes.as_slice());
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to stored bytes. The length cannot change through this.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes from the cursor to the end.
    #[inline]
    pub fn unread(&self) -> &[u8] {
        &self.data[self.position.min(self.data.len())..]
    }

    /// Copy of the full content, independent of later mutation.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.data.as_slice())
    }

    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.data)
    }

    /// Moves the cursor forward by `n` after a successful read.
    ///
    /// Callers have already verified `n <= remaining()`.
    #[cfg_attr(not(feature = "reader"), allow(dead_code))]
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.position += n;
    }
}

impl Index<usize> for Buffer {
    type Output = u8;

    #[inline]
    fn index(&self, index: usize) -> &u8 {
        &self.data[index]
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Bytes> for Buffer {
    fn from(bytes: Bytes) -> Self {
        Buffer::from(bytes.into_vec())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Buffer { data, position: 0 }
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Self {
        Buffer::from(data.to_vec())
    }
}

impl Extend<u8> for Buffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
