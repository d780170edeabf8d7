use std::fmt;
use std::ops::Deref;

use crate::{Error, Result};

/// An owned, fixed-length run of octets.
///
/// This is the unit handed to and received from transport or storage code.
/// Slicing copies: a `Bytes` never borrows from another.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bytes(Box<[u8]>);

impl Bytes {
    #[inline]
    pub fn new() -> Bytes {
        Bytes::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Byte at `index`, or `OutOfRange` past the end.
    pub fn get(&self, index: usize) -> Result<u8> {
        self.0
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(index, self.len()))
    }

    /// Copy of everything from `start` to the end. `start == len()` yields an empty sequence.
    pub fn slice_from(&self, start: usize) -> Result<Bytes> {
        if start > self.len() {
            return Err(Error::out_of_range(start, self.len()));
        }
        Ok(Bytes::from(&self.0[start..]))
    }

    /// Copy of `length` bytes starting at `start`.
    pub fn slice(&self, start: usize, length: usize) -> Result<Bytes> {
        let end = start
            .checked_add(length)
            .filter(|end| *end <= self.len())
            .ok_or_else(|| Error::out_of_range(start.saturating_add(length), self.len()))?;
        Ok(Bytes::from(&self.0[start..end]))
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0.into_vec()
    }

    /// Bytes of `text`, verbatim.
    pub fn from_string(text: &str) -> Bytes {
        Bytes::from(text.as_bytes())
    }

    /// Text view with invalid UTF-8 replaced by U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl Deref for Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(vec: Vec<u8>) -> Self {
        Bytes(vec.into_boxed_slice())
    }
}

impl From<&[u8]> for Bytes {
    fn from(slice: &[u8]) -> Self {
        Bytes(slice.into())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(array: [u8; N]) -> Self {
        Bytes(Box::new(array))
    }
}

impl From<&str> for Bytes {
    fn from(text: &str) -> Self {
        Bytes::from_string(text)
    }
}

impl From<String> for Bytes {
    fn from(text: String) -> Self {
        Bytes::from(text.into_bytes())
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(bytes: Bytes) -> Self {
        bytes.into_vec()
    }
}

impl PartialEq<[u8]> for Bytes {
    fn eq(&self, other: &[u8]) -> bool {
        *self.0 == *other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Bytes {
    fn eq(&self, other: &[u8; N]) -> bool {
        *self.0 == other[..]
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes(")?;
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}
