//! Byte-order selection and conversion helpers.
//!
//! Multi-byte values move between host integers and wire bytes through the
//! [`Word`] trait, a single generic transform backed by `byteorder`. The
//! reader and writer never branch on width or signedness themselves.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order of multi-byte values on the wire.
///
/// `Native` is a request rather than an order: it is resolved to the host's
/// order with [`Endian::resolve`] when a reader or writer is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
    Native,
}

impl Endian {
    /// The byte order of the host this crate was compiled for.
    #[inline]
    pub const fn native() -> Endian {
        if cfg!(target_endian = "little") {
            Endian::Little
        } else {
            Endian::Big
        }
    }

    /// Maps `Native` to the concrete host order. `Little` and `Big` pass through.
    #[inline]
    pub const fn resolve(self) -> Endian {
        match self {
            Endian::Native => Endian::native(),
            other => other,
        }
    }

    #[inline]
    pub const fn is_little(self) -> bool {
        matches!(self.resolve(), Endian::Little)
    }

    #[inline]
    pub const fn is_big(self) -> bool {
        matches!(self.resolve(), Endian::Big)
    }
}

mod private {
    pub trait Sealed {}
}

/// A fixed-width integer that can be moved to and from wire bytes.
///
/// Sealed: implemented for the 16, 32 and 64 bit integers of both signedness.
/// The transform depends only on width and order, so sign bits travel through
/// a swap untouched.
pub trait Word: Copy + private::Sealed {
    const WIDTH: usize;

    fn read_from<B: ByteOrder>(buf: &[u8]) -> Self;
    fn write_into<B: ByteOrder>(self, buf: &mut [u8]);
    fn swap(self) -> Self;
}

macro_rules! impl_word {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            impl private::Sealed for $ty {}

            impl Word for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline(always)]
                fn read_from<B: ByteOrder>(buf: &[u8]) -> Self {
                    B::$read(buf)
                }

                #[inline(always)]
                fn write_into<B: ByteOrder>(self, buf: &mut [u8]) {
                    B::$write(buf, self)
                }

                #[inline(always)]
                fn swap(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

impl_word! {
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
}

/// Interprets the first `W::WIDTH` bytes of `buf` in the given order.
///
/// `buf` must hold at least `W::WIDTH` bytes; callers bounds-check first.
#[cfg_attr(not(feature = "reader"), allow(dead_code))]
#[inline]
pub(crate) fn decode<W: Word>(endian: Endian, buf: &[u8]) -> W {
    match endian.resolve() {
        Endian::Big => W::read_from::<BigEndian>(buf),
        _ => W::read_from::<LittleEndian>(buf),
    }
}

/// Encodes `value` into a scratch array, returning it with the used length.
#[cfg_attr(not(feature = "writer"), allow(dead_code))]
#[inline]
pub(crate) fn encode<W: Word>(endian: Endian, value: W) -> ([u8; 8], usize) {
    let mut scratch = [0u8; 8];
    let out = &mut scratch[..W::WIDTH];
    match endian.resolve() {
        Endian::Big => value.write_into::<BigEndian>(out),
        _ => value.write_into::<LittleEndian>(out),
    }
    (scratch, W::WIDTH)
}

#[inline]
pub fn swap16(value: u16) -> u16 {
    value.swap()
}

#[inline]
pub fn swap32(value: u32) -> u32 {
    value.swap()
}

#[inline]
pub fn swap64(value: u64) -> u64 {
    value.swap()
}

/// Converts a host value so its in-memory bytes are little-endian.
#[inline]
pub fn to_little<W: Word>(value: W) -> W {
    if Endian::native().is_little() {
        value
    } else {
        value.swap()
    }
}

/// Converts a host value so its in-memory bytes are big-endian.
#[inline]
pub fn to_big<W: Word>(value: W) -> W {
    if Endian::native().is_big() {
        value
    } else {
        value.swap()
    }
}

/// Inverse of [`to_little`]. A swap is its own inverse, so this is the same transform.
#[inline]
pub fn from_little<W: Word>(value: W) -> W {
    to_little(value)
}

#[inline]
pub fn from_big<W: Word>(value: W) -> W {
    to_big(value)
}
