//! Sans-IO LEB128 and ZigZag primitives.
//!
//! These work on plain slices and arrays so the reader can decode without
//! touching the cursor until a value is complete, and the writer can encode a
//! whole value before appending.

use crate::{Error, Result};

/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;

/// Encode `value` as LEB128.
///
/// Returns a fixed-size array with the encoded bytes and the actual length.
pub fn encode_varint(mut value: u64) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;

    while value >= u64::from(CONTINUATION) {
        buf[len] = (value as u8 & PAYLOAD) | CONTINUATION;
        value >>= 7;
        len += 1;
    }
    buf[len] = value as u8;

    (buf, len + 1)
}

/// Decode a LEB128 value from the front of `data`.
///
/// Returns the value and the number of bytes consumed. Running off the end of
/// `data` is `InsufficientData`; a continuation past 64 bits of shift is
/// `VarintOverflow`.
pub fn decode_varint(data: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in data.iter().enumerate() {
        result |= u64::from(byte & PAYLOAD) << shift;

        if byte & CONTINUATION == 0 {
            return Ok((result, i + 1));
        }

        shift += 7;
        if shift >= 64 {
            return Err(Error::VarintOverflow);
        }
    }

    Err(Error::insufficient(data.len() + 1, data.len()))
}

/// Number of bytes [`encode_varint`] produces for `value`.
#[inline]
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    std::cmp::max(1, (bits + 6) / 7)
}

#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
