use crate::endian::{self, Endian, Word};
use crate::reader::LENGTH_PREFIX;
use crate::ser::Encode;
use crate::varint::{encode_varint, zigzag_encode};
use crate::{Buffer, Error, Result};

/// Append-only typed writes into a borrowed [`Buffer`].
///
/// Every value is encoded in full before the first byte is appended, so a
/// write either lands completely or not at all. The buffer's read cursor is
/// neither consulted nor moved.
#[derive(Debug)]
pub struct BinaryWriter<'a> {
    buffer: &'a mut Buffer,
    endian: Endian,
}

/// Validates that a payload length fits the 32-bit prefix.
fn prefix_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::PayloadTooLarge { len })
}

impl<'a> BinaryWriter<'a> {
    /// Writer using the default (little-endian) byte order.
    pub fn new(buffer: &'a mut Buffer) -> BinaryWriter<'a> {
        BinaryWriter::with_endian(buffer, Endian::default())
    }

    /// `Native` is resolved here and fixed for the lifetime of the writer.
    pub fn with_endian(buffer: &'a mut Buffer, endian: Endian) -> BinaryWriter<'a> {
        BinaryWriter {
            buffer,
            endian: endian.resolve(),
        }
    }

    #[inline(always)]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Offset the next byte will be written at.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.buffer.size()
    }

    fn write_word<W: Word>(&mut self, value: W) {
        let (bytes, len) = endian::encode(self.endian, value);
        self.buffer.extend_from_slice(&bytes[..len]);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_u8(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write_word(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_word(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write_word(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_word(value);
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write_word(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.write_word(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    /// Raw bytes, verbatim. Accepts `&Bytes` through deref.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    pub fn write_string(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// Text followed by a single zero byte.
    ///
    /// Text containing a zero byte is written as-is and will read back
    /// truncated at that byte.
    pub fn write_cstring(&mut self, text: &str) {
        self.buffer.reserve(text.len() + 1);
        self.write_string(text);
        self.write_u8(0);
    }

    /// A 32-bit length in this writer's byte order, then the payload.
    pub fn write_length_prefixed(&mut self, data: &[u8]) -> Result<()> {
        let start = self.buffer.size();
        let len = prefix_len(data.len())?;
        self.buffer.reserve(LENGTH_PREFIX + data.len());
        self.write_u32(len);
        self.write_bytes(data);
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", self.buffer.size()),
            len,
            "wrote length-prefixed payload"
        );
        Ok(())
    }

    pub fn write_length_prefixed_string(&mut self, text: &str) -> Result<()> {
        self.write_length_prefixed(text.as_bytes())
    }

    pub fn write_varint(&mut self, value: u64) {
        let (bytes, len) = encode_varint(value);
        self.buffer.extend_from_slice(&bytes[..len]);
    }

    pub fn write_signed_varint(&mut self, value: i64) {
        self.write_varint(zigzag_encode(value));
    }

    #[inline]
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }
}
