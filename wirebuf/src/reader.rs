use crate::de::Decode;
use crate::endian::{self, Endian, Word};
use crate::varint::{self, zigzag_decode};
use crate::{Buffer, Bytes, Error, Result};

/// Width of the length field in front of length-prefixed payloads.
pub(crate) const LENGTH_PREFIX: usize = 4;

/// Sequential typed reads over a borrowed [`Buffer`].
///
/// Reading advances the buffer's own cursor, so the position is still there
/// once the reader is dropped. A failed read never moves the cursor.
#[derive(Debug)]
pub struct BinaryReader<'a> {
    buffer: &'a mut Buffer,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    /// Reader using the default (little-endian) byte order.
    pub fn new(buffer: &'a mut Buffer) -> BinaryReader<'a> {
        BinaryReader::with_endian(buffer, Endian::default())
    }

    /// `Native` is resolved here and fixed for the lifetime of the reader.
    pub fn with_endian(buffer: &'a mut Buffer, endian: Endian) -> BinaryReader<'a> {
        BinaryReader {
            buffer,
            endian: endian.resolve(),
        }
    }

    #[inline(always)]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    #[inline(always)]
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        self.buffer.set_position(position)
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    #[inline(always)]
    pub fn has_remaining(&self, n: usize) -> bool {
        self.buffer.remaining() >= n
    }

    #[inline(always)]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.buffer.skip(n)
    }

    #[inline]
    fn ensure(&self, n: usize) -> Result<()> {
        let remaining = self.buffer.remaining();
        if remaining < n {
            return Err(Error::insufficient(n, remaining));
        }
        Ok(())
    }

    /// Consumes `n` bytes and returns them.
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.ensure(n)?;
        let start = self.buffer.position();
        self.buffer.advance(n);
        Ok(&self.buffer.as_slice()[start..start + n])
    }

    /// Validates `len` bytes at `offset` from the cursor as UTF-8 before anything is consumed.
    fn text_at(&self, offset: usize, len: usize) -> Result<String> {
        let start = self.buffer.position() + offset;
        std::str::from_utf8(&self.buffer.as_slice()[start..start + len])
            .map(str::to_owned)
            .map_err(|_| Error::InvalidUtf8 { position: start })
    }

    fn read_word<W: Word>(&mut self) -> Result<W> {
        let order = self.endian;
        self.take(W::WIDTH).map(|bytes| endian::decode(order, bytes))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.take(1).map(|bytes| bytes[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|v| v as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_word()
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_word()
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_word()
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_word()
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_word()
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_word()
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_u64().map(f64::from_bits)
    }

    /// Next byte without consuming it.
    pub fn peek_u8(&self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buffer.unread()[0])
    }

    /// Fixed-size raw read, e.g. for magic numbers.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.take(n).map(Bytes::from)
    }

    pub fn read_string(&mut self, n: usize) -> Result<String> {
        self.ensure(n)?;
        let text = self.text_at(0, n)?;
        self.buffer.advance(n);
        Ok(text)
    }

    /// Reads up to and including the next zero byte, returning the text before it.
    ///
    /// When no terminator exists, everything left is taken as the string. Legacy
    /// formats rely on this, so it is not an error.
    pub fn read_cstring(&mut self) -> Result<String> {
        let start = self.buffer.position();
        let unread = self.buffer.unread();
        let (len, consumed) = match unread.iter().position(|b| *b == 0) {
            Some(nul) => (nul, nul + 1),
            None => {
                tracing::trace!(
                    start = format_args!("{:#x}", start),
                    bytes = unread.len(),
                    "unterminated cstring, consuming to end"
                );
                (unread.len(), unread.len())
            }
        };

        let text = self.text_at(0, len)?;
        self.buffer.advance(consumed);
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", start + consumed),
            bytes = consumed,
            "read cstring"
        );
        Ok(text)
    }

    /// Payload length declared by the prefix at the cursor. Consumes nothing.
    fn peek_length_prefix(&self) -> Result<usize> {
        self.ensure(LENGTH_PREFIX)?;
        let len: u32 = endian::decode(self.endian, self.buffer.unread());
        let len = len as usize;
        let available = self.buffer.remaining() - LENGTH_PREFIX;
        if available < len {
            return Err(Error::insufficient(len, available));
        }
        Ok(len)
    }

    /// Reads a 32-bit length in this reader's byte order, then that many raw bytes.
    ///
    /// If the declared length runs past the end, the prefix is left unconsumed.
    pub fn read_length_prefixed(&mut self) -> Result<Bytes> {
        let start = self.buffer.position();
        let len = self.peek_length_prefix()?;
        self.buffer.advance(LENGTH_PREFIX);
        let payload = self.read_bytes(len)?;
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", self.buffer.position()),
            len,
            "read length-prefixed bytes"
        );
        Ok(payload)
    }

    pub fn read_length_prefixed_string(&mut self) -> Result<String> {
        let start = self.buffer.position();
        let len = self.peek_length_prefix()?;
        let text = self.text_at(LENGTH_PREFIX, len)?;
        self.buffer.advance(LENGTH_PREFIX + len);
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", self.buffer.position()),
            len,
            "read length-prefixed string"
        );
        Ok(text)
    }

    /// LEB128 decode. Truncated input is `InsufficientData`, more than 64 bits is
    /// `VarintOverflow`; neither consumes anything.
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, len) = varint::decode_varint(self.buffer.unread())?;
        self.buffer.advance(len);
        Ok(value)
    }

    pub fn read_signed_varint(&mut self) -> Result<i64> {
        self.read_varint().map(zigzag_decode)
    }

    #[inline]
    pub fn read<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Runs `f`, rewinding the cursor to where it started if `f` fails.
    ///
    /// Single reads are already all-or-nothing; this extends that to a
    /// sequence of reads such as a whole header.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut BinaryReader<'a>) -> Result<T>,
    {
        let start = self.buffer.position();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.buffer.set_position(start)?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(bytes: &[u8]) -> Buffer {
        Buffer::from(bytes)
    }

    #[test]
    fn test_read_u32_both_orders() {
        let mut buf = buffer(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(BinaryReader::new(&mut buf).read_u32().unwrap(), 0x1234_5678);

        let mut buf = buffer(&[0x12, 0x34, 0x56, 0x78]);
        let mut reader = BinaryReader::with_endian(&mut buf, Endian::Big);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_native_is_resolved() {
        let mut buf = Buffer::new();
        let reader = BinaryReader::with_endian(&mut buf, Endian::Native);
        assert_eq!(reader.endian(), Endian::native());
    }

    #[test]
    fn test_signed_reads() {
        let mut buf = buffer(&[0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x80]);
        let mut reader = BinaryReader::with_endian(&mut buf, Endian::Big);
        assert_eq!(reader.read_i8().unwrap(), -1);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert_eq!(reader.read_u16().unwrap(), 0xFFFF);
        assert_eq!(reader.read_u8().unwrap(), 0x80);
    }

    #[test]
    fn test_insufficient_data_keeps_position() {
        let mut buf = buffer(&[1, 2, 3, 4, 5]);
        let mut reader = BinaryReader::new(&mut buf);
        reader.read_u16().unwrap();
        assert_eq!(
            reader.read_u32(),
            Err(Error::InsufficientData {
                needed: 4,
                remaining: 3
            })
        );
        assert_eq!(reader.position(), 2);
        assert!(reader.read_u64().is_err());
        assert!(reader.read_bytes(4).is_err());
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_floats() {
        let mut buf = Buffer::new();
        buf.extend_from_slice(&1.5f32.to_bits().to_le_bytes());
        buf.extend_from_slice(&(-0.25f64).to_bits().to_le_bytes());
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_f32().unwrap(), 1.5);
        assert_eq!(reader.read_f64().unwrap(), -0.25);
    }

    #[test]
    fn test_read_string_and_bytes() {
        let mut buf = buffer(b"Hello World");
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_string(5).unwrap(), "Hello");
        assert_eq!(reader.read_u8().unwrap(), b' ');
        assert_eq!(reader.read_bytes(5).unwrap(), *b"World");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_invalid_utf8_keeps_position() {
        let mut buf = buffer(&[b'o', b'k', 0xFF, 0xFE]);
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_string(4), Err(Error::InvalidUtf8 { position: 0 }));
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_string(2).unwrap(), "ok");
    }

    #[test]
    fn test_cstring() {
        let mut buf = buffer(b"abc\0def\0");
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_cstring().unwrap(), "abc");
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.read_cstring().unwrap(), "def");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_cstring_without_terminator_consumes_rest() {
        let mut buf = buffer(b"tail");
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_cstring().unwrap(), "tail");
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read_cstring().unwrap(), "");
    }

    #[test]
    fn test_length_prefixed() {
        let mut buf = buffer(&[0, 0, 0, 3, b'a', b'b', b'c', 0xAA]);
        let mut reader = BinaryReader::with_endian(&mut buf, Endian::Big);
        assert_eq!(reader.read_length_prefixed_string().unwrap(), "abc");
        assert_eq!(reader.position(), 7);
    }

    #[test]
    fn test_length_prefixed_overrun_keeps_prefix() {
        let mut buf = buffer(&[9, 0, 0, 0, 1, 2]);
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(
            reader.read_length_prefixed(),
            Err(Error::InsufficientData {
                needed: 9,
                remaining: 2
            })
        );
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u32().unwrap(), 9);
    }

    #[test]
    fn test_varints() {
        let mut buf = buffer(&[0x01, 0x96, 0x01, 0xC0, 0x84, 0x3D, 0x03]);
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_varint().unwrap(), 1);
        assert_eq!(reader.read_varint().unwrap(), 150);
        assert_eq!(reader.read_varint().unwrap(), 1_000_000);
        assert_eq!(reader.read_signed_varint().unwrap(), -2);
    }

    #[test]
    fn test_varint_overflow_keeps_position() {
        let mut buf = buffer(&[0xFF; 12]);
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read_varint(), Err(Error::VarintOverflow));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_truncated_varint() {
        let mut buf = buffer(&[0x80, 0x80]);
        let mut reader = BinaryReader::new(&mut buf);
        assert!(matches!(
            reader.read_varint(),
            Err(Error::InsufficientData { .. })
        ));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_navigation() {
        let mut buf = buffer(&[0u8; 12]);
        let mut reader = BinaryReader::new(&mut buf);
        reader.read_u32().unwrap();
        assert_eq!(reader.remaining(), 8);
        assert!(reader.has_remaining(8));
        assert!(!reader.has_remaining(9));
        reader.skip(4).unwrap();
        assert!(reader.skip(5).is_err());
        assert!(reader.set_position(13).is_err());
        reader.set_position(0).unwrap();
        assert_eq!(reader.remaining(), 12);
    }

    #[test]
    fn test_position_survives_reader() {
        let mut buf = buffer(&[1, 2, 3]);
        BinaryReader::new(&mut buf).read_u16().unwrap();
        assert_eq!(buf.position(), 2);
    }

    #[test]
    fn test_peek_and_array() {
        let mut buf = buffer(b"BM\x01");
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.peek_u8().unwrap(), b'B');
        assert_eq!(reader.position(), 0);
        assert_eq!(&reader.read_array::<2>().unwrap(), b"BM");
        assert!(reader.read_array::<2>().is_err());
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_transaction_rewinds() {
        let mut buf = buffer(&[1, 0, 0, 0, 2]);
        let mut reader = BinaryReader::new(&mut buf);
        let result = reader.transaction(|r| {
            let a = r.read_u32()?;
            let b = r.read_u32()?;
            Ok((a, b))
        });
        assert!(result.is_err());
        assert_eq!(reader.position(), 0);

        let first = reader.transaction(|r| r.read_u32()).unwrap();
        assert_eq!(first, 1);
        assert_eq!(reader.position(), 4);
    }
}
