use crate::{BinaryReader, Bytes, Result};

/// A value that can be read back from its wire form.
///
/// Implemented for the primitive integer and float types, for length-prefixed
/// [`Bytes`] and [`String`], and for `Vec<T>` of any decodable `T`.
pub trait Decode: Sized {
    fn decode(reader: &mut BinaryReader<'_>) -> Result<Self>;
}

macro_rules! impl_decode {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl Decode for $ty {
                #[inline]
                fn decode(reader: &mut BinaryReader<'_>) -> Result<Self> {
                    reader.$read()
                }
            }
        )*
    };
}

impl_decode! {
    u8 => read_u8,
    i8 => read_i8,
    u16 => read_u16,
    i16 => read_i16,
    u32 => read_u32,
    i32 => read_i32,
    u64 => read_u64,
    i64 => read_i64,
    f32 => read_f32,
    f64 => read_f64,
    Bytes => read_length_prefixed,
    String => read_length_prefixed_string,
}

impl<const N: usize> Decode for [u8; N] {
    fn decode(reader: &mut BinaryReader<'_>) -> Result<Self> {
        reader.read_array()
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let start = reader.position();
        let count = reader.read_u32()? as usize;
        // The count is untrusted; never reserve more slots than bytes left.
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            items.push(T::decode(reader)?);
        }
        let end = reader.position();
        tracing::debug!(
            start = format_args!("{:#x}", start),
            end = format_args!("{:#x}", end),
            bytes = end - start,
            count,
            "decoded Vec"
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Buffer, Endian, Error};

    #[test]
    fn test_decode_primitives() {
        let mut buf = Buffer::from(vec![0x01, 0x00, 0x02, 0xFF]);
        let mut reader = BinaryReader::with_endian(&mut buf, Endian::Big);
        assert_eq!(reader.read::<u8>().unwrap(), 1);
        assert_eq!(reader.read::<u16>().unwrap(), 2);
        assert_eq!(reader.read::<i8>().unwrap(), -1);
    }

    #[test]
    fn test_decode_vec() {
        let mut buf = Buffer::from(vec![2, 0, 0, 0, 0x0A, 0x00, 0x0B, 0x00]);
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(reader.read::<Vec<u16>>().unwrap(), vec![10, 11]);
    }

    #[test]
    fn test_decode_vec_with_lying_count() {
        let mut buf = Buffer::from(vec![0xFF, 0xFF, 0xFF, 0xFF, 1]);
        let mut reader = BinaryReader::new(&mut buf);
        assert!(matches!(
            reader.read::<Vec<u8>>(),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_decode_magic() {
        let mut buf = Buffer::from(&b"\xffWBF"[..]);
        let mut reader = BinaryReader::new(&mut buf);
        assert_eq!(&reader.read::<[u8; 4]>().unwrap(), b"\xffWBF");
    }
}
