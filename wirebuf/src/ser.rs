use crate::{BinaryWriter, Bytes, Error, Result};

/// A value with a wire form.
///
/// Mirrors [`Decode`](crate::Decode): whatever `encode` writes, the matching
/// `decode` reads back.
pub trait Encode {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()>;
}

macro_rules! impl_encode {
    ($($ty:ty => $write:ident),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
                    writer.$write(*self);
                    Ok(())
                }
            }
        )*
    };
}

impl_encode! {
    u8 => write_u8,
    i8 => write_i8,
    u16 => write_u16,
    i16 => write_i16,
    u32 => write_u32,
    i32 => write_i32,
    u64 => write_u64,
    i64 => write_i64,
    f32 => write_f32,
    f64 => write_f64,
}

impl Encode for Bytes {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
        writer.write_length_prefixed(self)
    }
}

impl Encode for str {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
        writer.write_length_prefixed_string(self)
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
        writer.write_length_prefixed_string(self)
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
        writer.write_bytes(self);
        Ok(())
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
        let count = u32::try_from(self.len()).map_err(|_| Error::PayloadTooLarge {
            len: self.len(),
        })?;
        writer.write_u32(count);

        for item in self.iter() {
            item.encode(writer)?;
        }
        Ok(())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut BinaryWriter<'_>) -> Result<()> {
        self.as_slice().encode(writer)
    }
}
