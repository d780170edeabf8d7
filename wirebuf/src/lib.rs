//! In-memory binary wire codec.
//!
//! A [`Buffer`] owns bytes and a read cursor. A [`BinaryWriter`] appends
//! typed values to it and a [`BinaryReader`] walks them back, both in a byte
//! order fixed at construction. [`Bytes`] is the owned snapshot exchanged with
//! whatever sends or stores the result.
//!
//! ```
//! use wirebuf::{BinaryReader, BinaryWriter, Buffer, Endian};
//!
//! let mut buf = Buffer::new();
//! let mut writer = BinaryWriter::with_endian(&mut buf, Endian::Big);
//! writer.write_u32(0x4155_4F52);
//! writer.write_length_prefixed_string("hello").unwrap();
//! writer.write_varint(150);
//!
//! let wire = buf.to_bytes();
//! let mut incoming = wirebuf::Buffer::from_bytes(&wire);
//! let mut reader = BinaryReader::with_endian(&mut incoming, Endian::Big);
//! assert_eq!(reader.read_u32().unwrap(), 0x4155_4F52);
//! assert_eq!(reader.read_length_prefixed_string().unwrap(), "hello");
//! assert_eq!(reader.read_varint().unwrap(), 150);
//! ```

mod buffer;
mod bytes;
pub mod endian;
mod error;
pub mod varint;

#[cfg(feature = "reader")]
mod de;
#[cfg(feature = "reader")]
mod reader;
#[cfg(feature = "writer")]
mod ser;
#[cfg(feature = "writer")]
mod writer;

pub use buffer::Buffer;
pub use bytes::Bytes;
pub use endian::Endian;
pub use error::{Error, Result};

#[cfg(feature = "reader")]
pub use de::Decode;
#[cfg(feature = "reader")]
pub use reader::BinaryReader;
#[cfg(feature = "writer")]
pub use ser::Encode;
#[cfg(feature = "writer")]
pub use writer::BinaryWriter;
