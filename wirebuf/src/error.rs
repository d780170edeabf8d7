pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by buffer navigation and the binary codec.
///
/// Every variant is scoped to the single call that produced it. Reads that fail
/// leave the cursor where it was, and writes that fail append nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("need {needed} bytes but only {remaining} remain")]
    InsufficientData { needed: usize, remaining: usize },

    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    #[error("invalid UTF-8 in text starting at offset {position}")]
    InvalidUtf8 { position: usize },

    #[error("payload of {len} bytes does not fit a 32-bit length prefix")]
    PayloadTooLarge { len: usize },
}

impl Error {
    #[inline]
    pub(crate) fn out_of_range(index: usize, len: usize) -> Error {
        Error::OutOfRange { index, len }
    }

    #[inline]
    pub(crate) fn insufficient(needed: usize, remaining: usize) -> Error {
        Error::InsufficientData { needed, remaining }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        use std::io::ErrorKind;

        match e {
            Error::InsufficientData { .. } => std::io::Error::new(ErrorKind::UnexpectedEof, e),
            Error::OutOfRange { .. } | Error::PayloadTooLarge { .. } => {
                std::io::Error::new(ErrorKind::InvalidInput, e)
            }
            Error::VarintOverflow | Error::InvalidUtf8 { .. } => {
                std::io::Error::new(ErrorKind::InvalidData, e)
            }
        }
    }
}
