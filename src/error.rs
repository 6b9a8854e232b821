//! Error types shared by every compression and decompression stage.

use std::{error, fmt, io};

/// Top-level error for a compress or decompress operation.
///
/// Every stage reports failure upward; no stage continues with partial
/// state, and no partially written container is ever returned.
#[derive(Debug)]
pub enum Error {
    /// The compressor was handed zero bytes; the container format cannot
    /// describe an empty code table with a nonzero payload.
    EmptyInput,
    /// The input length does not fit the header's `u32` original-length field.
    InputTooLarge(usize),
    /// A compressor input byte falls outside the 128-symbol alphabet.
    UnsupportedSymbol(u8),
    /// An internal capacity invariant was violated. Capacities are computed
    /// up front (`2n - 1` heap slots, one code per distinct symbol), so this
    /// indicates an internal-consistency bug, not a recoverable condition.
    CapacityExceeded(&'static str),
    /// The container being decoded is malformed.
    Format(FormatError),
    /// Reading or writing the underlying stream failed.
    Io(io::Error),
}

/// A malformed container detected during decompression.
///
/// Always recoverable at the operation boundary: the decoder reports it and
/// discards any buffered output rather than crashing or emitting a partial
/// result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer bytes than the fixed header needs.
    TruncatedHeader,
    /// The declared symbol count promises more (symbol, length) pairs than
    /// the remaining bytes hold.
    TruncatedCodeTable { expected: usize, actual: usize },
    /// A nonzero original length with an empty code table.
    MissingCodeTable,
    /// A header symbol outside the 128-symbol alphabet.
    InvalidSymbol(u8),
    /// A code length of 0 or of 32+ bits.
    InvalidCodeLength(u8),
    /// The same symbol listed twice in the header.
    DuplicateSymbol(u8),
    /// Canonical numbering overflowed a code's bit length; the declared
    /// lengths cannot form a prefix-free code.
    OversubscribedCode,
    /// Rebuilding the decode tree walked a code through an existing leaf,
    /// or terminated a code on an existing internal node.
    PrefixConflict(u8),
    /// The packed body ran out of bits before the declared symbol count was
    /// reached.
    TruncatedBody,
    /// A bit path led into a branch no code occupies.
    InvalidCode,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "input is empty"),
            Error::InputTooLarge(len) => {
                write!(f, "input of {} bytes exceeds the u32 length field", len)
            }
            Error::UnsupportedSymbol(byte) => {
                write!(f, "byte 0x{:02x} is outside the 128-symbol alphabet", byte)
            }
            Error::CapacityExceeded(what) => write!(f, "capacity exceeded: {}", what),
            Error::Format(e) => write!(f, "malformed container: {}", e),
            Error::Io(e) => write!(f, "i/o failure: {}", e),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::TruncatedHeader => write!(f, "truncated header"),
            FormatError::TruncatedCodeTable { expected, actual } => write!(
                f,
                "code table truncated: {} pair bytes declared, {} present",
                expected, actual
            ),
            FormatError::MissingCodeTable => {
                write!(f, "nonzero original length but empty code table")
            }
            FormatError::InvalidSymbol(byte) => {
                write!(f, "symbol 0x{:02x} outside the 128-symbol alphabet", byte)
            }
            FormatError::InvalidCodeLength(len) => {
                write!(f, "code length {} outside 1..=31", len)
            }
            FormatError::DuplicateSymbol(byte) => {
                write!(f, "symbol 0x{:02x} listed twice", byte)
            }
            FormatError::OversubscribedCode => {
                write!(f, "code lengths oversubscribe the prefix code space")
            }
            FormatError::PrefixConflict(byte) => {
                write!(f, "code for symbol 0x{:02x} violates the prefix property", byte)
            }
            FormatError::TruncatedBody => {
                write!(f, "packed body ended before the declared symbol count")
            }
            FormatError::InvalidCode => write!(f, "bit pattern matches no code"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl error::Error for FormatError {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Error::Format(e)
    }
}
