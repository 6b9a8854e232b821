//! The on-wire container: header, code-length table, packed body.
//!
//! Layout, field order fixed:
//!
//! ```text
//! [0:4)   original_length   u32, big-endian
//! [4:5)   symbol_count      u8
//! repeat symbol_count times:
//!           symbol          u8
//!           code_length     u8
//! remainder: packed bitstream, MSB-first, zero-padded to a byte boundary
//! ```
//!
//! Bit patterns are never serialized; the decoder re-derives them from the
//! lengths through the same canonical numbering the encoder used.

use crate::error::{Error, FormatError};

/// Fixed bytes before the (symbol, length) pairs.
pub const HEADER_LEN: usize = 5;

/// A parsed or to-be-written container. `lengths` is in canonical order;
/// `body` is the packed bitstream.
pub struct Container<'a> {
    pub original_len: u32,
    pub lengths: Vec<(u8, u8)>,
    pub body: &'a [u8],
}

impl<'a> Container<'a> {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + 2 * self.lengths.len() + self.body.len());
        bytes.extend_from_slice(&self.original_len.to_be_bytes());
        bytes.push(self.lengths.len() as u8);
        for &(symbol, length) in &self.lengths {
            bytes.push(symbol);
            bytes.push(length);
        }
        bytes.extend_from_slice(self.body);
        bytes
    }

    /// Split a byte stream into header fields and body.
    ///
    /// Only structural integrity is checked here; symbol range, duplicate
    /// and length validation happen when the code table is rebuilt.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, Error> {
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::TruncatedHeader.into());
        }
        let original_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let symbol_count = bytes[4] as usize;

        let pairs_len = 2 * symbol_count;
        let rest = &bytes[HEADER_LEN..];
        if rest.len() < pairs_len {
            return Err(FormatError::TruncatedCodeTable {
                expected: pairs_len,
                actual: rest.len(),
            }
            .into());
        }
        let lengths = rest[..pairs_len]
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();

        Ok(Container {
            original_len,
            lengths,
            body: &rest[pairs_len..],
        })
    }
}
