//! MSB-first bit packing and unpacking over `bitvec` storage.

use {
    crate::code::Code,
    bitvec::{order::Msb0, slice::BitSlice, vec::BitVec, view::BitView},
};

/// Packs variable-length codes into a byte stream, most significant bit
/// first. The final byte is zero-padded; padding is not self-describing, so
/// consumers stop on an externally known symbol count instead.
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter { bits: BitVec::new() }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitWriter {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Append one code, high bit first.
    pub fn push_code(&mut self, code: Code) {
        for i in (0..code.length).rev() {
            self.bits.push((code.bits >> i) & 1 == 1);
        }
    }

    /// Total bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Flush to bytes, zero-padding any partial final byte.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumes a packed byte stream one bit at a time, most significant bit
/// first. Returns `None` past the end; the caller decides whether that is
/// padding or truncation.
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitReader {
            bits: bytes.view_bits::<Msb0>(),
            pos: 0,
        }
    }

    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}
