//! Code table and canonical Huffman numbering.
//!
//! Bit patterns are never transmitted. The container carries only per-symbol
//! code lengths, and both the compressor and decompressor derive patterns
//! from those lengths through the same deterministic numbering, so the two
//! sides agree bit-for-bit without ever exchanging the tree.

use {
    crate::{
        error::{Error, FormatError},
        escape_byte,
        freq::ALPHABET_SIZE,
    },
    std::fmt,
};

/// Longest representable code, in bits. Patterns are stored in a `u32`.
pub const MAX_CODE_LENGTH: u8 = 31;

/// One prefix code: a bit pattern interpreted MSB-first up to `length` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u32,
    pub length: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: u8,
    pub code: Code,
}

/// Mapping from symbol to canonical code, one entry per distinct symbol.
///
/// Entries are held in canonical order (ascending length, then ascending
/// symbol), which is also the order the container header lists them in.
pub struct CodeTable {
    entries: Vec<CodeEntry>,
    index: [Option<Code>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Canonicalize a set of (symbol, length) pairs into concrete patterns.
    ///
    /// This is the single construction path for both directions: the
    /// compressor feeds it lengths read off a freshly built tree, the
    /// decompressor feeds it lengths parsed from a container header.
    /// Identical pair sets always yield identical patterns.
    pub fn from_lengths(mut pairs: Vec<(u8, u8)>) -> Result<Self, Error> {
        pairs.sort_unstable_by_key(|&(symbol, length)| (length, symbol));

        let mut entries = Vec::with_capacity(pairs.len());
        let mut index = [None; ALPHABET_SIZE];
        let mut next_code: u64 = 0;
        let mut prev_length: u8 = 0;

        for (symbol, length) in pairs {
            if symbol as usize >= ALPHABET_SIZE {
                return Err(FormatError::InvalidSymbol(symbol).into());
            }
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(FormatError::InvalidCodeLength(length).into());
            }
            let slot = &mut index[symbol as usize];
            if slot.is_some() {
                return Err(FormatError::DuplicateSymbol(symbol).into());
            }

            // Canonical numbering: widen the running value by the length
            // delta, assign it, then count up within the current length.
            next_code <<= length - prev_length;
            if next_code >> length != 0 {
                return Err(FormatError::OversubscribedCode.into());
            }
            let code = Code {
                bits: next_code as u32,
                length,
            };
            next_code += 1;
            prev_length = length;

            *slot = Some(code);
            entries.push(CodeEntry { symbol, code });
        }

        Ok(CodeTable { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical order.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    /// The (symbol, length) pairs in canonical order, as the header lists them.
    pub fn length_pairs(&self) -> Vec<(u8, u8)> {
        self.entries
            .iter()
            .map(|entry| (entry.symbol, entry.code.length))
            .collect()
    }

    pub fn lookup(&self, symbol: u8) -> Option<Code> {
        self.index.get(symbol as usize).copied().flatten()
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg_map = f.debug_map();
        for entry in &self.entries {
            dbg_map.entry(&escape_byte(entry.symbol), &entry.code.to_string());
        }
        dbg_map.finish()
    }
}

/// Render the table the way the `-dcode` diagnostic prints it, one
/// `'sym' -> bits` line per code.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "'{}' -> {}", escape_byte(entry.symbol), entry.code)?;
        }
        Ok(())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..self.length).rev() {
            let bit = (self.bits >> i) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}
