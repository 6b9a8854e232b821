//! Frequency analysis over the fixed 128-symbol alphabet.

use {
    crate::{error::Error, escape_byte},
    std::fmt,
};

/// Number of symbols the format supports. Symbols are unsigned byte values
/// `0..ALPHABET_SIZE`; the upper half of the byte range is reserved.
pub const ALPHABET_SIZE: usize = 128;

/// Occurrence count per symbol over one compressor input.
///
/// Built once per compression and discarded after tree construction. The sum
/// of all counts equals the input length; only symbols with a nonzero count
/// participate downstream.
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    distinct: usize,
}

impl FrequencyTable {
    /// Count symbol occurrences, rejecting bytes outside the alphabet.
    pub fn of(input: &[u8]) -> Result<Self, Error> {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut distinct = 0;
        for &byte in input {
            let slot = counts
                .get_mut(byte as usize)
                .ok_or(Error::UnsupportedSymbol(byte))?;
            if *slot == 0 {
                distinct += 1;
            }
            *slot += 1;
        }
        Ok(FrequencyTable { counts, distinct })
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with a nonzero count, in ascending symbol order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

// Derived Debug would print 128 mostly-zero slots; dump only the live ones.
impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg_map = f.debug_map();
        for (symbol, count) in self.iter_nonzero() {
            dbg_map.entry(&escape_byte(symbol), &count);
        }
        dbg_map.finish()
    }
}

/// Render the table the way the `-dfreq` diagnostic prints it, one
/// `'sym' -> count` line per live symbol.
impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter_nonzero() {
            writeln!(f, "'{}' -> {}", escape_byte(symbol), count)?;
        }
        Ok(())
    }
}
