//! Lossless byte-stream compression with canonical Huffman coding.
//!
//! Input bytes are restricted to a 128-symbol alphabet (values `0..=127`).
//! Compression counts symbol frequencies, builds an optimal prefix code
//! with a heap-driven Huffman construction, canonicalizes it, and emits a
//! self-describing container; the header carries only per-symbol code
//! *lengths*, from which the decompressor re-derives the exact bit patterns
//! and decode tree. See [`container`] for the wire layout.
//!
//! The top-level entry points are [`compress`] and [`decompress`], which
//! take and return owned byte buffers; the `_with` variants additionally
//! print intermediate structures to stderr for diagnosis.

pub mod bits;
pub mod code;
pub mod container;
pub mod error;
pub mod freq;
pub mod heap;
pub mod tree;

pub use crate::error::{Error, FormatError};

use crate::{
    bits::{BitReader, BitWriter},
    code::CodeTable,
    container::Container,
    freq::FrequencyTable,
    tree::Tree,
};

/// Which intermediate structures to print to stderr. Dumps are purely
/// observational and never affect the container bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dump {
    pub freq: bool,
    pub tree: bool,
    pub code: bool,
}

/// Compress a buffer into a container.
///
/// Stages run strictly in sequence: frequency analysis, tree build, code
/// derivation, canonicalization, header write, body packing. Any stage
/// failure aborts the whole operation; no partial container is returned.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, Error> {
    compress_with(input, Dump::default())
}

/// [`compress`], with optional stderr dumps of the intermediates.
pub fn compress_with(input: &[u8], dump: Dump) -> Result<Vec<u8>, Error> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let original_len =
        u32::try_from(input.len()).map_err(|_| Error::InputTooLarge(input.len()))?;

    let freq = FrequencyTable::of(input)?;
    log::trace!("byte frequency: {:?}", freq);
    if dump.freq {
        eprint!("Freq table:\n{}", freq);
    }

    let tree = Tree::build(&freq)?;
    if dump.tree {
        eprint!("Huffman tree:\n{}", tree);
    }

    let table = CodeTable::from_lengths(tree.code_lengths()?)?;
    log::trace!("code table: {:?}", table);
    if dump.code {
        eprint!("Code table:\n{}", table);
    }

    let mut writer = BitWriter::with_capacity(input.len());
    for &byte in input {
        let code = table.lookup(byte).ok_or(Error::UnsupportedSymbol(byte))?;
        writer.push_code(code);
    }
    log::trace!("packed {} bits for {} symbols", writer.bit_len(), input.len());
    let body = writer.into_bytes();

    let container = Container {
        original_len,
        lengths: table.length_pairs(),
        body: &body,
    };
    Ok(container.to_bytes())
}

/// Decompress a container back into the original bytes.
///
/// Output accumulates in memory and is returned only on success; a
/// [`FormatError`] discards everything, so partial output is never
/// observable.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    decompress_with(bytes, Dump::default())
}

/// [`decompress`], with optional stderr dumps of the rebuilt structures.
/// The frequency table is not recoverable from a container, so `dump.freq`
/// has no effect here.
pub fn decompress_with(bytes: &[u8], dump: Dump) -> Result<Vec<u8>, Error> {
    let container = Container::parse(bytes)?;
    if container.original_len == 0 {
        return Ok(Vec::new());
    }
    if container.lengths.is_empty() {
        return Err(FormatError::MissingCodeTable.into());
    }

    let table = CodeTable::from_lengths(container.lengths.clone())?;
    log::trace!("rebuilt code table: {:?}", table);
    if dump.code {
        eprint!("Code table:\n{}", table);
    }

    let tree = Tree::from_codes(&table)?;
    if dump.tree {
        eprint!("Huffman tree:\n{}", tree);
    }

    let mut reader = BitReader::new(container.body);
    tree.decode(&mut reader, container.original_len as usize)
}

/// Printable rendering of one symbol for diagnostics: C-style escapes for
/// the common control characters, `\xNN` for the rest.
pub(crate) fn escape_byte(byte: u8) -> String {
    match byte {
        0 => "\\0".into(),
        0x08 => "\\b".into(),
        b'\t' => "\\t".into(),
        b'\n' => "\\n".into(),
        0x0b => "\\v".into(),
        0x0c => "\\f".into(),
        b'\r' => "\\r".into(),
        b'\'' => "\\'".into(),
        b'"' => "\\\"".into(),
        b'\\' => "\\\\".into(),
        _ if byte.is_ascii_graphic() || byte == b' ' => (byte as char).to_string(),
        _ => format!("\\x{:02x}", byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_produces_the_documented_container() {
        let bytes = compress(b"hello").unwrap();
        // 5-byte fixed header, 4 canonical pairs, 10 packed bits in 2 bytes.
        assert_eq!(bytes.len(), 15);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 5]);
        assert_eq!(bytes[4], 4);
        // All four symbols land at depth 2 under the insertion-order
        // tie-break, so canonical order is plain symbol order.
        assert_eq!(&bytes[5..13], &[b'e', 2, b'h', 2, b'l', 2, b'o', 2]);
        // h=01 e=00 l=10 l=10 o=11, zero-padded.
        assert_eq!(&bytes[13..], &[0b0100_1010, 0b1100_0000]);

        assert_eq!(decompress(&bytes).unwrap(), b"hello");
    }

    #[test]
    fn roundtrips_longer_text() {
        let input: &[u8] = b"it was the best of times, it was the worst of times";
        let packed = compress(input).unwrap();
        assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn single_repeated_symbol_roundtrips() {
        let packed = compress(b"aaaaaaaa").unwrap();
        // One pair, one code of length 1, eight bits of body.
        assert_eq!(packed[4], 1);
        assert_eq!(&packed[5..7], &[b'a', 1]);
        assert_eq!(packed.len(), 8);
        assert_eq!(decompress(&packed).unwrap(), b"aaaaaaaa");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(compress(b""), Err(Error::EmptyInput)));
    }

    #[test]
    fn high_bytes_are_rejected() {
        assert!(matches!(
            compress(&[1, 2, 0xff]),
            Err(Error::UnsupportedSymbol(0xff))
        ));
    }

    #[test]
    fn decoded_length_always_matches_the_header() {
        let input = b"mississippi";
        let packed = compress(input).unwrap();
        let declared = u32::from_be_bytes([packed[0], packed[1], packed[2], packed[3]]);
        let decoded = decompress(&packed).unwrap();
        assert_eq!(decoded.len() as u32, declared);
    }

    #[test]
    fn truncated_container_is_a_format_error() {
        let packed = compress(b"hello world").unwrap();
        assert!(matches!(
            decompress(&packed[..3]),
            Err(Error::Format(FormatError::TruncatedHeader))
        ));
        assert!(matches!(
            decompress(&packed[..7]),
            Err(Error::Format(FormatError::TruncatedCodeTable { .. }))
        ));
    }

    #[test]
    fn truncated_body_is_a_format_error() {
        let packed = compress(b"abcabcabcabc").unwrap();
        let cut = packed.len() - 1;
        assert!(matches!(
            decompress(&packed[..cut]),
            Err(Error::Format(FormatError::TruncatedBody))
        ));
    }

    #[test]
    fn missing_code_table_is_a_format_error() {
        // Claims 9 original symbols but lists no codes.
        let bytes = [0, 0, 0, 9, 0];
        assert!(matches!(
            decompress(&bytes),
            Err(Error::Format(FormatError::MissingCodeTable))
        ));
    }

    #[test]
    fn zero_length_container_decodes_to_nothing() {
        let bytes = [0, 0, 0, 0, 0];
        assert_eq!(decompress(&bytes).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn dumps_do_not_change_the_container() {
        let all = Dump {
            freq: true,
            tree: true,
            code: true,
        };
        let quiet = compress(b"dump parity").unwrap();
        let noisy = compress_with(b"dump parity", all).unwrap();
        assert_eq!(quiet, noisy);
        assert_eq!(decompress_with(&noisy, all).unwrap(), b"dump parity");
    }

    #[test]
    fn escapes_render_like_the_diagnostics_expect() {
        assert_eq!(escape_byte(b'a'), "a");
        assert_eq!(escape_byte(b' '), " ");
        assert_eq!(escape_byte(b'\n'), "\\n");
        assert_eq!(escape_byte(0), "\\0");
        assert_eq!(escape_byte(0x7f), "\\x7f");
    }
}
