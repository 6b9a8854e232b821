//! Huffman tree construction, code-length derivation, and decode traversal.
//!
//! Nodes live in an arena (`Vec`) addressed by index. Children are
//! `Option<NodeId>`, so slot occupancy is explicit rather than inferred from
//! a weight sentinel, and tearing the whole tree down is just dropping the
//! arena. All walks use explicit stacks; nothing here recurses.

use {
    crate::{
        bits::BitReader,
        code::{CodeTable, MAX_CODE_LENGTH},
        error::{Error, FormatError},
        escape_byte,
        freq::FrequencyTable,
        heap::MinHeap,
    },
    std::fmt,
};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy)]
struct Node {
    weight: u64,
    symbol: Option<u8>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    fn leaf(symbol: u8, weight: u64) -> Self {
        Node {
            weight,
            symbol: Some(symbol),
            left: None,
            right: None,
        }
    }

    fn internal(weight: u64, left: NodeId, right: NodeId) -> Self {
        Node {
            weight,
            symbol: None,
            left: Some(left),
            right: Some(right),
        }
    }

    fn is_leaf(&self) -> bool {
        self.symbol.is_some()
    }
}

/// A Huffman tree: either a single leaf (one distinct symbol) or a full
/// binary tree in which every internal node has exactly two children.
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Greedy Huffman build over the observed frequencies.
    ///
    /// One leaf per distinct symbol is queued in ascending symbol order,
    /// then the two lowest-weight nodes are repeatedly merged until one
    /// remains. With `n` distinct symbols this touches exactly `2n - 1`
    /// nodes, which is the arena and heap capacity.
    pub fn build(freq: &FrequencyTable) -> Result<Self, Error> {
        let distinct = freq.distinct();
        if distinct == 0 {
            return Err(Error::EmptyInput);
        }
        let node_count = 2 * distinct - 1;

        let mut nodes = Vec::with_capacity(node_count);
        let mut heap = MinHeap::with_capacity(node_count);

        for (symbol, count) in freq.iter_nonzero() {
            let id = nodes.len();
            nodes.push(Node::leaf(symbol, count));
            heap.insert(count, id)?;
        }

        while heap.len() > 1 {
            // len() > 1 guarantees both extractions succeed
            let (weight_a, a) = heap.pop().expect("two nodes queued");
            let (weight_b, b) = heap.pop().expect("two nodes queued");
            let id = nodes.len();
            if id >= node_count {
                return Err(Error::CapacityExceeded("huffman tree arena"));
            }
            let weight = weight_a + weight_b;
            nodes.push(Node::internal(weight, a, b));
            heap.insert(weight, id)?;
        }
        let (_, root) = heap.pop().ok_or(Error::EmptyInput)?;

        Ok(Tree { nodes, root })
    }

    /// Read the per-symbol code lengths off the tree shape.
    ///
    /// Depth-first with an explicit stack; a leaf's depth is its code
    /// length. A lone-leaf root still gets length 1, because a 0-length
    /// code cannot be packed or unpacked unambiguously.
    pub fn code_lengths(&self) -> Result<Vec<(u8, u8)>, Error> {
        let mut lengths = Vec::new();
        let mut stack = vec![(self.root, 0u8)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            if let Some(symbol) = node.symbol {
                lengths.push((symbol, depth.max(1)));
                continue;
            }
            if depth >= MAX_CODE_LENGTH {
                return Err(Error::CapacityExceeded("code length over 31 bits"));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
        }
        Ok(lengths)
    }

    /// Rebuild a decode tree from a canonical code table.
    ///
    /// Each code is walked bit-by-bit from the root, creating internal
    /// nodes on demand; the final bit lands on the leaf. Because canonical
    /// tables are prefix-free by construction, a collision here means the
    /// container lied about its lengths and is reported as corrupt.
    pub fn from_codes(table: &CodeTable) -> Result<Self, Error> {
        let bit_total: usize = table
            .entries()
            .iter()
            .map(|entry| entry.code.length as usize)
            .sum();
        let mut nodes = Vec::with_capacity(bit_total + 1);
        nodes.push(Node {
            weight: 0,
            symbol: None,
            left: None,
            right: None,
        });
        let root = 0;

        for entry in table.entries() {
            let mut id = root;
            let code = entry.code;
            for i in (0..code.length).rev() {
                if nodes[id].is_leaf() {
                    // A shorter code already ends here.
                    return Err(FormatError::PrefixConflict(entry.symbol).into());
                }
                let bit = (code.bits >> i) & 1 == 1;
                let child = if bit { nodes[id].right } else { nodes[id].left };
                id = match child {
                    Some(child) => child,
                    None => {
                        let fresh = nodes.len();
                        nodes.push(Node {
                            weight: 0,
                            symbol: None,
                            left: None,
                            right: None,
                        });
                        if bit {
                            nodes[id].right = Some(fresh);
                        } else {
                            nodes[id].left = Some(fresh);
                        }
                        fresh
                    }
                };
            }
            if nodes[id].symbol.is_some() || nodes[id].left.is_some() || nodes[id].right.is_some()
            {
                // This code is a duplicate of, or a prefix of, another.
                return Err(FormatError::PrefixConflict(entry.symbol).into());
            }
            nodes[id].symbol = Some(entry.symbol);
        }

        Ok(Tree { nodes, root })
    }

    /// Decode exactly `count` symbols from the packed body.
    ///
    /// Starting at the root, bit 0 moves left and bit 1 moves right; each
    /// leaf emits its symbol and resets to the root. Unconsumed padding
    /// bits in the final byte are left where they lie.
    pub fn decode(&self, reader: &mut BitReader<'_>, count: usize) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let mut id = self.root;
            loop {
                let node = &self.nodes[id];
                if let Some(symbol) = node.symbol {
                    out.push(symbol);
                    break;
                }
                let bit = reader.next_bit().ok_or(FormatError::TruncatedBody)?;
                let child = if bit { node.right } else { node.left };
                id = child.ok_or(FormatError::InvalidCode)?;
            }
        }
        Ok(out)
    }
}

/// Indented rendering for the `-dtree` diagnostic: internal nodes print as
/// `(weight)`, leaves as `('sym': weight)`.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, indent)) = stack.pop() {
            let node = &self.nodes[id];
            for _ in 0..indent {
                write!(f, "  ")?;
            }
            match node.symbol {
                Some(symbol) => writeln!(f, "('{}': {})", escape_byte(symbol), node.weight)?,
                None => writeln!(f, "({})", node.weight)?,
            }
            if let Some(right) = node.right {
                stack.push((right, indent + 1));
            }
            if let Some(left) = node.left {
                stack.push((left, indent + 1));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashMap};

    fn lengths_of(input: &[u8]) -> HashMap<u8, u8> {
        let freq = FrequencyTable::of(input).unwrap();
        let tree = Tree::build(&freq).unwrap();
        tree.code_lengths().unwrap().into_iter().collect()
    }

    #[test]
    fn hello_lengths_are_optimal() {
        let lengths = lengths_of(b"hello");
        assert_eq!(lengths.len(), 4);
        // Weighted cost of an optimal code for {h:1, e:1, l:2, o:1} is 10.
        let cost: u64 = b"hello"
            .iter()
            .map(|&byte| lengths[&byte] as u64)
            .sum();
        assert_eq!(cost, 10);
        // Kraft equality: a Huffman tree is always full.
        let kraft: u32 = lengths
            .values()
            .map(|&len| 1u32 << (MAX_CODE_LENGTH - len))
            .sum();
        assert_eq!(kraft, 1 << MAX_CODE_LENGTH);
    }

    #[test]
    fn tie_break_is_stable_across_builds() {
        let first = lengths_of(b"abracadabra");
        let second = lengths_of(b"abracadabra");
        assert_eq!(first, second);
    }

    #[test]
    fn single_symbol_gets_length_one() {
        let lengths = lengths_of(b"aaaa");
        assert_eq!(lengths.len(), 1);
        assert_eq!(lengths[&b'a'], 1);
    }

    #[test]
    fn skewed_frequencies_grow_code_depth() {
        // Fibonacci-ish weights force a fully skewed tree.
        let mut input = Vec::new();
        for (symbol, count) in [(b'a', 1usize), (b'b', 1), (b'c', 2), (b'd', 4), (b'e', 8)] {
            input.extend(std::iter::repeat(symbol).take(count));
        }
        let lengths = lengths_of(&input);
        assert_eq!(lengths[&b'e'], 1);
        assert_eq!(lengths[&b'a'], 4);
        assert_eq!(lengths[&b'b'], 4);
    }

    #[test]
    fn rebuilt_tree_decodes_its_own_codes() {
        let table =
            CodeTable::from_lengths(vec![(b'a', 1), (b'b', 2), (b'c', 3), (b'd', 3)]).unwrap();
        let tree = Tree::from_codes(&table).unwrap();

        let mut writer = crate::bits::BitWriter::new();
        for &symbol in b"dcba" {
            writer.push_code(table.lookup(symbol).unwrap());
        }
        let bytes = writer.into_bytes();
        let mut reader = BitReader::new(&bytes);
        assert_eq!(tree.decode(&mut reader, 4).unwrap(), b"dcba");
    }

    #[test]
    fn truncated_body_is_reported() {
        let table = CodeTable::from_lengths(vec![(b'a', 1), (b'b', 1)]).unwrap();
        let tree = Tree::from_codes(&table).unwrap();
        let mut reader = BitReader::new(&[0b1010_1010]);
        // 8 bits hold 8 symbols; asking for 9 runs dry.
        let result = tree.decode(&mut reader, 9);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::TruncatedBody))
        ));
    }

    #[test]
    fn bit_path_into_missing_branch_is_reported() {
        // Undersubscribed table: the 1-branch of the root has no occupant.
        let table = CodeTable::from_lengths(vec![(b'a', 1)]).unwrap();
        let tree = Tree::from_codes(&table).unwrap();
        let mut reader = BitReader::new(&[0b1000_0000]);
        let result = tree.decode(&mut reader, 1);
        assert!(matches!(
            result,
            Err(Error::Format(FormatError::InvalidCode))
        ));
    }

    #[test]
    fn lone_leaf_decode_consumes_one_bit_per_symbol() {
        let table = CodeTable::from_lengths(vec![(b'z', 1)]).unwrap();
        let tree = Tree::from_codes(&table).unwrap();
        let mut reader = BitReader::new(&[0b0000_0000]);
        assert_eq!(tree.decode(&mut reader, 5).unwrap(), b"zzzzz");
        assert_eq!(reader.position(), 5);
    }

    #[test]
    fn display_prints_leaf_and_weight() {
        let freq = FrequencyTable::of(b"ab").unwrap();
        let tree = Tree::build(&freq).unwrap();
        let rendered = tree.to_string();
        assert!(rendered.contains("(2)"));
        assert!(rendered.contains("('a': 1)"));
        assert!(rendered.contains("('b': 1)"));
    }

    #[test]
    fn from_codes_never_sees_conflicts_from_canonical_tables() {
        let freq = FrequencyTable::of(b"the quick brown fox jumps over the lazy dog").unwrap();
        let tree = Tree::build(&freq).unwrap();
        let table = CodeTable::from_lengths(tree.code_lengths().unwrap()).unwrap();
        assert!(Tree::from_codes(&table).is_ok());
    }
}
