//! Fixed-capacity array-backed min-heap driving the greedy tree build.

use crate::{error::Error, tree::NodeId};

#[derive(Clone, Copy)]
struct Entry {
    weight: u64,
    seq: u32,
    node: NodeId,
}

impl Entry {
    fn key(&self) -> (u64, u32) {
        (self.weight, self.seq)
    }
}

/// Min-heap over tree nodes, ordered by ascending weight.
///
/// Capacity is fixed at construction: a Huffman build over `n` distinct
/// symbols touches exactly `2n - 1` nodes, so the backing array never grows.
///
/// Tie-break: equal weights order by insertion sequence, oldest first.
/// Combined with leaves being queued in ascending symbol order, this makes
/// the resulting tree shape fully deterministic for a given input.
pub struct MinHeap {
    entries: Vec<Entry>,
    capacity: usize,
    next_seq: u32,
}

impl MinHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue one node, sifting it up to its ordered position.
    pub fn insert(&mut self, weight: u64, node: NodeId) -> Result<(), Error> {
        if self.entries.len() >= self.capacity {
            return Err(Error::CapacityExceeded("huffman heap"));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { weight, seq, node });
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Remove and return the lowest-weight node, or `None` on an empty heap.
    pub fn pop(&mut self) -> Option<(u64, NodeId)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let root = self.entries.pop()?;
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((root.weight, root.node))
    }

    fn sift_up(&mut self, mut hole: usize) {
        while hole > 0 {
            let parent = (hole - 1) / 2;
            if self.entries[hole].key() >= self.entries[parent].key() {
                break;
            }
            self.entries.swap(hole, parent);
            hole = parent;
        }
    }

    fn sift_down(&mut self, mut hole: usize) {
        loop {
            let left = 2 * hole + 1;
            let right = 2 * hole + 2;
            let mut smallest = hole;
            if left < self.entries.len()
                && self.entries[left].key() < self.entries[smallest].key()
            {
                smallest = left;
            }
            if right < self.entries.len()
                && self.entries[right].key() < self.entries[smallest].key()
            {
                smallest = right;
            }
            if smallest == hole {
                break;
            }
            self.entries.swap(hole, smallest);
            hole = smallest;
        }
    }
}
