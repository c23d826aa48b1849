//! Builds the encode side Huffman tree from a table of byte counts.
//!
//! The sentinel is always added with a weight of 1, so an input of any size (empty included) has
//! a code for end-of-stream.
//!
//! Equal weights are broken by insertion order. Leaves are numbered in ascending symbol order, so
//! the sentinel is always the last leaf, and every merged node is numbered after all the leaves in
//! the order it was made. The lower number leaves the queue first, and the first node to leave
//! becomes the left child. This pins the shape of the tree for a given table.

use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{FreqTable, Symbol, EOF_SYMBOL};

/// A finalized tree node. Weights are gone by the time a node ends up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Kids(Box<Node>, Box<Node>),
    Leaf(Symbol),
}

/// A node waiting in the build queue, with the weight and sequence number that order it.
#[derive(Debug)]
struct Pending {
    weight: u64,
    seq: u32,
    node: Node,
}

impl Pending {
    fn new(weight: u64, seq: u32, node: Node) -> Self {
        Pending { weight, seq, node }
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    /// Sort Pending by decreasing weight and decreasing sequence, so the max-heap pops the
    /// lightest, oldest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// The encode side tree. Built once from a frequency snapshot, read once to make a code table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build a tree from byte counts. Any table is accepted, including all zeros.
    pub fn from_freqs(freqs: &FreqTable) -> Self {
        // One leaf per byte that actually occurs, then the sentinel.
        let mut queue: BinaryHeap<Pending> = freqs
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(sym, &count)| Pending::new(count as u64, sym as u32, Node::Leaf(sym as Symbol)))
            .collect();
        queue.push(Pending::new(1, EOF_SYMBOL as u32, Node::Leaf(EOF_SYMBOL)));
        debug!("Building tree from {} leaves", queue.len());

        // Merged nodes are numbered after every possible leaf.
        let mut next_seq = EOF_SYMBOL as u32 + 1;

        // Pull off the two lightest nodes and push back their parent until one node is left.
        // The sentinel guarantees the queue is never empty on the first pass.
        let root = loop {
            let left = match queue.pop() {
                Some(left) => left,
                None => break Node::Leaf(EOF_SYMBOL),
            };
            let right = match queue.pop() {
                Some(right) => right,
                None => break left.node,
            };
            trace!(
                "merge w{}#{} + w{}#{} -> #{}",
                left.weight,
                left.seq,
                right.weight,
                right.seq,
                next_seq
            );
            queue.push(Pending::new(
                left.weight + right.weight,
                next_seq,
                Node::Kids(Box::new(left.node), Box::new(right.node)),
            ));
            next_seq += 1;
        };
        HuffmanTree { root }
    }

    /// The root of the tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Leaf symbols in depth first, left to right order.
    pub fn leaves(&self) -> Vec<Symbol> {
        let mut leaves = Vec::new();
        return_leaves(&self.root, &mut leaves);
        leaves
    }

    /// Length of the longest code in the tree.
    pub fn depth(&self) -> usize {
        fn walk(node: &Node) -> usize {
            match node {
                Node::Kids(left, right) => 1 + walk(left).max(walk(right)),
                Node::Leaf(_) => 0,
            }
        }
        walk(&self.root)
    }
}

/// Recursively walk the tree and collect the leaf symbols.
fn return_leaves(node: &Node, leaves: &mut Vec<Symbol>) {
    match node {
        Node::Kids(left, right) => {
            return_leaves(left, leaves);
            return_leaves(right, leaves);
        }
        Node::Leaf(sym) => leaves.push(*sym),
    }
}
