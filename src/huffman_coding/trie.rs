//! Rebuilds a decoding trie from a code table.
//!
//! Each record is walked from the root: a '0' goes left and a '1' goes right, creating routing
//! nodes on the way as needed, and the node reached at the end of the code gets the symbol.
//! Records can arrive in any order and share any prefix.
//!
//! Nodes live in one vec and point at their children by index. The root is always index 0.
//!
//! The plain build trusts the table. If one code is a prefix of another, the longer one is
//! shadowed and a later record simply overwrites an earlier one on the same node. The strict
//! build refuses such tables instead.

use log::{debug, trace};
use rustc_hash::FxHashSet;

use super::code_table::CodeTable;
use super::{Symbol, EOF_SYMBOL};
use crate::error::{HuffError, Result};

const ROOT: usize = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TrieNode {
    /// None until some code ends here.
    symbol: Option<Symbol>,
    /// Index of the child for bit 0 and bit 1.
    kids: [Option<usize>; 2],
}

impl TrieNode {
    fn has_kids(&self) -> bool {
        self.kids.iter().any(Option::is_some)
    }
}

/// The decode side trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl Default for DecodeTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeTrie {
    /// A trie holding only an unassigned root.
    pub fn new() -> Self {
        DecodeTrie {
            nodes: vec![TrieNode::default()],
        }
    }

    /// Rebuild a trie from every record of a table, without checking it.
    pub fn from_table(table: &CodeTable) -> Self {
        let mut trie = DecodeTrie::new();
        for entry in table {
            trie.assign(entry.symbol, &entry.code);
        }
        debug!(
            "Rebuilt trie of {} nodes from {} codes",
            trie.len(),
            table.len()
        );
        trie
    }

    /// Rebuild a trie, refusing a table that is not prefix free, repeats a symbol, or has no
    /// end-of-stream code.
    pub fn from_table_strict(table: &CodeTable) -> Result<Self> {
        let mut trie = DecodeTrie::new();
        let mut seen: FxHashSet<Symbol> = FxHashSet::default();
        for entry in table {
            if entry.symbol > EOF_SYMBOL {
                return Err(HuffError::InvalidSymbol(entry.symbol));
            }
            if !seen.insert(entry.symbol) {
                return Err(HuffError::DuplicateSymbol(entry.symbol));
            }
            trie.insert_checked(entry.symbol, &entry.code)?;
        }
        if !seen.contains(&EOF_SYMBOL) {
            return Err(HuffError::MissingEndOfStream);
        }
        debug!(
            "Rebuilt and checked trie of {} nodes from {} codes",
            trie.len(),
            table.len()
        );
        Ok(trie)
    }

    /// Walk (and grow) the path spelled by `code`, then assign `symbol` to where it ends.
    /// Any character other than '0' counts as a '1'. Symbols above the sentinel are refused.
    pub fn insert(&mut self, symbol: Symbol, code: &str) -> Result<()> {
        if symbol > EOF_SYMBOL {
            return Err(HuffError::InvalidSymbol(symbol));
        }
        self.assign(symbol, code);
        Ok(())
    }

    fn assign(&mut self, symbol: Symbol, code: &str) {
        let mut node = ROOT;
        for c in code.chars() {
            node = self.child_or_new(node, bit_of(c));
        }
        if let Some(old) = self.nodes[node].symbol {
            trace!("code {} reassigned from {} to {}", code, old, symbol);
        }
        self.nodes[node].symbol = Some(symbol);
    }

    /// Same as insert, but stop at any collision with a code already in the trie.
    fn insert_checked(&mut self, symbol: Symbol, code: &str) -> Result<()> {
        let collision = |other: Symbol| HuffError::PrefixViolation {
            symbol,
            code: code.to_string(),
            other,
        };
        let mut node = ROOT;
        for c in code.chars() {
            // A symbol on the way means an earlier code is a prefix of this one.
            if let Some(other) = self.nodes[node].symbol {
                return Err(collision(other));
            }
            node = self.child_or_new(node, bit_of(c));
        }
        if let Some(other) = self.nodes[node].symbol {
            return Err(collision(other));
        }
        // Children here mean this code is a prefix of an earlier one.
        if self.nodes[node].has_kids() {
            let other = self.first_symbol_below(node).unwrap_or(EOF_SYMBOL);
            return Err(collision(other));
        }
        self.nodes[node].symbol = Some(symbol);
        Ok(())
    }

    fn child_or_new(&mut self, node: usize, bit: usize) -> usize {
        match self.nodes[node].kids[bit] {
            Some(kid) => kid,
            None => {
                let kid = self.nodes.len();
                self.nodes.push(TrieNode::default());
                self.nodes[node].kids[bit] = Some(kid);
                kid
            }
        }
    }

    fn first_symbol_below(&self, node: usize) -> Option<Symbol> {
        let mut stack = vec![node];
        while let Some(idx) = stack.pop() {
            let n = &self.nodes[idx];
            if n.symbol.is_some() {
                return n.symbol;
            }
            // Right pushed first so the left branch is searched first.
            stack.extend(n.kids.iter().rev().flatten());
        }
        None
    }

    /// Index of the root node.
    pub fn root(&self) -> usize {
        ROOT
    }

    /// The symbol assigned to a node, or None for a routing node.
    pub fn symbol(&self, node: usize) -> Option<Symbol> {
        self.nodes.get(node).and_then(|n| n.symbol)
    }

    /// The child of a node for a bit: 0 goes left, anything else goes right. An index that is
    /// not a node has no children.
    pub fn child(&self, node: usize, bit: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.kids[(bit != 0) as usize])
    }

    /// Number of nodes, routing nodes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[ROOT].symbol.is_none()
    }

    /// Follow a code from the root and return the symbol on the node it ends at.
    pub fn lookup(&self, code: &str) -> Option<Symbol> {
        let mut node = ROOT;
        for c in code.chars() {
            node = self.child(node, bit_of(c))?;
        }
        self.symbol(node)
    }

    /// Every assigned node as a code table, depth first and left before right. For a trie
    /// rebuilt from a tree's table this gives back the same records in the same order.
    pub fn codes(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut path = String::with_capacity(32);
        self.collect_codes(ROOT, &mut path, &mut table);
        table
    }

    fn collect_codes(&self, node: usize, path: &mut String, table: &mut CodeTable) {
        let n = &self.nodes[node];
        if let Some(sym) = n.symbol {
            table.append(sym, path.clone());
        }
        for (bit, kid) in n.kids.iter().enumerate() {
            if let Some(kid) = kid {
                path.push(if bit == 0 { '0' } else { '1' });
                self.collect_codes(*kid, path, table);
                path.pop();
            }
        }
    }
}

#[inline(always)]
fn bit_of(c: char) -> usize {
    (c != '0') as usize
}

#[cfg(test)]
mod test {
    use super::DecodeTrie;
    use crate::error::HuffError;
    use crate::huffman_coding::code_table::CodeTable;
    use crate::huffman_coding::tree::HuffmanTree;
    use crate::huffman_coding::EOF_SYMBOL;

    fn table(text: &str) -> CodeTable {
        text.parse().unwrap()
    }

    #[test]
    fn small_table_test() {
        let trie = DecodeTrie::from_table(&table("65\n0\n66\n10\n256\n11\n"));
        // Root, A, the routing node on the right, B and the sentinel.
        assert_eq!(trie.len(), 5);
        assert_eq!(trie.symbol(trie.root()), None);
        assert_eq!(trie.lookup("0"), Some(65));
        assert_eq!(trie.lookup("1"), None);
        assert_eq!(trie.lookup("10"), Some(66));
        assert_eq!(trie.lookup("11"), Some(EOF_SYMBOL));
        assert_eq!(trie.lookup("00"), None);
    }

    #[test]
    fn record_order_does_not_matter_test() {
        let a = DecodeTrie::from_table(&table("65\n0\n66\n10\n256\n11\n"));
        let b = DecodeTrie::from_table(&table("256\n11\n65\n0\n66\n10\n"));
        assert_eq!(a.codes(), b.codes());
    }

    #[test]
    fn symbol_zero_is_assigned_test() {
        let trie = DecodeTrie::from_table(&table("0\n0\n256\n1\n"));
        assert_eq!(trie.lookup("0"), Some(0));
        assert_eq!(trie.lookup(""), None);
    }

    #[test]
    fn round_trip_test() {
        let freqs: [u32; 256] = core::array::from_fn(|i| ((i * 31) % 97) as u32);
        let tree = HuffmanTree::from_freqs(&freqs);
        let codes = tree.code_table();
        let trie = DecodeTrie::from_table(&codes);
        for entry in &codes {
            assert_eq!(trie.lookup(&entry.code), Some(entry.symbol));
        }
        assert_eq!(trie.codes(), codes);
        // A full tree with n leaves has 2n - 1 nodes.
        assert_eq!(trie.len(), 2 * codes.len() - 1);
    }

    #[test]
    fn lone_sentinel_test() {
        let trie = DecodeTrie::from_table(&table("256\n\n"));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.symbol(trie.root()), Some(EOF_SYMBOL));
        assert!(!trie.is_empty());
        assert!(DecodeTrie::new().is_empty());
    }

    #[test]
    fn later_record_wins_test() {
        let trie = DecodeTrie::from_table(&table("65\n0\n66\n0\n256\n1\n"));
        assert_eq!(trie.lookup("0"), Some(66));
    }

    #[test]
    fn prefix_is_shadowed_test() {
        // 65 sits on the path to 66; the plain build accepts it.
        let trie = DecodeTrie::from_table(&table("65\n1\n66\n10\n256\n0\n"));
        assert_eq!(trie.lookup("1"), Some(65));
        assert_eq!(trie.lookup("10"), Some(66));
    }

    #[test]
    fn insert_test() {
        let mut trie = DecodeTrie::new();
        trie.insert(65, "0").unwrap();
        trie.insert(EOF_SYMBOL, "1").unwrap();
        assert!(matches!(
            trie.insert(300, "01"),
            Err(HuffError::InvalidSymbol(300))
        ));
        assert_eq!(trie.len(), 3);
        assert_eq!(trie.lookup("01"), None);
        assert_eq!(trie, DecodeTrie::from_table(&table("65\n0\n256\n1\n")));
    }

    #[test]
    fn bad_index_test() {
        let trie = DecodeTrie::from_table(&table("65\n0\n256\n1\n"));
        assert_eq!(trie.symbol(trie.len()), None);
        assert_eq!(trie.symbol(usize::MAX), None);
        assert_eq!(trie.child(trie.len(), 0), None);
        assert_eq!(trie.child(usize::MAX, 1), None);
        assert_eq!(trie.child(trie.root(), 1), Some(2));
    }

    #[test]
    fn strict_accepts_tree_table_test() {
        let mut freqs = [0_u32; 256];
        freqs[b'q' as usize] = 9;
        freqs[b'r' as usize] = 4;
        let codes = HuffmanTree::from_freqs(&freqs).code_table();
        let trie = DecodeTrie::from_table_strict(&codes).unwrap();
        assert_eq!(trie, DecodeTrie::from_table(&codes));
    }

    #[test]
    fn strict_rejects_test() {
        assert!(matches!(
            DecodeTrie::from_table_strict(&table("65\n1\n66\n10\n256\n0\n")),
            Err(HuffError::PrefixViolation { symbol: 66, other: 65, .. })
        ));
        assert!(matches!(
            DecodeTrie::from_table_strict(&table("66\n10\n65\n1\n256\n0\n")),
            Err(HuffError::PrefixViolation { symbol: 65, other: 66, .. })
        ));
        assert!(matches!(
            DecodeTrie::from_table_strict(&table("65\n0\n66\n0\n256\n1\n")),
            Err(HuffError::PrefixViolation { symbol: 66, other: 65, .. })
        ));
        assert!(matches!(
            DecodeTrie::from_table_strict(&table("65\n0\n65\n10\n256\n11\n")),
            Err(HuffError::DuplicateSymbol(65))
        ));
        assert!(matches!(
            DecodeTrie::from_table_strict(&table("65\n0\n66\n1\n")),
            Err(HuffError::MissingEndOfStream)
        ));
        let mut big = table("65\n0\n256\n11\n");
        big.append(300, "10".to_string());
        assert!(matches!(
            DecodeTrie::from_table_strict(&big),
            Err(HuffError::InvalidSymbol(300))
        ));
    }
}
