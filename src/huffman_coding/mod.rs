//! The huffman module is the codec core of huffcore.
//!
//! Data flows through it in one direction:
//!
//! byte counts -> [`tree`] (weighted build) -> [`code_table`] (depth first codes, text form)
//! -> [`trie`] (rebuilt from the text) -> [`decoder`] (bits back to bytes).
//!
//! The tree built from the counts is only used to produce the code table. The decoder never sees
//! it; it works from a trie rebuilt from the table, which is the only thing that travels between
//! the two sides. The [`encoder`] works from the same table.
//!
//! Every alphabet has 257 symbols: the 256 byte values and an end-of-stream sentinel. The
//! sentinel is always given a code, so a stream always has a way to say it is finished.
//!
//! All of this is sequential. Nothing here benefits from multithreading.
//!

pub mod code_table;
pub mod decoder;
pub mod encoder;
pub mod tree;
pub mod trie;

/// A symbol of the alphabet: 0..=255 are bytes, 256 is the end-of-stream sentinel.
pub type Symbol = u16;

/// The end-of-stream sentinel.
pub const EOF_SYMBOL: Symbol = 256;

/// Byte values plus the sentinel.
pub const ALPHABET_SIZE: usize = 257;

/// Count table indexed by byte value.
pub type FreqTable = [u32; 256];
