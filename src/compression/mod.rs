//! The compression module drives the codec for the command line tool.
//!
//! A full round trip takes three runs:
//! - Table: count the bytes of the input, build the Huffman tree and write its code table.
//! - Encode: replace every input byte with its code from the table, then end with the
//!   end-of-stream code. Bits are written as '0' / '1' text.
//! - Decode: rebuild the decoding trie from the table and walk it with the bit text.
//!
//! The table is the only thing shared between the encoding and decoding side. The decoder never
//! sees the tree the table came from.
//!

pub mod compress;
pub mod decompress;
