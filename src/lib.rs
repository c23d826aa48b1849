//! Huffman codec core.
//!
//! Builds a prefix-free (Huffman) code from byte counts, writes that code out as a plain text code
//! table, rebuilds a decoding trie from such a table, and decodes a bit stream with the trie.
//!
//! Every code includes an end-of-stream symbol (256) next to the 256 byte values, so a decoder
//! always knows where the data stops.
//!
//! Basic usage from the command line:
//!
//! `$> huffcore notes.txt` writes the code table notes.txt.codes
//!
//! `$> huffcore -z notes.txt` encodes notes.txt into the bit text notes.txt.bits
//!
//! `$> huffcore -d notes.txt.bits` decodes it again into notes.txt.out
//!
//! And from Rust:
//!
//! ```
//! use huffcore::bitstream::bitreader::BitReader;
//! use huffcore::huffman_coding::{decoder::Decoder, tree::HuffmanTree, trie::DecodeTrie};
//! use huffcore::tools::freq_count::freqs;
//!
//! let tree = HuffmanTree::from_freqs(&freqs(b"abracadabra"));
//! let table = tree.code_table().to_string();
//!
//! // ...the table text travels to the decoding side...
//! let decoder = Decoder::new(DecodeTrie::from_table(&table.parse()?));
//! let mut out = Vec::new();
//! decoder.decode(&mut BitReader::new("0101".as_bytes()), &mut out)?;
//! # Ok::<(), huffcore::error::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;
