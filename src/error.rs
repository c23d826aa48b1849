//! Error types for the huffcore library.
//!
//! The codec core itself has almost nothing that can fail. Errors come from parsing a code table,
//! from the optional strict checks on a table, from the encoder meeting a byte it has no code for,
//! and from I/O on the caller's streams.

use thiserror::Error;

use crate::huffman_coding::Symbol;

/// Result type for huffcore operations.
pub type Result<T> = std::result::Result<T, HuffError>;

/// Errors that can occur while reading tables, encoding or decoding.
#[derive(Error, Debug)]
pub enum HuffError {
    /// Reading or writing one of the caller's streams failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A symbol line in a code table is not a decimal number.
    #[error("line {line}: `{text}` is not a symbol")]
    BadSymbol { line: usize, text: String },

    /// A symbol line in a code table names a value above the sentinel.
    #[error("line {line}: symbol {symbol} is outside 0..=256")]
    SymbolOutOfRange { line: usize, symbol: u64 },

    /// A symbol handed to a table, encoder or decoder is above the sentinel.
    #[error("symbol {0} is outside 0..=256")]
    InvalidSymbol(Symbol),

    /// A code line contains something other than '0' and '1'.
    #[error("line {line}: code `{code}` may only contain '0' and '1'")]
    BadCode { line: usize, code: String },

    /// The table ended between a symbol line and its code line.
    #[error("line {line}: symbol {symbol} has no code line")]
    MissingCode { line: usize, symbol: Symbol },

    /// Two codes in a table where one is a prefix of the other (or they are equal).
    #[error("code `{code}` for symbol {symbol} collides with the code for symbol {other}")]
    PrefixViolation {
        symbol: Symbol,
        code: String,
        other: Symbol,
    },

    /// The same symbol was given two codes.
    #[error("symbol {0} appears more than once in the code table")]
    DuplicateSymbol(Symbol),

    /// The table has no code for the end-of-stream sentinel.
    #[error("the code table has no end-of-stream symbol")]
    MissingEndOfStream,

    /// The encoder was handed a byte that has no code in its table.
    #[error("byte {0} has no code in the table")]
    Unencodable(u8),

    /// The decoder was sent down a branch the trie does not have.
    #[error("bit {bits_read} leads off the decode trie")]
    DeadEnd { bits_read: usize },
}
