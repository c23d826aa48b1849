//! Decodes a bit stream against a rebuilt trie.
//!
//! The decoder walks the trie one bit at a time and writes a byte each time it completes a code.
//! It stops when it lands on the end-of-stream sentinel (which is never written) or when the bit
//! source runs dry. Running dry part way through a code is a normal end, not an error, and the
//! partial code is dropped.
//!
//! The loop looks at the node it is on BEFORE it moves. A symbol is only written once the bit
//! after its last code bit has been read, and that same bit is then the first step of the next
//! code from the root. A symbol whose code is the very last thing in the stream (with no
//! sentinel after it) is therefore never written. Encoders that end every stream with the
//! sentinel, as ours does, are unaffected.

use log::{debug, info, trace};
use std::fmt::{Display, Formatter};
use std::io::Write;

use super::trie::DecodeTrie;
use super::EOF_SYMBOL;
use crate::bitstream::BitSource;
use crate::error::{HuffError, Result};

/// How a decode session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Reached the end-of-stream sentinel.
    EndOfStream,
    /// The bit source ran out first.
    Exhausted,
}

impl Display for Ending {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// What a decode session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    pub ending: Ending,
    pub bits_read: usize,
    pub bytes_written: usize,
}

/// Owns the trie for the length of a decode session.
#[derive(Debug)]
pub struct Decoder {
    trie: DecodeTrie,
}

impl Decoder {
    pub fn new(trie: DecodeTrie) -> Self {
        Decoder { trie }
    }

    pub fn trie(&self) -> &DecodeTrie {
        &self.trie
    }

    /// End the session and hand the trie back.
    pub fn into_trie(self) -> DecodeTrie {
        self.trie
    }

    /// Decode bits from `source` into `sink` until the sentinel or the end of the bits.
    pub fn decode<S: BitSource, W: Write>(
        &self,
        source: &mut S,
        sink: &mut W,
    ) -> Result<DecodeReport> {
        let root = self.trie.root();
        let mut node = root;
        let mut bits_read = 0;
        let mut bytes_written = 0;

        let mut next_bit = source.bit();
        if next_bit.is_some() {
            bits_read += 1;
        }

        let ending = loop {
            let here = self.trie.symbol(node);
            if here == Some(EOF_SYMBOL) {
                break Ending::EndOfStream;
            }
            let bit = match next_bit {
                Some(bit) => bit,
                None => break Ending::Exhausted,
            };

            // Finish the symbol we are sitting on, then start over from the root.
            if let Some(sym) = here {
                trace!("decoded {} after {} bits", sym, bits_read);
                let byte = u8::try_from(sym).map_err(|_| HuffError::InvalidSymbol(sym))?;
                sink.write_all(&[byte])?;
                bytes_written += 1;
                node = root;
            }

            node = self
                .trie
                .child(node, bit)
                .ok_or(HuffError::DeadEnd { bits_read })?;

            next_bit = source.bit();
            if next_bit.is_some() {
                bits_read += 1;
            }
        };

        if ending == Ending::Exhausted && node != root {
            debug!("Bit source ran out part way through a code");
        }
        info!(
            "Decoded {} bytes from {} bits ({})",
            bytes_written, bits_read, ending
        );
        Ok(DecodeReport {
            ending,
            bits_read,
            bytes_written,
        })
    }
}
