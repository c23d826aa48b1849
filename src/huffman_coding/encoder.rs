//! The encoder paired with [`super::decoder`].
//!
//! Each byte is replaced by its code from the table and the stream is closed with the sentinel's
//! code. Closing with the sentinel is what lets the decoder write the final byte; see the note on
//! the decode loop.

use log::{debug, info};

use super::code_table::CodeTable;
use super::{ALPHABET_SIZE, EOF_SYMBOL};
use crate::bitstream::BitSink;
use crate::error::{HuffError, Result};

/// Codes indexed by symbol, as bit values.
#[derive(Debug, Clone)]
pub struct Encoder {
    codes: Vec<Option<Vec<u8>>>,
}

impl Encoder {
    /// Build the lookup from a table. The table must have a code for the sentinel. A symbol given
    /// twice keeps its later code, matching what the trie does with the same table.
    pub fn new(table: &CodeTable) -> Result<Self> {
        let mut codes: Vec<Option<Vec<u8>>> = vec![None; ALPHABET_SIZE];
        for entry in table {
            let bits = entry.code.bytes().map(|c| (c != b'0') as u8).collect();
            let slot = codes
                .get_mut(entry.symbol as usize)
                .ok_or(HuffError::InvalidSymbol(entry.symbol))?;
            *slot = Some(bits);
        }
        if codes[EOF_SYMBOL as usize].is_none() {
            return Err(HuffError::MissingEndOfStream);
        }
        debug!(
            "Encoder ready with {} codes",
            codes.iter().filter(|c| c.is_some()).count()
        );
        Ok(Encoder { codes })
    }

    /// The code of a byte, as bit values.
    pub fn code(&self, byte: u8) -> Option<&[u8]> {
        self.codes[byte as usize].as_deref()
    }

    /// Write the codes for all of `data` and then the sentinel into `sink`, then flush it.
    /// Returns the number of bits written.
    pub fn encode<S: BitSink>(&self, data: &[u8], sink: &mut S) -> Result<usize> {
        let mut bits = 0;
        for &byte in data {
            let code = self.code(byte).ok_or(HuffError::Unencodable(byte))?;
            bits += put_code(sink, code)?;
        }
        // Checked in new().
        if let Some(eof) = self.codes[EOF_SYMBOL as usize].as_deref() {
            bits += put_code(sink, eof)?;
        }
        sink.flush()?;
        info!("Encoded {} bytes into {} bits", data.len(), bits);
        Ok(bits)
    }
}

fn put_code<S: BitSink>(sink: &mut S, code: &[u8]) -> std::io::Result<usize> {
    for &bit in code {
        sink.put_bit(bit as usize)?;
    }
    Ok(code.len())
}

#[cfg(test)]
mod test {
    use super::Encoder;
    use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
    use crate::error::HuffError;
    use crate::huffman_coding::code_table::CodeTable;
    use crate::huffman_coding::decoder::{Decoder, Ending};
    use crate::huffman_coding::tree::HuffmanTree;
    use crate::huffman_coding::trie::DecodeTrie;

    fn encode_text(table: &CodeTable, data: &[u8]) -> String {
        let mut bw = BitWriter::new(Vec::new());
        Encoder::new(table).unwrap().encode(data, &mut bw).unwrap();
        String::from_utf8(bw.into_inner().unwrap()).unwrap()
    }

    fn table_for(data: &[u8]) -> CodeTable {
        let mut freqs = [0_u32; 256];
        data.iter().for_each(|&b| freqs[b as usize] += 1);
        HuffmanTree::from_freqs(&freqs).code_table()
    }

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let table = table_for(data);
        let bits = encode_text(&table, data);
        let decoder = Decoder::new(DecodeTrie::from_table(&table));
        let mut out = Vec::new();
        let report = decoder
            .decode(&mut BitReader::new(bits.as_bytes()), &mut out)
            .unwrap();
        assert_eq!(report.ending, Ending::EndOfStream);
        out
    }

    #[test]
    fn small_table_test() {
        let table: CodeTable = "65\n0\n66\n10\n256\n11\n".parse().unwrap();
        assert_eq!(encode_text(&table, b"AB"), "01011");
        assert_eq!(encode_text(&table, b""), "11");
    }

    #[test]
    fn round_trip_test() {
        let data = b"the quick brown fox jumps over the lazy dog".to_vec();
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn round_trip_edges_test() {
        assert_eq!(round_trip(b""), b"");
        assert_eq!(round_trip(b"aaaaaaa"), b"aaaaaaa");
        assert_eq!(round_trip(&[0, 0, 0, 1]), vec![0, 0, 0, 1]);
        let all: Vec<u8> = (0..=255).chain(0..=31).collect();
        assert_eq!(round_trip(&all), all);
    }

    #[test]
    fn lone_sentinel_encodes_nothing_test() {
        let table = table_for(b"");
        assert_eq!(encode_text(&table, b""), "");
    }

    #[test]
    fn errors_test() {
        let table: CodeTable = "65\n0\n256\n1\n".parse().unwrap();
        let encoder = Encoder::new(&table).unwrap();
        let mut bw = BitWriter::new(Vec::new());
        assert!(matches!(
            encoder.encode(b"AZ", &mut bw),
            Err(HuffError::Unencodable(b'Z'))
        ));
        let table: CodeTable = "65\n0\n".parse().unwrap();
        assert!(matches!(
            Encoder::new(&table),
            Err(HuffError::MissingEndOfStream)
        ));
    }

    #[test]
    fn oversized_symbol_test() {
        let mut table: CodeTable = "256\n1\n".parse().unwrap();
        assert!(table.push(300, "0").is_err());
        assert_eq!(encode_text(&table, b""), "1");
        table.append(300, "0".to_string());
        assert!(matches!(
            Encoder::new(&table),
            Err(HuffError::InvalidSymbol(300))
        ));
    }
}
