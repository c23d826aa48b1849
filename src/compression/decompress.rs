use std::fs;
use std::io::Write;

use log::{error, info, warn};

use super::compress::read_table;
use crate::bitstream::bitreader::BitReader;
use crate::error::{HuffError, Result};
use crate::huffman_coding::decoder::{Decoder, Ending};
use crate::huffman_coding::trie::DecodeTrie;
use crate::tools::cli::HuffOpts;

/// Decode the bit text named in opts (or stdin) with the code table.
pub fn decode(opts: &HuffOpts) -> Result<()> {
    let table = read_table(opts)?;
    let trie = if opts.strict {
        DecodeTrie::from_table_strict(&table).map_err(|e| {
            error!("Fatal error: code table failed its checks: {}", e);
            e
        })?
    } else {
        DecodeTrie::from_table(&table)
    };
    let decoder = Decoder::new(trie);

    let mut br = BitReader::new(opts.reader()?);
    let mut out = opts.writer()?;
    let report = match decoder.decode(&mut br, &mut out) {
        Ok(report) => report,
        Err(e) => {
            discard_partial(opts, out, &e);
            return Err(e);
        }
    };
    out.flush()?;

    // A read error looks like the end of the bits to the decoder; report it here.
    if let Some(e) = br.take_error() {
        return Err(e.into());
    }
    match report.ending {
        Ending::EndOfStream => info!("Found the end-of-stream code."),
        Ending::Exhausted => warn!(
            "Bits ran out after {} bits without an end-of-stream code",
            report.bits_read
        ),
    }
    Ok(())
}

/// A failed decode leaves no output file behind. Bytes already sent to stdout cannot be taken
/// back, so they are flushed and reported as incomplete.
fn discard_partial(opts: &HuffOpts, mut out: Box<dyn Write>, e: &HuffError) {
    match opts.output_name() {
        Some(name) => {
            drop(out);
            error!("Decoding failed ({}), removing partial output {}", e, name);
            if let Err(rm) = fs::remove_file(&name) {
                warn!("Could not remove {}: {}", name, rm);
            }
        }
        None => {
            error!("Decoding failed ({}), output so far is incomplete", e);
            if let Err(fe) = out.flush() {
                warn!("Could not flush partial output: {}", fe);
            }
        }
    }
}
