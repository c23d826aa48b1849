use std::fs::File;
use std::io::{BufReader, Read, Write};

use log::{debug, info};

use crate::bitstream::bitwriter::BitWriter;
use crate::error::Result;
use crate::huffman_coding::code_table::CodeTable;
use crate::huffman_coding::encoder::Encoder;
use crate::huffman_coding::tree::HuffmanTree;
use crate::tools::cli::HuffOpts;
use crate::tools::freq_count::freqs;

/// Read the whole input named in opts (or stdin).
fn read_input(opts: &HuffOpts) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    opts.reader()?.read_to_end(&mut data)?;
    debug!("Read {} bytes of input", data.len());
    Ok(data)
}

/// Read the code table named in opts.
pub(crate) fn read_table(opts: &HuffOpts) -> Result<CodeTable> {
    let name = opts.table_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "No code table given (use --table)",
        )
    })?;
    info!("Reading code table {}", name);
    CodeTable::read_from(BufReader::new(File::open(&name)?))
}

/// Count the input bytes, build the tree and write out its code table.
pub fn write_table(opts: &HuffOpts) -> Result<()> {
    let data = read_input(opts)?;
    let tree = HuffmanTree::from_freqs(&freqs(&data));
    info!(
        "Built a tree of {} leaves, longest code {} bits",
        tree.leaves().len(),
        tree.depth()
    );

    let table = tree.code_table();
    let mut out = opts.writer()?;
    table.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Encode the input with the code table into bit text.
pub fn encode(opts: &HuffOpts) -> Result<()> {
    let table = read_table(opts)?;
    let encoder = Encoder::new(&table)?;
    let data = read_input(opts)?;

    let mut bw = BitWriter::with_line_width(opts.writer()?, opts.line_width);
    let bits = encoder.encode(&data, &mut bw)?;
    if !data.is_empty() {
        info!(
            "{:.3} bits per byte ({} bits for {} bytes)",
            bits as f64 / data.len() as f64,
            bits,
            data.len()
        );
    }
    Ok(())
}
