use super::BitSink;

const BUFFER_SIZE: usize = 64 * 1024;

/// Writes a bit text stream for output, one '0' or '1' character per bit. Bits are collected in
/// an output buffer and handed to the writer in large pieces.
pub struct BitWriter<W: std::io::Write> {
    /// Output buffer used to collect the bit characters.
    output: Vec<u8>,
    /// Handle to the output stream
    writer: W,
    /// Break the text into lines of this many bits. Zero means one unbroken line.
    line_width: usize,
    /// Bits on the current line.
    column: usize,
    /// Total bits written.
    bits: usize,
}

impl<W: std::io::Write> BitWriter<W> {
    /// Create a new BitWriter that writes one unbroken line of bits.
    pub fn new(writer: W) -> Self {
        Self::with_line_width(writer, 0)
    }

    /// Create a new BitWriter that starts a new line every `line_width` bits.
    pub fn with_line_width(writer: W, line_width: usize) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            writer,
            line_width,
            column: 0,
            bits: 0,
        }
    }

    /// Total bits written so far.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> std::io::Result<W> {
        BitSink::flush(&mut self)?;
        Ok(self.writer)
    }

    /// Write the buffer out to the writer and empty it.
    fn push_output(&mut self) -> std::io::Result<()> {
        self.writer.write_all(&self.output)?;
        self.output.clear();
        Ok(())
    }
}

impl<W: std::io::Write> BitSink for BitWriter<W> {
    fn put_bit(&mut self, bit: usize) -> std::io::Result<()> {
        if self.line_width > 0 && self.column == self.line_width {
            self.output.push(b'\n');
            self.column = 0;
        }
        self.output.push(if bit == 0 { b'0' } else { b'1' });
        self.column += 1;
        self.bits += 1;
        if self.output.len() >= BUFFER_SIZE {
            self.push_output()?;
        }
        Ok(())
    }

    /// Flushes buffered bits, ending a wrapped stream with a line break. Flush MUST be called
    /// before the output is read or data may be left in the internal buffer.
    fn flush(&mut self) -> std::io::Result<()> {
        if self.line_width > 0 && self.column > 0 {
            self.output.push(b'\n');
            self.column = 0;
        }
        self.push_output()?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;
    use crate::bitstream::BitSink;

    #[test]
    fn put_bit_test() {
        let mut bw = BitWriter::new(Vec::new());
        [0, 1, 1, 0, 5].iter().for_each(|&b| bw.put_bit(b).unwrap());
        assert_eq!(bw.bits(), 5);
        assert_eq!(bw.into_inner().unwrap(), b"01101");
    }

    #[test]
    fn nothing_is_written_before_flush_test() {
        let mut out = Vec::new();
        {
            let mut bw = BitWriter::new(&mut out);
            bw.put_bit(1).unwrap();
        }
        assert!(out.is_empty());
    }

    #[test]
    fn line_width_test() {
        let mut bw = BitWriter::with_line_width(Vec::new(), 4);
        (0..10).for_each(|i| bw.put_bit(i % 2).unwrap());
        assert_eq!(bw.into_inner().unwrap(), b"0101\n0101\n01\n");
    }

    #[test]
    fn large_output_test() {
        let mut bw = BitWriter::new(Vec::new());
        (0..200_000).for_each(|_| bw.put_bit(1).unwrap());
        let out = bw.into_inner().unwrap();
        assert_eq!(out.len(), 200_000);
        assert!(out.iter().all(|&c| c == b'1'));
    }
}
