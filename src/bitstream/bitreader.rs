//! BitReader: reads a bit text stream for the huffcore decoder.
//!
//! Every '0' or '1' character is one bit. ASCII whitespace (line breaks included) is skipped, so
//! a stream may be wrapped or spaced for reading. Anything else ends the stream.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use log::{error, warn};

use super::BitSource;

const BUFFER_SIZE: usize = 64 * 1024;

/// Reads bits written as '0' / '1' characters.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    source: R,
    /// Set once the source is done (end of input, a foreign character, or a read error).
    done: bool,
    /// The read error that ended the stream, if any.
    error: Option<std::io::Error>,
    bits_read: usize,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            source,
            done: false,
            error: None,
            bits_read: 0,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> bool {
        // Only try to read more data when the buffer has been used up
        while !self.done && self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            match self.source.read(&mut self.buffer) {
                // If nothing came back from our read attempt, then we have no more data.
                Ok(0) => self.done = true,
                Ok(size) => {
                    // Adjust the buffer if we read less than the buffer size
                    self.buffer.truncate(size);
                    self.cursor = 0;
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    error!("Unable to read bit source: {}", e);
                    self.error = Some(e);
                    self.done = true;
                }
            }
        }
        !self.done
    }

    /// Number of bits handed out so far.
    pub fn bits_read(&self) -> usize {
        self.bits_read
    }

    /// Take the read error that ended the stream early, if there was one.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bits_read)
    }
}

impl<R: std::io::Read> BitSource for BitReader<R> {
    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    fn bit(&mut self) -> Option<usize> {
        while self.have_data() {
            let c = self.buffer[self.cursor];
            self.cursor += 1;
            match c {
                b'0' | b'1' => {
                    self.bits_read += 1;
                    return Some((c - b'0') as usize);
                }
                c if c.is_ascii_whitespace() => continue,
                c => {
                    warn!(
                        "Bit stream ends at unexpected character {:?} after {} bits",
                        c as char, self.bits_read
                    );
                    self.done = true;
                }
            }
        }
        None
    }
}
