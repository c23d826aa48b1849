//! The bitstream module holds the bit level contracts the codec talks through.
//!
//! The decoder pulls bits from a [`BitSource`] and the encoder pushes them into a [`BitSink`].
//! Neither cares where the bits live.
//!
//! The reader and writer here carry bits as text, one ASCII '0' or '1' per bit. Packing bits into
//! bytes is left to whatever sits around the codec; text keeps a stream easy to inspect and to
//! write by hand in tests.
//!
pub mod bitreader;
pub mod bitwriter;

/// Anything the decoder can pull bits from.
pub trait BitSource {
    /// Return the next bit (1 or 0), or None when there are no more.
    fn bit(&mut self) -> Option<usize>;
}

/// Anything the encoder can push bits into.
pub trait BitSink {
    /// Put one bit on the stream. Zero is 0, anything else is 1.
    fn put_bit(&mut self, bit: usize) -> std::io::Result<()>;

    /// Push out anything still buffered.
    fn flush(&mut self) -> std::io::Result<()>;
}
