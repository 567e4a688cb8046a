//! Output capture for engine exports.
//!
//! The engine serialises a document by pushing blocks into an [`OutputSink`].
//! A consumer on the far side of an ABI boundary cannot read the sink's
//! internals, so retrieval is two-phase: ask for [`OutputSink::size`], allocate
//! that much, then request a bounded [`OutputSink::copy_out`].

mod error;

pub use error::SinkError;

use pdfext_traits::FileWrite;
use std::io;

/// An append-only byte buffer filled by the engine.
///
/// The buffer never shrinks while the sink is alive and keeps every block in
/// the order it was written. Dropping the sink releases the buffer.
#[derive(Debug, Default, Clone)]
pub struct OutputSink {
    data: Vec<u8>,
    blocks: usize,
}

impl OutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of bytes captured so far.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Number of write calls the sink has received.
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies the first `requested` bytes into `destination`.
    ///
    /// A `requested` smaller than [`size`](Self::size) yields a prefix of the
    /// captured output.
    ///
    /// # Errors
    ///
    /// - [`SinkError::RequestExceedsSize`] if `requested` is larger than the
    ///   number of captured bytes.
    /// - [`SinkError::DestinationTooSmall`] if `destination` cannot hold
    ///   `requested` bytes.
    pub fn copy_out(&self, destination: &mut [u8], requested: usize) -> Result<usize, SinkError> {
        if requested > self.data.len() {
            return Err(SinkError::RequestExceedsSize {
                requested,
                available: self.data.len(),
            });
        }
        if requested > destination.len() {
            return Err(SinkError::DestinationTooSmall {
                requested,
                capacity: destination.len(),
            });
        }
        destination[..requested].copy_from_slice(&self.data[..requested]);
        Ok(requested)
    }

    /// Borrow the captured bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the sink, returning the captured bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl FileWrite for OutputSink {
    fn write_block(&mut self, data: &[u8]) -> bool {
        self.data.extend_from_slice(data);
        self.blocks += 1;
        log::trace!(
            "sink accepted block of {} bytes (total {})",
            data.len(),
            self.data.len()
        );
        true
    }
}

impl io::Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_block(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
