//! The write-sink callback interface the engine drives during export.

/// A byte sink the engine writes into while serialising a document.
///
/// The engine calls [`FileWrite::write_block`] zero or more times, in order and
/// synchronously, within a single export call. Implementations must not assume
/// anything about chunk sizes or the number of calls.
pub trait FileWrite {
    /// Appends `data` to the sink.
    ///
    /// Returns `true` when the block was accepted. A `false` return aborts the
    /// export that is driving the sink.
    fn write_block(&mut self, data: &[u8]) -> bool;
}

impl FileWrite for Vec<u8> {
    fn write_block(&mut self, data: &[u8]) -> bool {
        self.extend_from_slice(data);
        true
    }
}

impl<T: FileWrite + ?Sized> FileWrite for &mut T {
    fn write_block(&mut self, data: &[u8]) -> bool {
        (**self).write_block(data)
    }
}
