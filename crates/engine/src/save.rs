use crate::error::EngineError;
use pdfext_traits::FileWrite;
use std::io;

/// Flags accepted by `save_as_copy`, numbered as the engine numbers them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveFlags {
    /// Write a complete document.
    #[default]
    Default,
    /// Explicitly request a complete (non-incremental) rewrite.
    NoIncremental,
}

impl SaveFlags {
    pub const INCREMENTAL: i32 = 1;
    pub const NO_INCREMENTAL: i32 = 2;
    pub const REMOVE_SECURITY: i32 = 3;

    /// Maps the engine's raw flag value. Incremental saves and security
    /// removal are not supported.
    pub fn from_raw(flags: i32) -> Result<Self, EngineError> {
        match flags {
            0 => Ok(SaveFlags::Default),
            Self::NO_INCREMENTAL => Ok(SaveFlags::NoIncremental),
            other => Err(EngineError::UnsupportedSaveFlags(other)),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            SaveFlags::Default => 0,
            SaveFlags::NoIncremental => Self::NO_INCREMENTAL,
        }
    }
}

/// Presents a [`FileWrite`] sink as an `io::Write` target for lopdf.
pub(crate) struct SinkWriter<'a> {
    sink: &'a mut dyn FileWrite,
    pub(crate) written: usize,
}

impl<'a> SinkWriter<'a> {
    pub(crate) fn new(sink: &'a mut dyn FileWrite) -> Self {
        Self { sink, written: 0 }
    }
}

impl io::Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.sink.write_block(buf) {
            return Err(io::Error::other("write sink rejected block"));
        }
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
