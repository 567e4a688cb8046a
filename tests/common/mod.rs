pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use pdfext::{Extension, SaveFlags};
use pdfext_core::DocumentHandle;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a saved PDF with helper methods
pub struct SavedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl SavedPdf {
    /// Create a SavedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// The version from the `%PDF-x.y` header line.
    pub fn header_version(&self) -> Option<&str> {
        let line = self.bytes.split(|&b| b == b'\n' || b == b'\r').next()?;
        std::str::from_utf8(line).ok()?.strip_prefix("%PDF-")
    }
}

/// Saves `doc` through a fresh sink, drains it, and closes the sink.
pub fn save_via_sink(
    ext: &mut Extension,
    doc: DocumentHandle,
) -> Result<SavedPdf, Box<dyn std::error::Error>> {
    let sink = ext.open_sink()?;
    let written = ext.save_as_copy(doc, sink, SaveFlags::Default)?;
    let size = ext.sink_size(sink)?;
    assert_eq!(size, written, "sink size must match the bytes the engine wrote");

    let mut bytes = vec![0u8; size];
    ext.sink_copy_out(sink, &mut bytes, size)?;
    ext.close_sink(sink)?;
    SavedPdf::from_bytes(bytes)
}
