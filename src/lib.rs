//! pdfext: an extension layer for a PDFium-style engine.
//!
//! The workspace is split the way the layers depend on each other:
//!
//! - [`pdfext_traits`] - the engine-facing contracts (block writer, font name
//!   queries, annotation string attributes)
//! - [`pdfext_sink`] - the growable in-memory output sink
//! - [`pdfext_appearance`] - default-appearance (`DA`) string synthesis
//! - [`pdfext_engine`] - the lopdf-backed engine: documents, fonts,
//!   annotations, form-fill context and saving
//! - [`pdfext_core`] - handle tables and the process-wide instance behind the
//!   host entry points
//!
//! This crate re-exports the commonly used types and adds the [`stamp`]
//! workflow used by the command-line tool.

pub mod error;
pub mod stamp;

pub use error::StampError;
pub use stamp::{StampOptions, StampReport, stamp};

pub use pdfext_appearance::{
    AppearanceComponents, AppearanceError, AppearanceLimits, DefaultAppearance, RgbColor,
};
pub use pdfext_core::{
    CoreError, ErrorCode, Extension, ExtensionConfig, SaveFlags, initialize, last_error,
    with_extension,
};
pub use pdfext_engine::{EngineError, LibraryConfig, PdfDocument};
pub use pdfext_sink::{OutputSink, SinkError};
pub use pdfext_traits::{FileWrite, FontNameSource, StringAttributeSink};
