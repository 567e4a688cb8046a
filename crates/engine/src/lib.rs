//! Document engine backed by `lopdf`.
//!
//! This crate plays the part of the rendering engine the extension layer talks
//! to: it owns the document object model, answers font name queries, exposes
//! the annotation string setter and serialises documents into a
//! [`FileWrite`](pdfext_traits::FileWrite) sink.
//!
//! - [`library`] - process-wide, init-once library configuration
//! - [`document`] - loaded documents, pages, fonts and annotations
//! - [`form`] - form-fill info and environment
//! - [`save`] - save flags and the sink adapter used by `save_as_copy`

mod annotation;
pub mod document;
mod error;
mod font;
pub mod form;
pub mod library;
pub mod save;

pub use annotation::PdfAnnotation;
pub use document::{PdfDocument, STANDARD_FONTS};
pub use error::EngineError;
pub use font::PdfFont;
pub use form::{FormFillEnvironment, FormFillInfo};
pub use library::{LibraryConfig, init_library, is_initialized, library_config};
pub use lopdf::ObjectId;
pub use save::SaveFlags;
