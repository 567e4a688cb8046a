//! Boundary layer of the pdfext extension.
//!
//! Hosts on the far side of an ABI boundary only see integers, byte buffers and
//! opaque tokens. This crate keeps the typed objects on the Rust side
//! (output sinks, documents, fonts, annotations and form-fill state) in
//! [`Extension`] and hands out kind-tagged tokens for them.
//!
//! # Module Structure
//!
//! - [`handle`] - tagged tokens and the tables that own the objects they name
//! - [`extension`] - the typed operation behind every entry point
//! - [`global`] - the process-wide instance and last-error tracking
//! - [`config`] - JSON-loadable configuration
//!
//! # Example
//!
//! ```ignore
//! let mut ext = Extension::default();
//! let doc = ext.load_document(&pdf_bytes)?;
//! let font = ext.load_standard_font(doc, "Helvetica")?;
//! let annot = ext.annotation(doc, 0, 0)?;
//! ext.set_default_appearance(Some(annot), Some(font), 12.0, 255, 0, 128)?;
//!
//! let sink = ext.open_sink()?;
//! ext.save_as_copy(doc, sink, SaveFlags::Default)?;
//! let mut out = vec![0; ext.sink_size(sink)?];
//! ext.sink_copy_out(sink, &mut out, out.len())?;
//! ext.close_sink(sink)?;
//! ```

pub mod config;
pub mod error;
pub mod extension;
pub mod global;
pub mod handle;

pub use config::ExtensionConfig;
pub use error::{CoreError, ErrorCode};
pub use extension::Extension;
pub use global::{initialize, is_initialized, last_error, with_extension};
pub use handle::{
    AnnotationHandle, DocumentHandle, FontHandle, FormEnvHandle, FormInfoHandle, HandleKind,
    SinkHandle, Token, TypedHandle,
};
pub use pdfext_engine::SaveFlags;
