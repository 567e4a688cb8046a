//! WebAssembly entry points of the pdfext extension layer.
//!
//! The exports keep the names a PDFium-based host already links against
//! (`PDFiumExt_*`, `EPDFAnnot_*`) and speak only in integers, booleans, byte
//! buffers and opaque `u32` tokens. All state lives in the process-wide
//! instance of [`pdfext_core`]; a token of `0` is the null handle.
//!
//! # Module Structure
//!
//! - [`exports`] - the host-facing functions
//! - [`error`] - error codes and JavaScript error conversion
//!
//! # Example
//!
//! ```javascript
//! import init, * as ext from '@pdfext/wasm';
//!
//! await init();
//! ext.PDFiumExt_Init();
//!
//! const doc = ext.PDFiumExt_LoadMemDocument(bytes);
//! const font = ext.PDFiumExt_LoadStandardFont(doc, "Helvetica");
//! const annot = ext.PDFiumExt_GetAnnot(doc, 0, 0);
//! ext.EPDFAnnot_SetDefaultAppearanceWithFont(annot, font, 12, 255, 0, 128);
//!
//! const writer = ext.PDFiumExt_OpenFileWriter();
//! if (ext.PDFiumExt_SaveAsCopy(doc, writer) === 0) {
//!   const out = new Uint8Array(ext.PDFiumExt_GetFileWriterSize(writer));
//!   ext.PDFiumExt_GetFileWriterData(writer, out, out.length);
//! }
//! ext.PDFiumExt_CloseFileWriter(writer);
//! ```

pub mod error;
pub mod exports;

pub use error::ExtError;
pub use exports::*;

use wasm_bindgen::prelude::*;

/// Installs the panic hook. Runs automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Get the version of the pdfext-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
