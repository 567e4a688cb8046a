//! Host-facing entry points.
//!
//! Every function forwards to the process-wide [`pdfext_core::Extension`].
//! Failures never throw: token-returning calls yield `0`, counts yield `-1`,
//! the save call yields a negative status and the appearance setter yields
//! `false`. The reason is available from [`get_last_error`].

use crate::error::ExtError;
use pdfext_core::{
    AnnotationHandle, CoreError, DocumentHandle, ExtensionConfig, FontHandle, FormEnvHandle,
    FormInfoHandle, SaveFlags, SinkHandle, TypedHandle, with_extension,
};
use wasm_bindgen::prelude::*;

/// Status returned by the save calls on failure.
pub const SAVE_FAILED: i32 = -1;

fn token<H: TypedHandle>(result: Result<H, CoreError>) -> u32 {
    result.map_or(0, |handle| handle.raw())
}

fn count(result: Result<usize, CoreError>) -> i32 {
    result.ok().and_then(|n| i32::try_from(n).ok()).unwrap_or(-1)
}

fn status(result: Result<usize, CoreError>) -> i32 {
    if result.is_ok() { 0 } else { SAVE_FAILED }
}

// --- Library ---------------------------------------------------------------

/// Initialises the library with the default configuration. Later calls are
/// ignored.
#[wasm_bindgen(js_name = PDFiumExt_Init)]
pub fn init() {
    if pdfext_core::is_initialized() {
        log::debug!("extension already initialised; ignoring repeated init");
        return;
    }
    if let Err(err) = pdfext_core::initialize(ExtensionConfig::default()) {
        log::warn!("extension initialisation failed: {err}");
    }
}

/// Initialises the library from a configuration object such as
/// `{ version: 3, appearance: { appearance_capacity: 512 } }`.
#[wasm_bindgen(js_name = PDFiumExt_InitWithConfig)]
pub fn init_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: ExtensionConfig = serde_wasm_bindgen::from_value(config).map_err(ExtError::from)?;
    pdfext_core::initialize(config).map_err(ExtError::from)?;
    Ok(())
}

/// Numeric code of the most recent call's outcome (0 on success).
#[wasm_bindgen(js_name = PDFiumExt_GetLastError)]
pub fn get_last_error() -> i32 {
    pdfext_core::last_error().as_i32()
}

// --- Output sink -----------------------------------------------------------

#[wasm_bindgen(js_name = PDFiumExt_OpenFileWriter)]
pub fn open_file_writer() -> u32 {
    token(with_extension(|ext| ext.open_sink()))
}

#[wasm_bindgen(js_name = PDFiumExt_GetFileWriterSize)]
pub fn get_file_writer_size(writer: u32) -> i32 {
    count(with_extension(|ext| ext.sink_size(SinkHandle::from_raw(writer))))
}

/// Copies the first `size` bytes of the sink into `buffer`.
#[wasm_bindgen(js_name = PDFiumExt_GetFileWriterData)]
pub fn get_file_writer_data(writer: u32, buffer: &mut [u8], size: usize) -> i32 {
    count(with_extension(|ext| {
        ext.sink_copy_out(SinkHandle::from_raw(writer), buffer, size)
    }))
}

#[wasm_bindgen(js_name = PDFiumExt_CloseFileWriter)]
pub fn close_file_writer(writer: u32) {
    let _ = with_extension(|ext| ext.close_sink(SinkHandle::from_raw(writer)));
}

// --- Documents -------------------------------------------------------------

#[wasm_bindgen(js_name = PDFiumExt_LoadMemDocument)]
pub fn load_mem_document(bytes: &[u8]) -> u32 {
    token(with_extension(|ext| ext.load_document(bytes)))
}

#[wasm_bindgen(js_name = PDFiumExt_CloseDocument)]
pub fn close_document(document: u32) {
    let _ = with_extension(|ext| ext.close_document(DocumentHandle::from_raw(document)));
}

#[wasm_bindgen(js_name = PDFiumExt_GetPageCount)]
pub fn get_page_count(document: u32) -> i32 {
    count(with_extension(|ext| ext.page_count(DocumentHandle::from_raw(document))))
}

/// Writes the document into the sink. Returns 0 on success and a negative
/// status on failure.
#[wasm_bindgen(js_name = PDFiumExt_SaveAsCopy)]
pub fn save_as_copy(document: u32, writer: u32) -> i32 {
    status(with_extension(|ext| {
        ext.save_as_copy(
            DocumentHandle::from_raw(document),
            SinkHandle::from_raw(writer),
            SaveFlags::Default,
        )
    }))
}

/// Like [`save_as_copy`] with explicit engine save flags (0 or 2).
#[wasm_bindgen(js_name = PDFiumExt_SaveAsCopyWithFlags)]
pub fn save_as_copy_with_flags(document: u32, writer: u32, flags: i32) -> i32 {
    status(with_extension(|ext| {
        let flags = SaveFlags::from_raw(flags)?;
        ext.save_as_copy(
            DocumentHandle::from_raw(document),
            SinkHandle::from_raw(writer),
            flags,
        )
    }))
}

// --- Fonts and annotations -------------------------------------------------

#[wasm_bindgen(js_name = PDFiumExt_LoadStandardFont)]
pub fn load_standard_font(document: u32, name: &str) -> u32 {
    token(with_extension(|ext| {
        ext.load_standard_font(DocumentHandle::from_raw(document), name)
    }))
}

#[wasm_bindgen(js_name = PDFiumExt_GetAnnotCount)]
pub fn get_annot_count(document: u32, page: usize) -> i32 {
    count(with_extension(|ext| {
        ext.annotation_count(DocumentHandle::from_raw(document), page)
    }))
}

#[wasm_bindgen(js_name = PDFiumExt_GetAnnot)]
pub fn get_annot(document: u32, page: usize, index: usize) -> u32 {
    token(with_extension(|ext| {
        ext.annotation(DocumentHandle::from_raw(document), page, index)
    }))
}

#[wasm_bindgen(js_name = PDFiumExt_CreateFreeTextAnnot)]
pub fn create_free_text_annot(
    document: u32,
    page: usize,
    left: f32,
    bottom: f32,
    right: f32,
    top: f32,
) -> u32 {
    let rect = [left, bottom, right, top];
    token(with_extension(|ext| {
        ext.create_free_text_annotation(DocumentHandle::from_raw(document), page, rect)
    }))
}

/// Reads a text attribute such as `DA` back from an annotation.
#[wasm_bindgen(js_name = PDFiumExt_GetAnnotStringValue)]
pub fn get_annot_string_value(annot: u32, key: &str) -> Option<String> {
    with_extension(|ext| ext.annotation_string_value(AnnotationHandle::from_raw(annot), key))
        .ok()
        .flatten()
}

/// Sets the annotation's default appearance (`DA`) from a font, a size and
/// an RGB color with 0..=255 channels.
#[wasm_bindgen(js_name = EPDFAnnot_SetDefaultAppearanceWithFont)]
pub fn set_default_appearance_with_font(
    annot: u32,
    font: u32,
    font_size: f32,
    r: u32,
    g: u32,
    b: u32,
) -> bool {
    with_extension(|ext| {
        ext.set_default_appearance(
            AnnotationHandle::non_null(annot),
            FontHandle::non_null(font),
            font_size,
            r,
            g,
            b,
        )
    })
    .unwrap_or(false)
}

// --- Form fill -------------------------------------------------------------

#[wasm_bindgen(js_name = PDFiumExt_OpenFormFillInfo)]
pub fn open_form_fill_info() -> u32 {
    token(with_extension(|ext| ext.open_form_fill_info()))
}

#[wasm_bindgen(js_name = PDFiumExt_CloseFormFillInfo)]
pub fn close_form_fill_info(info: u32) {
    let _ = with_extension(|ext| ext.close_form_fill_info(FormInfoHandle::from_raw(info)));
}

#[wasm_bindgen(js_name = PDFiumExt_InitFormFillEnvironment)]
pub fn init_form_fill_environment(document: u32, info: u32) -> u32 {
    token(with_extension(|ext| {
        ext.init_form_fill_environment(
            DocumentHandle::from_raw(document),
            FormInfoHandle::from_raw(info),
        )
    }))
}

#[wasm_bindgen(js_name = PDFiumExt_ExitFormFillEnvironment)]
pub fn exit_form_fill_environment(env: u32) {
    let _ = with_extension(|ext| ext.exit_form_fill_environment(FormEnvHandle::from_raw(env)));
}
