//! Error handling for the WASM boundary.
//!
//! Most exports report failure through sentinel values and leave the details
//! to `PDFiumExt_GetLastError`. The few that return `Result` convert through
//! [`ExtError`] into a JavaScript `Error` carrying a `code` property.

use pdfext_core::{CoreError, ErrorCode};
use wasm_bindgen::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExtError {
    code: ErrorCode,
    message: String,
}

impl ExtError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CoreError> for ExtError {
    fn from(err: CoreError) -> Self {
        Self::new(ErrorCode::from(&err), err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for ExtError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(ErrorCode::Config, err.to_string())
    }
}

/// Upper-snake name of a code, as exposed on `error.code`.
pub fn code_name(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::Success => "SUCCESS",
        ErrorCode::NotInitialized => "NOT_INITIALIZED",
        ErrorCode::InvalidHandle => "INVALID_HANDLE",
        ErrorCode::MissingArgument => "MISSING_ARGUMENT",
        ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
        ErrorCode::CapacityExceeded => "CAPACITY_EXCEEDED",
        ErrorCode::OutOfBounds => "OUT_OF_BOUNDS",
        ErrorCode::ResourceInUse => "RESOURCE_IN_USE",
        ErrorCode::FontNameUnavailable => "FONT_NAME_UNAVAILABLE",
        ErrorCode::Engine => "ENGINE_ERROR",
        ErrorCode::Config => "CONFIG_ERROR",
        ErrorCode::Internal => "INTERNAL_ERROR",
    }
}

impl From<ExtError> for JsValue {
    fn from(err: ExtError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        let code = JsValue::from_str(code_name(err.code));
        js_sys::Reflect::set(&js_error, &"code".into(), &code).ok();
        js_error.into()
    }
}
