//! Boundary errors and the numeric codes reported to the host.

use crate::handle::HandleKind;
use pdfext_appearance::AppearanceError;
use pdfext_engine::EngineError;
use pdfext_sink::SinkError;
use thiserror::Error;

/// The error type for every boundary operation.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("library is not initialized")]
    NotInitialized,
    #[error("invalid {kind} handle {raw:#010x}")]
    InvalidHandle { kind: HandleKind, raw: u32 },
    #[error("{kind} handle space exhausted")]
    HandleSpaceExhausted { kind: HandleKind },
    #[error("form-fill info is still used by {0} environment(s)")]
    InfoInUse(usize),
    #[error("document is still used by {0} form-fill environment(s)")]
    DocumentInUse(usize),
    #[error("extension state lock poisoned")]
    StatePoisoned,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("Appearance error: {0}")]
    Appearance(#[from] AppearanceError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Stable numeric error codes for hosts that only see integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    NotInitialized = 1,
    InvalidHandle = 2,
    /// A required handle was null.
    MissingArgument = 3,
    /// A value outside its domain (color channel, font size, flags, index).
    InvalidArgument = 4,
    /// A name or formatted string exceeded its fixed capacity.
    CapacityExceeded = 5,
    /// Copy-out request larger than the sink or the destination.
    OutOfBounds = 6,
    /// Close requested while dependants are still alive.
    ResourceInUse = 7,
    /// The font has no usable name.
    FontNameUnavailable = 8,
    /// The engine failed to parse, look up or serialise.
    Engine = 9,
    Config = 10,
    Internal = 11,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<&CoreError> for ErrorCode {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::NotInitialized => ErrorCode::NotInitialized,
            CoreError::InvalidHandle { .. } => ErrorCode::InvalidHandle,
            CoreError::HandleSpaceExhausted { .. } => ErrorCode::CapacityExceeded,
            CoreError::InfoInUse(_) | CoreError::DocumentInUse(_) => ErrorCode::ResourceInUse,
            CoreError::StatePoisoned => ErrorCode::Internal,
            CoreError::Config(_) | CoreError::Io(_) | CoreError::Json(_) => ErrorCode::Config,
            CoreError::Sink(_) => ErrorCode::OutOfBounds,
            CoreError::Appearance(err) => match err {
                AppearanceError::MissingAnnotation | AppearanceError::MissingFont => {
                    ErrorCode::MissingArgument
                }
                AppearanceError::FontNameUnavailable => ErrorCode::FontNameUnavailable,
                AppearanceError::FontNameTooLong { .. }
                | AppearanceError::AppearanceTooLong { .. }
                | AppearanceError::WideStringTooLong { .. } => ErrorCode::CapacityExceeded,
                AppearanceError::InvalidFontSize(_)
                | AppearanceError::ColorOutOfRange { .. }
                | AppearanceError::Malformed(_) => ErrorCode::InvalidArgument,
            },
            CoreError::Engine(err) => match err {
                EngineError::NotInitialized => ErrorCode::NotInitialized,
                EngineError::AlreadyInitialized | EngineError::Config(_) => ErrorCode::Config,
                EngineError::PageOutOfRange { .. }
                | EngineError::AnnotationOutOfRange { .. }
                | EngineError::UnknownStandardFont(_)
                | EngineError::UnsupportedSaveFlags(_)
                | EngineError::UnsupportedVersion(_)
                | EngineError::UnsupportedFormVersion(_) => ErrorCode::InvalidArgument,
                EngineError::NotAFont(_) | EngineError::NotAnAnnotation(_) => {
                    ErrorCode::InvalidHandle
                }
                EngineError::Pdf(_) | EngineError::Save(_) => ErrorCode::Engine,
            },
        }
    }
}
