use lopdf::ObjectId;
use thiserror::Error;

/// Errors reported by the document engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("library is not initialized")]
    NotInitialized,
    #[error("library is already initialized")]
    AlreadyInitialized,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("annotation index {index} out of range on page {page} ({count} annotations)")]
    AnnotationOutOfRange {
        page: usize,
        index: usize,
        count: usize,
    },
    #[error("object {0:?} is not a font")]
    NotAFont(ObjectId),
    #[error("object {0:?} is not an annotation")]
    NotAnAnnotation(ObjectId),
    #[error("'{0}' is not one of the standard 14 fonts")]
    UnknownStandardFont(String),
    #[error("unsupported save flags {0}")]
    UnsupportedSaveFlags(i32),
    #[error("unsupported PDF version {0}")]
    UnsupportedVersion(u8),
    #[error("unsupported form-fill info version {0}")]
    UnsupportedFormVersion(i32),
    #[error("Save failed: {0}")]
    Save(String),
}

impl From<lopdf::Error> for EngineError {
    fn from(err: lopdf::Error) -> Self {
        EngineError::Pdf(err.to_string())
    }
}
