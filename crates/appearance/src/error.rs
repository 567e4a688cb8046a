use pdfext_traits::FontNameError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppearanceError {
    #[error("no annotation given")]
    MissingAnnotation,
    #[error("no font given")]
    MissingFont,
    #[error("font has neither a base name nor a family name")]
    FontNameUnavailable,
    #[error("font name needs {required} bytes, capacity is {capacity}")]
    FontNameTooLong { required: usize, capacity: usize },
    #[error("font size must be finite and at least 0.05, got {0}")]
    InvalidFontSize(f32),
    #[error("{channel} channel value {value} is outside 0..=255")]
    ColorOutOfRange { channel: char, value: u32 },
    #[error("appearance string needs {length} bytes, capacity is {capacity}")]
    AppearanceTooLong { length: usize, capacity: usize },
    #[error("wide appearance string needs {length} units, capacity is {capacity}")]
    WideStringTooLong { length: usize, capacity: usize },
    #[error("malformed appearance string: {0}")]
    Malformed(String),
}

impl From<FontNameError> for AppearanceError {
    fn from(err: FontNameError) -> Self {
        match err {
            FontNameError::TooLong { required, capacity } => {
                AppearanceError::FontNameTooLong { required, capacity }
            }
        }
    }
}
