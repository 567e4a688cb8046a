//! Font name queries using the engine's fixed-capacity buffer protocol.
//!
//! The engine fills a caller-provided buffer with a NUL-terminated name and
//! returns the number of bytes the name needs *including* the terminator.
//! A return of `0` means the name is unavailable. When the buffer is too small
//! the engine leaves it untouched and still reports the required length, so a
//! caller can detect the overflow instead of reading a truncated name.

use thiserror::Error;

/// Engine-side font metadata lookups.
pub trait FontNameSource {
    /// Writes the font's `BaseFont` name into `buffer`.
    ///
    /// Returns the required length including the trailing NUL, or `0`.
    fn base_font_name(&self, buffer: &mut [u8]) -> usize;

    /// Writes the font's family name into `buffer`.
    ///
    /// Returns the required length including the trailing NUL, or `0`.
    fn family_name(&self, buffer: &mut [u8]) -> usize;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontNameError {
    #[error("font name needs {required} bytes but the buffer holds {capacity}")]
    TooLong { required: usize, capacity: usize },
}

/// Runs one name query against a buffer of `capacity` bytes.
///
/// Returns `Ok(None)` when the engine reports the name as unavailable or empty,
/// and the name bytes without their terminator otherwise.
pub fn read_name<F>(query: F, capacity: usize) -> Result<Option<Vec<u8>>, FontNameError>
where
    F: FnOnce(&mut [u8]) -> usize,
{
    let mut buffer = vec![0u8; capacity];
    let required = query(&mut buffer);
    if required == 0 {
        return Ok(None);
    }
    if required > capacity {
        return Err(FontNameError::TooLong { required, capacity });
    }

    buffer.truncate(required);
    // The terminator is part of the reported length; stop at the first NUL in
    // case an engine reports a padded length.
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    buffer.truncate(end);

    if buffer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}
