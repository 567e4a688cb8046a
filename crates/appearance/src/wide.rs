use crate::error::AppearanceError;
use std::fmt;

/// A NUL-terminated UTF-16 string, the form the engine's attribute setter takes.
#[derive(Clone, PartialEq, Eq)]
pub struct WideString {
    units: Vec<u16>,
}

impl WideString {
    /// Encodes `text` as UTF-16 and appends the terminator.
    ///
    /// `capacity` counts code units including the terminator.
    pub fn encode(text: &str, capacity: usize) -> Result<Self, AppearanceError> {
        let units: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        if units.len() > capacity {
            return Err(AppearanceError::WideStringTooLong {
                length: units.len(),
                capacity,
            });
        }
        Ok(Self { units })
    }

    /// The code units, terminator included.
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// Number of code units excluding the terminator.
    pub fn len(&self) -> usize {
        self.units.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes a NUL-terminated (or unterminated) UTF-16 slice.
    pub fn decode(units: &[u16]) -> Option<String> {
        let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
        String::from_utf16(&units[..end]).ok()
    }
}

impl fmt::Debug for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = String::from_utf16_lossy(&self.units[..self.len()]);
        f.debug_tuple("WideString").field(&text).finish()
    }
}
