//! Default appearance (`DA`) synthesis for free-text annotations.
//!
//! A free-text annotation renders its text with the font, size and color named
//! in its `DA` entry, e.g. `/Helvetica 12.0 Tf 1.000 0.000 0.502 rg`. This crate
//! builds that string from a font the engine knows about, checks it against
//! fixed capacities, widens it to UTF-16 and hands it to the engine's
//! annotation string setter.
//!
//! # Example
//!
//! ```ignore
//! let ok = set_default_appearance(
//!     Some(&mut annotation),
//!     Some(&font),
//!     12.0,
//!     255, 0, 128,
//!     &AppearanceLimits::default(),
//! )?;
//! ```

mod color;
mod error;
mod name;
mod parse;
mod wide;

pub use color::RgbColor;
pub use error::AppearanceError;
pub use name::{escape_name, unescape_name};
pub use parse::{AppearanceComponents, ColorOperands};
pub use wide::WideString;

use pdfext_traits::{DEFAULT_APPEARANCE_KEY, FontNameSource, StringAttributeSink, read_name};
use serde::{Deserialize, Serialize};

/// Capacities the synthesizer enforces. Both count a trailing NUL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceLimits {
    /// Buffer size offered to the engine's font name queries.
    pub font_name_capacity: usize,
    /// Maximum size of the formatted string, and of its wide form in code units.
    pub appearance_capacity: usize,
}

impl Default for AppearanceLimits {
    fn default() -> Self {
        Self {
            font_name_capacity: 256,
            appearance_capacity: 512,
        }
    }
}

/// A validated, formatted default appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultAppearance {
    font_name: Vec<u8>,
    font_size: f32,
    color: RgbColor,
    text: String,
    limits: AppearanceLimits,
}

impl DefaultAppearance {
    /// Formats a default appearance from raw font name bytes.
    pub fn new(
        font_name: impl Into<Vec<u8>>,
        font_size: f32,
        color: RgbColor,
        limits: &AppearanceLimits,
    ) -> Result<Self, AppearanceError> {
        let font_name = font_name.into();
        if font_name.is_empty() {
            return Err(AppearanceError::FontNameUnavailable);
        }
        if font_name.len() + 1 > limits.font_name_capacity {
            return Err(AppearanceError::FontNameTooLong {
                required: font_name.len() + 1,
                capacity: limits.font_name_capacity,
            });
        }
        // A `0.0 Tf` operand means auto-size, so sizes that round to it are refused.
        let size = format!("{font_size:.1}");
        if !font_size.is_finite() || font_size <= 0.0 || size == "0.0" {
            return Err(AppearanceError::InvalidFontSize(font_size));
        }

        let [r, g, b] = color.normalized();
        let text = format!(
            "/{} {} Tf {:.3} {:.3} {:.3} rg",
            escape_name(&font_name),
            size,
            r,
            g,
            b
        );
        if text.len() + 1 > limits.appearance_capacity {
            return Err(AppearanceError::AppearanceTooLong {
                length: text.len() + 1,
                capacity: limits.appearance_capacity,
            });
        }

        Ok(Self {
            font_name,
            font_size,
            color,
            text,
            limits: *limits,
        })
    }

    /// Queries the font's base name, falling back to its family name, and
    /// formats the appearance from it.
    pub fn from_font<F>(
        font: &F,
        font_size: f32,
        color: RgbColor,
        limits: &AppearanceLimits,
    ) -> Result<Self, AppearanceError>
    where
        F: FontNameSource + ?Sized,
    {
        let capacity = limits.font_name_capacity;
        let name = match read_name(|buf| font.base_font_name(buf), capacity)? {
            Some(name) => name,
            None => read_name(|buf| font.family_name(buf), capacity)?
                .ok_or(AppearanceError::FontNameUnavailable)?,
        };
        Self::new(name, font_size, color, limits)
    }

    /// The formatted appearance string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn font_name(&self) -> &[u8] {
        &self.font_name
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> RgbColor {
        self.color
    }

    /// The NUL-terminated UTF-16 form of [`as_str`](Self::as_str).
    pub fn to_wide(&self) -> Result<WideString, AppearanceError> {
        WideString::encode(&self.text, self.limits.appearance_capacity)
    }

    /// Installs the appearance as the annotation's `DA` entry.
    ///
    /// Returns the engine setter's result unchanged.
    pub fn apply<A>(&self, annotation: &mut A) -> Result<bool, AppearanceError>
    where
        A: StringAttributeSink + ?Sized,
    {
        let wide = self.to_wide()?;
        let accepted = annotation.set_string_value(DEFAULT_APPEARANCE_KEY, wide.as_units());
        if accepted {
            log::debug!("installed default appearance '{}'", self.text);
        } else {
            log::warn!("engine rejected default appearance '{}'", self.text);
        }
        Ok(accepted)
    }
}

/// Sets the default appearance of `annotation` from `font`, a size and an RGB color.
///
/// Validation failures (absent handles, no usable font name, out-of-range
/// values, capacity overflow) are errors and leave the annotation untouched.
/// Once validation passes the engine setter's boolean is returned as is.
pub fn set_default_appearance<A, F>(
    annotation: Option<&mut A>,
    font: Option<&F>,
    font_size: f32,
    r: u32,
    g: u32,
    b: u32,
    limits: &AppearanceLimits,
) -> Result<bool, AppearanceError>
where
    A: StringAttributeSink + ?Sized,
    F: FontNameSource + ?Sized,
{
    let annotation = annotation.ok_or(AppearanceError::MissingAnnotation)?;
    let font = font.ok_or(AppearanceError::MissingFont)?;
    let color = RgbColor::from_channels(r, g, b)?;
    DefaultAppearance::from_font(font, font_size, color, limits)?.apply(annotation)
}
