use crate::error::AppearanceError;
use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color as callers hand it across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from unsigned channel values, rejecting anything above 255.
    pub fn from_channels(r: u32, g: u32, b: u32) -> Result<Self, AppearanceError> {
        Ok(Self {
            r: channel('R', r)?,
            g: channel('G', g)?,
            b: channel('B', b)?,
        })
    }

    /// The channels mapped onto the unit interval.
    ///
    /// Division happens in `f32`, so 128 maps to 0.50196 and renders as `0.502`.
    pub fn normalized(&self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

fn channel(channel: char, value: u32) -> Result<u8, AppearanceError> {
    u8::try_from(value)
        .map_err(|_| AppearanceError::ColorOutOfRange { channel, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_in_range_are_accepted() {
        assert_eq!(
            RgbColor::from_channels(255, 0, 128).unwrap(),
            RgbColor::new(255, 0, 128)
        );
    }

    #[test]
    fn channel_above_255_is_rejected() {
        let err = RgbColor::from_channels(0, 256, 0).unwrap_err();
        assert_eq!(
            err,
            AppearanceError::ColorOutOfRange {
                channel: 'G',
                value: 256
            }
        );
    }

    #[test]
    fn normalization_endpoints() {
        let [r, g, b] = RgbColor::new(255, 0, 128).normalized();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.502).abs() < 1e-3);
    }
}
