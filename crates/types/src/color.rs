use serde::Serialize;
use std::fmt;

/// Channels at or below this value are on the linear segment of the sRGB curve.
const SRGB_LINEAR_THRESHOLD: f64 = 0.03928;

/// An opaque 8-bit sRGB colour.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// The text colour that stays readable on top of a given background.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContrastColor {
    Black,
    White,
}

impl ContrastColor {
    pub fn rgb(self) -> Rgb {
        match self {
            ContrastColor::Black => Rgb::BLACK,
            ContrastColor::White => Rgb::WHITE,
        }
    }
}

/// Picks black text for light backgrounds and white text otherwise.
///
/// A luminance of exactly `0.5` counts as dark.
pub fn contrast_color(luminance: f64) -> ContrastColor {
    if luminance > 0.5 {
        ContrastColor::Black
    } else {
        ContrastColor::White
    }
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= SRGB_LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance in `[0.0, 1.0]`.
    pub fn relative_luminance(&self) -> f64 {
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    pub fn contrast_color(&self) -> ContrastColor {
        contrast_color(self.relative_luminance())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
