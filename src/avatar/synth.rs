// src/avatar/synth.rs
use super::glyphs::{self, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::text::resolve_initials;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fonthunter_types::{ContrastColor, Rgb};
use image::{ImageFormat, RgbImage};
use log::{debug, warn};
use rand::Rng;
use std::io::Cursor;
use thiserror::Error;

pub use fonthunter_types::contrast_color;

/// Default edge length of a generated avatar.
pub const DEFAULT_AVATAR_SIZE: u32 = 48;

/// Largest canvas, in pixels, an avatar may be rendered on.
pub const MAX_AVATAR_PIXELS: u64 = 4096 * 4096;

#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("Avatar canvas must not be empty, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Avatar canvas {width}x{height} exceeds {max} pixels")]
    CanvasTooLarge { width: u32, height: u32, max: u64 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// What to draw: the text to take initials from and the canvas size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSpec {
    pub text: String,
    pub width: u32,
    pub height: u32,
}

impl AvatarSpec {
    pub fn new(text: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            text: text.into(),
            width,
            height,
        }
    }

    /// Renders with a random background; see [`synthesize`].
    pub fn synthesize(&self) -> String {
        synthesize(&self.text, self.width, self.height)
    }
}

/// WCAG relative luminance of `rgb`.
pub fn luminance(rgb: Rgb) -> f64 {
    rgb.relative_luminance()
}

/// Nominal font size for `chars` characters on a `width` x `height` canvas:
/// half the shorter side, shrunk by one per character beyond two.
pub fn font_size(width: u32, height: u32, chars: usize) -> u32 {
    let base = i64::from(width.min(height) / 2);
    let size = base - (chars as i64 - 2);
    size.clamp(1, i64::from(u32::MAX)) as u32
}

pub fn random_background() -> Rgb {
    let mut rng = rand::rng();
    Rgb::new(rng.random(), rng.random(), rng.random())
}

/// Draws the initials of `text` centred on a `background` canvas, in black or
/// white depending on which reads better on that background.
pub fn render(text: &str, width: u32, height: u32, background: Rgb) -> Result<RgbImage, AvatarError> {
    if width == 0 || height == 0 {
        return Err(AvatarError::EmptyCanvas { width, height });
    }
    if u64::from(width) * u64::from(height) > MAX_AVATAR_PIXELS {
        return Err(AvatarError::CanvasTooLarge {
            width,
            height,
            max: MAX_AVATAR_PIXELS,
        });
    }

    let initials = resolve_initials(text);
    let chars: Vec<char> = initials.chars().collect();
    let ink: ContrastColor = contrast_color(luminance(background));
    let ink = ink.rgb();

    let scale = glyphs::scale_for(font_size(width, height, chars.len()), width, chars.len());
    let (text_width, text_height) = glyphs::text_extent(chars.len(), scale);
    let origin_x = (i64::from(width) - i64::from(text_width)) / 2;
    let origin_y = (i64::from(height) - i64::from(text_height)) / 2;
    debug!(
        "Rendering '{}' at scale {} on {}x{} ({})",
        initials, scale, width, height, background
    );

    let mut canvas = RgbImage::from_pixel(
        width,
        height,
        image::Rgb([background.r, background.g, background.b]),
    );
    for (index, c) in chars.iter().enumerate() {
        let glyph_x = origin_x + i64::from(GLYPH_ADVANCE * scale) * index as i64;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !glyphs::is_set(*c, col, row) {
                    continue;
                }
                let cell_x = glyph_x + i64::from(col * scale);
                let cell_y = origin_y + i64::from(row * scale);
                fill_cell(&mut canvas, cell_x, cell_y, scale, ink);
            }
        }
    }
    Ok(canvas)
}

fn fill_cell(canvas: &mut RgbImage, x: i64, y: i64, scale: u32, color: Rgb) {
    let (width, height) = canvas.dimensions();
    for dy in 0..i64::from(scale) {
        for dx in 0..i64::from(scale) {
            let (px, py) = (x + dx, y + dy);
            if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                continue;
            }
            canvas.put_pixel(px as u32, py as u32, image::Rgb([color.r, color.g, color.b]));
        }
    }
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, AvatarError> {
    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);
    image.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(buf)
}

pub fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Deterministic core of [`synthesize`]: same inputs, same data URI.
pub fn synthesize_with_color(
    text: &str,
    width: u32,
    height: u32,
    background: Rgb,
) -> Result<String, AvatarError> {
    let image = render(text, width, height, background)?;
    let png = encode_png(&image)?;
    Ok(to_data_uri(&png))
}

/// A PNG data URI showing the initials of `text` on a random background.
///
/// Returns an empty string when the avatar cannot be produced.
pub fn synthesize(text: &str, width: u32, height: u32) -> String {
    match synthesize_with_color(text, width, height, random_background()) {
        Ok(uri) => uri,
        Err(e) => {
            warn!("Avatar for '{}' could not be generated: {}", text, e);
            String::new()
        }
    }
}
