//! Placeholder avatars: initials on a random background, as a PNG data URI,
//! plus the `<img>` markup that falls back to one.

pub mod glyphs;
pub mod synth;
pub mod text;
pub mod widget;

pub use synth::{
    AvatarError, AvatarSpec, DEFAULT_AVATAR_SIZE, MAX_AVATAR_PIXELS, contrast_color, font_size,
    luminance, synthesize, synthesize_with_color,
};
pub use text::{resolve_from_source, resolve_initials};
pub use widget::{AvatarAttributes, AvatarWidget};
