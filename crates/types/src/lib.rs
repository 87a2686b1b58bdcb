pub mod color;
pub mod font;
pub mod ids;
pub mod result;

pub use color::{ContrastColor, Rgb, contrast_color};
pub use font::{
    DEFAULT_FONT_FORMAT, DEFAULT_FONT_WEIGHT, DiscoveredFontAsset, FONT_FORMATS, FontFamilyRequest,
    FontStyle, FontVariant, font_extensions, format_for_extension,
};
pub use ids::{SessionId, SessionIdError};
pub use result::{DownloadFailure, PipelineResult};
