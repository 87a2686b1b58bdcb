//! Stylesheet font parsing: the family request carried by the stylesheet URL
//! and the font files referenced by the stylesheet body.

pub mod family;
pub mod stylesheet;

pub use family::parse_family_request;
pub use stylesheet::{
    base_directory, discover_font_assets, extract_font_family_names, extract_font_urls,
    resolve_font_url,
};
