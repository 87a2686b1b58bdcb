//! Font metadata carried through a font hunting run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight used whenever a request or stylesheet does not name one.
pub const DEFAULT_FONT_WEIGHT: &str = "400";

/// `format()` token used for extensions missing from [`FONT_FORMATS`].
pub const DEFAULT_FONT_FORMAT: &str = "truetype";

/// Font file extensions and the CSS `format()` token each one maps to.
pub const FONT_FORMATS: &[(&str, &str)] = &[
    ("ttf", "truetype"),
    ("otf", "opentype"),
    ("woff", "woff"),
    ("woff2", "woff2"),
    ("eot", "embedded-opentype"),
    ("svg", "svg"),
    ("pfb", "postscript"),
    ("pfm", "postscript"),
];

/// Looks up the `format()` token for a file extension, ignoring case.
pub fn format_for_extension(extension: &str) -> &'static str {
    FONT_FORMATS
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, format)| *format)
        .unwrap_or(DEFAULT_FONT_FORMAT)
}

/// All recognised font file extensions, in table order.
pub fn font_extensions() -> impl Iterator<Item = &'static str> {
    FONT_FORMATS.iter().map(|(ext, _)| *ext)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontStyle::Normal => f.write_str("normal"),
            FontStyle::Italic => f.write_str("italic"),
        }
    }
}

/// One rendering of a family: a weight token plus a style.
///
/// The weight stays textual because the query convention allows arbitrary
/// tokens and they are written back into the stylesheet verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontVariant {
    pub weight: String,
    pub style: FontStyle,
}

impl Default for FontVariant {
    fn default() -> Self {
        Self {
            weight: DEFAULT_FONT_WEIGHT.to_string(),
            style: FontStyle::Normal,
        }
    }
}

impl FontVariant {
    pub fn new(weight: impl Into<String>, style: FontStyle) -> Self {
        Self {
            weight: weight.into(),
            style,
        }
    }

    /// Parses one variant token such as `700`, `400i` or `i`.
    ///
    /// A trailing `i` marks italic; an empty weight falls back to `400`.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        let (weight, style) = if token.ends_with('i') {
            (token.trim_end_matches('i'), FontStyle::Italic)
        } else {
            (token, FontStyle::Normal)
        };
        let weight = if weight.is_empty() {
            DEFAULT_FONT_WEIGHT
        } else {
            weight
        };
        Self::new(weight, style)
    }
}

/// The families and variants a caller asked for, in request order.
///
/// Built once from the stylesheet URL and never mutated afterwards. A family
/// named more than once keeps its first position and accumulates variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontFamilyRequest {
    families: Vec<(String, Vec<FontVariant>)>,
}

impl FontFamilyRequest {
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Number of distinct families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|(name, _)| name.as_str())
    }

    pub fn variants(&self, family: &str) -> Option<&[FontVariant]> {
        self.families
            .iter()
            .find(|(name, _)| name == family)
            .map(|(_, variants)| variants.as_slice())
    }

    /// Picks the family and variant for the `index`-th font, cycling through
    /// families and then through that family's variants.
    pub fn cyclic(&self, index: usize) -> Option<(&str, FontVariant)> {
        if self.families.is_empty() {
            return None;
        }
        let (name, variants) = &self.families[index % self.families.len()];
        let variant = if variants.is_empty() {
            FontVariant::default()
        } else {
            variants[index % variants.len()].clone()
        };
        Some((name.as_str(), variant))
    }
}

impl FromIterator<(String, FontVariant)> for FontFamilyRequest {
    fn from_iter<I: IntoIterator<Item = (String, FontVariant)>>(iter: I) -> Self {
        let mut families: Vec<(String, Vec<FontVariant>)> = Vec::new();
        for (name, variant) in iter {
            match families.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, variants)) => variants.push(variant),
                None => families.push((name, vec![variant])),
            }
        }
        Self { families }
    }
}

/// A font file referenced by a fetched stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFontAsset {
    /// Absolute URL the font is fetched from.
    pub source_url: String,
    /// Lowercased extension of the URL path.
    pub extension: String,
    /// Last path segment of the URL, used as the on-disk file name.
    pub local_file_name: String,
}

impl DiscoveredFontAsset {
    /// Derives the file name and extension from the URL path.
    ///
    /// Returns `None` when the path has no final segment to name a file after.
    pub fn from_url(url: &str) -> Option<Self> {
        let without_tail = url.split(['?', '#']).next().unwrap_or(url);
        let path = match without_tail.find("://") {
            Some(scheme_end) => {
                let after_scheme = &without_tail[scheme_end + 3..];
                after_scheme.find('/').map(|slash| &after_scheme[slash..])?
            }
            None => without_tail,
        };
        let file_name = path.rsplit('/').next().unwrap_or_default();
        if file_name.is_empty() {
            return None;
        }
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Some(Self {
            source_url: url.to_string(),
            extension,
            local_file_name: file_name.to_string(),
        })
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        match self.local_file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.local_file_name,
        }
    }

    pub fn format(&self) -> &'static str {
        format_for_extension(&self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lookup() {
        assert_eq!(format_for_extension("woff2"), "woff2");
        assert_eq!(format_for_extension("EOT"), "embedded-opentype");
        assert_eq!(format_for_extension("pfm"), "postscript");
        assert_eq!(format_for_extension("xyz"), DEFAULT_FONT_FORMAT);
    }

    #[test]
    fn test_variant_from_token() {
        assert_eq!(FontVariant::from_token("700"), FontVariant::new("700", FontStyle::Normal));
        assert_eq!(FontVariant::from_token("400i"), FontVariant::new("400", FontStyle::Italic));
        assert_eq!(FontVariant::from_token("i"), FontVariant::new("400", FontStyle::Italic));
        assert_eq!(FontVariant::from_token(""), FontVariant::default());
    }

    #[test]
    fn test_request_accumulates_repeated_families() {
        let request: FontFamilyRequest = vec![
            ("Roboto".to_string(), FontVariant::from_token("400")),
            ("Lato".to_string(), FontVariant::from_token("300")),
            ("Roboto".to_string(), FontVariant::from_token("700i")),
        ]
        .into_iter()
        .collect();

        assert_eq!(request.len(), 2);
        assert_eq!(request.family_names().collect::<Vec<_>>(), vec!["Roboto", "Lato"]);
        assert_eq!(request.variants("Roboto").map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_cyclic_selection() {
        let request: FontFamilyRequest = vec![
            ("A".to_string(), FontVariant::from_token("100")),
            ("A".to_string(), FontVariant::from_token("200")),
            ("A".to_string(), FontVariant::from_token("300")),
            ("B".to_string(), FontVariant::from_token("900i")),
        ]
        .into_iter()
        .collect();

        assert_eq!(request.cyclic(0), Some(("A", FontVariant::new("100", FontStyle::Normal))));
        assert_eq!(request.cyclic(1), Some(("B", FontVariant::new("900", FontStyle::Italic))));
        assert_eq!(request.cyclic(2), Some(("A", FontVariant::new("300", FontStyle::Normal))));
        assert_eq!(FontFamilyRequest::default().cyclic(0), None);
    }

    #[test]
    fn test_asset_from_url_strips_query() {
        let asset =
            DiscoveredFontAsset::from_url("https://fonts.example.com/s/roboto/v30/Roboto.WOFF2?v=3")
                .unwrap();
        assert_eq!(asset.local_file_name, "Roboto.WOFF2");
        assert_eq!(asset.extension, "woff2");
        assert_eq!(asset.stem(), "Roboto");
        assert_eq!(asset.format(), "woff2");
    }

    #[test]
    fn test_asset_from_url_without_path() {
        assert!(DiscoveredFontAsset::from_url("https://fonts.example.com").is_none());
        assert!(DiscoveredFontAsset::from_url("https://fonts.example.com/").is_none());
    }
}
