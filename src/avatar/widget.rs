//! `<img>` markup for an avatar that falls back to a generated image.

use super::synth::{DEFAULT_AVATAR_SIZE, synthesize};
use super::text::resolve_from_source;
use html_escape::encode_double_quoted_attribute;
use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Alt text used when neither `alt` nor `src` is given.
pub const DEFAULT_ALT: &str = "Avatar";

static EXTRA_ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\S+)=['"]([^'"]*)['"]"#).expect("BUG: invalid EXTRA_ATTRIBUTE_RE regex literal")
});

/// Produces the fallback image for `(text, width, height)`.
pub type FallbackGenerator = fn(&str, u32, u32) -> String;

/// Attributes as a caller passes them in, all optional and textual.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarAttributes {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub id: Option<String>,
    pub class_attr: Option<String>,
    pub style: Option<String>,
    /// Free-form `key='value' key2="value2"` pairs copied onto the tag.
    pub extra_attributes: Option<String>,
}

/// A resolved avatar, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarWidget {
    pub src: Option<String>,
    pub alt: String,
    pub id: Option<String>,
    pub class_attr: Option<String>,
    pub style: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub extra_attributes: Vec<(String, String)>,
    /// Generated image used when `src` is missing or fails to load.
    pub fallback_src: String,
}

/// Leading digits of `value` as a pixel count; zero or no digits is unset.
fn parse_dimension(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|v| *v > 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_attribute_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

/// Splits `key='value' key2="value2"` into pairs, dropping keys that are not
/// plain attribute names.
pub fn parse_extra_attributes(source: &str) -> Vec<(String, String)> {
    EXTRA_ATTRIBUTE_RE
        .captures_iter(source)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str();
            let value = caps.get(2)?.as_str();
            if !is_attribute_name(key) {
                debug!("Dropping avatar attribute with unsafe name {:?}", key);
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

impl AvatarWidget {
    pub fn new(attributes: AvatarAttributes) -> Self {
        Self::with_generator(attributes, synthesize)
    }

    pub fn with_generator(attributes: AvatarAttributes, generate: FallbackGenerator) -> Self {
        let src = non_empty(attributes.src);
        let alt = non_empty(attributes.alt).unwrap_or_else(|| match &src {
            Some(src) => resolve_from_source(src),
            None => DEFAULT_ALT.to_string(),
        });

        let mut style = non_empty(attributes.style);
        let mut height = None;
        if let Some(raw) = attributes.height.as_deref().map(str::trim) {
            if raw.contains('%') {
                let prefix = style.map(|s| format!("{};", s)).unwrap_or_default();
                style = Some(format!("{}height: {};", prefix, raw));
            } else {
                height = parse_dimension(raw);
            }
        }
        let width = attributes.width.as_deref().and_then(parse_dimension);

        let fallback_src = generate(
            &alt,
            width.unwrap_or(DEFAULT_AVATAR_SIZE),
            height.unwrap_or(DEFAULT_AVATAR_SIZE),
        );

        Self {
            src,
            alt,
            id: non_empty(attributes.id),
            class_attr: non_empty(attributes.class_attr),
            style,
            width,
            height,
            extra_attributes: attributes
                .extra_attributes
                .as_deref()
                .map(parse_extra_attributes)
                .unwrap_or_default(),
            fallback_src,
        }
    }

    /// The image actually shown first: the given `src`, else the fallback.
    pub fn display_src(&self) -> &str {
        self.src.as_deref().unwrap_or(&self.fallback_src)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AvatarWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<img src=\"{}\" alt=\"{}\"",
            encode_double_quoted_attribute(self.display_src()),
            encode_double_quoted_attribute(&self.alt)
        )?;
        let optional = [
            ("id", self.id.clone()),
            ("class", self.class_attr.clone()),
            ("style", self.style.clone()),
            ("width", self.width.map(|w| w.to_string())),
            ("height", self.height.map(|h| h.to_string())),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                write!(f, " {}=\"{}\"", name, encode_double_quoted_attribute(&value))?;
            }
        }
        for (name, value) in &self.extra_attributes {
            write!(f, " {}=\"{}\"", name, encode_double_quoted_attribute(value))?;
        }
        write!(
            f,
            " onerror=\"this.src='{}';\">",
            encode_double_quoted_attribute(&self.fallback_src)
        )
    }
}
