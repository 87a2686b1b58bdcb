//! Font discovery inside fetched stylesheet text.
//!
//! This is deliberately not a CSS parser. Only `@font-face` family
//! declarations and URL-like tokens ending in a font extension are
//! recognised.

use fonthunter_types::{DiscoveredFontAsset, font_extensions};
use itertools::Itertools;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static FONT_FACE_FAMILY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)@font-face\s*\{[^}]*?font-family\s*:\s*['"]([^'"]+)['"]"#)
        .expect("BUG: invalid FONT_FACE_FAMILY_RE regex literal")
});

static FONT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Longest extension first so `woff2` is never cut down to `woff`.
    let alternation = font_extensions()
        .sorted_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)))
        .join("|");
    Regex::new(&format!(
        r#"(?i)[^\s"'()]+\.(?:{})\b(?:[?#][^\s"'()]*)?"#,
        alternation
    ))
    .expect("BUG: invalid FONT_URL_RE regex literal")
});

/// Family names declared by `@font-face` rules, in source order.
///
/// Duplicates are kept: the position of a name lines up with the rule it came
/// from.
pub fn extract_font_family_names(css: &str) -> Vec<String> {
    FONT_FACE_FAMILY_RE
        .captures_iter(css)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Absolute URLs of every font file referenced by `css`, in first-seen order
/// and without duplicates. Relative references are resolved against the
/// directory of `base_url`.
pub fn extract_font_urls(css: &str, base_url: &str) -> Vec<String> {
    FONT_URL_RE
        .find_iter(css)
        .map(|m| resolve_font_url(base_url, m.as_str()))
        .unique()
        .collect()
}

/// [`extract_font_urls`] paired with the file name each font is saved under.
pub fn discover_font_assets(css: &str, base_url: &str) -> Vec<DiscoveredFontAsset> {
    extract_font_urls(css, base_url)
        .into_iter()
        .filter_map(|url| {
            let asset = DiscoveredFontAsset::from_url(&url);
            if asset.is_none() {
                debug!("Skipping font URL without a file name: {}", url);
            }
            asset
        })
        .collect()
}

fn is_absolute(candidate: &str) -> bool {
    let lower = candidate
        .get(..8)
        .unwrap_or(candidate)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves `candidate` against the directory of `base_url`.
///
/// Absolute `http(s)` URLs come back unchanged, so resolving a result again
/// is a no-op. Protocol-relative URLs borrow the scheme of the base.
pub fn resolve_font_url(base_url: &str, candidate: &str) -> String {
    if is_absolute(candidate) {
        return candidate.to_string();
    }
    if let Some(authority_and_path) = candidate.strip_prefix("//") {
        let scheme = base_url
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or("http");
        return format!("{}://{}", scheme, authority_and_path);
    }

    let relative = candidate.trim_start_matches("./").trim_start_matches('/');
    format!("{}/{}", base_directory(base_url), relative)
}

/// The directory part of `url`, without query, fragment or trailing `/`.
///
/// `https://host/css/fonts.css?x` becomes `https://host/css`; a URL with no
/// path is its own directory.
pub fn base_directory(url: &str) -> &str {
    let url = url.split(['?', '#']).next().unwrap_or(url);
    let path_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    let directory = match url[path_start..].find('/') {
        Some(_) => url.rfind('/').map(|i| &url[..i]).unwrap_or(url),
        None => url,
    };
    directory.trim_end_matches('/')
}
