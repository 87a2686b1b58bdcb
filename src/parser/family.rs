//! Reads the requested families out of a stylesheet URL's query string.
//!
//! The convention is the one font services use:
//! `?family=Roboto:400,700i|Open+Sans`. Entries are `|`-separated, each entry
//! is `name[:variants]` and variants are comma-separated weight tokens with an
//! optional trailing `i` for italic.

use fonthunter_types::{FontFamilyRequest, FontVariant};
use log::debug;
use url::Url;

const FAMILY_PARAM: &str = "family";

/// Parses the `family` query parameter of `url`.
///
/// Never fails: an unparsable URL, or one without a query or without a
/// `family` parameter, yields an empty request. When the parameter repeats,
/// the last one wins.
pub fn parse_family_request(url: &str) -> FontFamilyRequest {
    let Ok(parsed) = Url::parse(url) else {
        return FontFamilyRequest::default();
    };

    let Some(families) = parsed
        .query_pairs()
        .filter(|(key, _)| key == FAMILY_PARAM)
        .map(|(_, value)| value.into_owned())
        .last()
    else {
        return FontFamilyRequest::default();
    };

    let request: FontFamilyRequest = families
        .split('|')
        .flat_map(parse_entry)
        .collect();
    debug!(
        "Family request from {}: {:?}",
        url,
        request.family_names().collect::<Vec<_>>()
    );
    request
}

fn parse_entry(entry: &str) -> Vec<(String, FontVariant)> {
    let mut parts = entry.split(':');
    let name = parts.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Vec::new();
    }

    let variants: Vec<FontVariant> = parts
        .next()
        .map(|list| list.split(',').map(FontVariant::from_token).collect())
        .unwrap_or_default();

    if variants.is_empty() {
        vec![(name.to_string(), FontVariant::default())]
    } else {
        variants
            .into_iter()
            .map(|variant| (name.to_string(), variant))
            .collect()
    }
}
