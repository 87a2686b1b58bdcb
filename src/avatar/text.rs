//! Initials shown on a generated avatar.

/// Placeholder used whenever no initials can be derived.
pub const DEFAULT_INITIALS: &str = "A";

fn first_upper(word: &str) -> Option<String> {
    word.chars().next().map(|c| c.to_uppercase().collect())
}

/// Derives the initials for `text`.
///
/// A single word yields its capital letters (`McDonald` gives `MD`) or, when
/// it has none, its first letter uppercased. Several space-separated words
/// yield the first letter of each. Blank input yields `A`.
pub fn resolve_initials(text: &str) -> String {
    if text.trim().is_empty() {
        return DEFAULT_INITIALS.to_string();
    }

    if !text.contains(' ') {
        let capitals: String = text.chars().filter(char::is_ascii_uppercase).collect();
        if !capitals.is_empty() {
            return capitals;
        }
        return first_upper(text).unwrap_or_else(|| DEFAULT_INITIALS.to_string());
    }

    let initials: String = text
        .split(' ')
        .filter(|word| !word.is_empty())
        .filter_map(first_upper)
        .collect();
    if initials.is_empty() {
        DEFAULT_INITIALS.to_string()
    } else {
        initials
    }
}

/// Initials for an image path or URL, taken from its file name without the
/// extension (`/img/John Smith.png` gives `JS`).
pub fn resolve_from_source(src: &str) -> String {
    let path = src.split(['?', '#']).next().unwrap_or(src);
    let file_name = path
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    resolve_initials(stem)
}
