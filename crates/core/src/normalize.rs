//! Name and title normalization
//!
//! These functions define the identity keys used to decide whether two
//! author, genre, or book records refer to the same real-world thing. All
//! of them are idempotent: applying one twice gives the same result as
//! applying it once.

/// Minor prepositions that stay lowercase in genre names unless first
const MINOR_WORDS: &[&str] = &[
    "of", "and", "the", "in", "on", "at", "to", "for", "with",
];

/// Spelling variants folded into one canonical genre name, applied after
/// lowercasing and whitespace collapsing but before title-casing
const GENRE_ALIASES: &[(&str, &str)] = &[
    ("sci-fi", "science fiction"),
    ("sci fi", "science fiction"),
    ("scifi", "science fiction"),
    ("sf", "science fiction"),
    ("ya", "young adult"),
    ("juvenile fiction", "young adult"),
];

/// Trims and collapses internal whitespace runs to single spaces
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a person-name part: trim, collapse whitespace, lowercase,
/// then capitalize the first letter of each word
pub fn normalize_person_name(s: &str) -> String {
    let collapsed = collapse_whitespace(s).to_lowercase();
    collapsed
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits an author display name into (first, last)
///
/// The last whitespace-separated token is the last name; everything before
/// it joins into the first name. A single token is treated as
/// last-name-only with an empty first-name placeholder.
pub fn split_display_name(s: &str) -> (String, String) {
    let collapsed = collapse_whitespace(s);
    match collapsed.rsplit_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (String::new(), collapsed),
    }
}

/// Normalizes a genre name: trim, collapse whitespace, lowercase, fold
/// known aliases, then title-case each word except minor prepositions
/// (never the first word)
pub fn normalize_genre_name(s: &str) -> String {
    let lowered = collapse_whitespace(s).to_lowercase();
    let canonical = GENRE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, target)| *target)
        .unwrap_or(&lowered);

    canonical
        .split(' ')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && MINOR_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a book title for duplicate matching: lowercase, strip
/// non-alphanumeric characters, collapse whitespace
pub fn normalize_title(s: &str) -> String {
    let stripped: String = s
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&stripped)
}

/// Uppercases the first character of an already-lowercased word
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
