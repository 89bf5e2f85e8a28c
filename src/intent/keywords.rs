//! Keyword extraction for the search tiers

/// Characters trimmed from both ends of each token
const PUNCTUATION: &[char] = &['?', '!', '.', ',', ';', ':', '"', '\'', '(', ')'];

const STOPWORDS: &[&str] = &[
    "i", "want", "to", "how", "do", "can", "you", "please", "the", "a", "an", "is", "of", "in",
    "on", "for", "and", "or", "with", "help", "me", "all",
];

/// Surface word -> search term
const SYNONYMS: &[(&str, &str)] = &[
    ("duplicate", "cp"),
    ("copy", "cp"),
    ("move", "mv"),
    ("rename", "mv"),
    ("remove", "rm"),
    ("delete", "rm"),
    ("list", "ls"),
    ("show", "ls"),
    ("change", "cd"),
    ("folder", "directory"),
];

/// Extract normalized search keywords from a free-text request
///
/// Lower-cases, splits on whitespace, trims punctuation, drops stopwords
/// and maps a few synonyms onto command names. Order and duplicates are
/// preserved. An empty result means the request carries nothing to search.
pub fn extract_keywords(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(PUNCTUATION))
        .filter(|token| !token.is_empty() && !STOPWORDS.contains(token))
        .map(|token| {
            SYNONYMS
                .iter()
                .find(|(word, _)| *word == token)
                .map_or(token, |(_, term)| *term)
                .to_string()
        })
        .collect()
}
