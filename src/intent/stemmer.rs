//! Crude suffix stripping used as a lookup key normalizer
//!
//! Not a linguistic stemmer: "running" becomes "runn" and "status" becomes
//! "statu". The output is only meaningful as a table key.

/// Strip one trailing "ing", else "ed", else a single (non-doubled) "s"
pub fn stem(word: &str) -> &str {
    let word = word.trim();
    if let Some(base) = word.strip_suffix("ing") {
        return base;
    }
    if let Some(base) = word.strip_suffix("ed") {
        return base;
    }
    if !word.ends_with("ss") {
        if let Some(base) = word.strip_suffix('s') {
            return base;
        }
    }
    word
}
