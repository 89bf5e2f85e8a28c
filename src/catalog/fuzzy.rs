//! Bounded edit-distance lookup against a flat key set

use std::collections::HashMap;

/// Largest edit distance accepted by [`fuzzy_lookup`]
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Find the value whose key is closest to `query`, within [`MAX_EDIT_DISTANCE`]
pub fn fuzzy_lookup<'a, V>(query: &str, table: &'a HashMap<String, V>) -> Option<&'a V> {
    fuzzy_lookup_within(query, table, MAX_EDIT_DISTANCE)
}

/// Find the value whose key is closest to `query`, within `max_distance` edits
///
/// Keys whose length differs from the query by more than `max_distance`
/// are skipped before computing any distance. Among equally close keys the
/// first one visited wins; `HashMap` iteration order makes that choice
/// unspecified for true ties.
pub fn fuzzy_lookup_within<'a, V>(
    query: &str,
    table: &'a HashMap<String, V>,
    max_distance: usize,
) -> Option<&'a V> {
    if query.is_empty() {
        return None;
    }

    let query_len = query.chars().count();
    let mut best: Option<(usize, &'a V)> = None;

    for (key, value) in table {
        if key.chars().count().abs_diff(query_len) > max_distance {
            continue;
        }

        let distance = levenshtein(query, key);
        if best.map_or(true, |(min, _)| distance < min) {
            best = Some((distance, value));
        }
    }

    best.filter(|(distance, _)| *distance <= max_distance)
        .map(|(_, value)| value)
}

/// Levenshtein distance over chars, unit cost for insert/delete/substitute
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows: previous and current
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            current[j] = (current[j - 1] + 1)
                .min(prev[j] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}
