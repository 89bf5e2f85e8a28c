//! Deterministic verb/noun recognition against the static catalog

use crate::catalog::Catalog;
use crate::intent::stemmer::stem;

/// Noun assumed when a request names only a verb
pub const DEFAULT_NOUN: &str = "file";

/// Canonical verb and noun recognized in a request
///
/// Both empty is the "no intent" outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIntent {
    pub verb: Option<String>,
    pub noun: Option<String>,
}

impl ParsedIntent {
    /// The `(verb, noun)` pair, when both were recognized
    pub fn pair(&self) -> Option<(&str, &str)> {
        Some((self.verb.as_deref()?, self.noun.as_deref()?))
    }

    pub fn is_empty(&self) -> bool {
        self.verb.is_none() && self.noun.is_none()
    }
}

/// Recognizes `(verb, noun)` pairs through the catalog's alias tables
pub struct VerbNounParser<'a> {
    catalog: &'a Catalog,
    default_noun: Option<&'a str>,
}

impl<'a> VerbNounParser<'a> {
    /// Parser using the [`DEFAULT_NOUN`] policy
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            default_noun: Some(DEFAULT_NOUN),
        }
    }

    /// Override (or with `None`, disable) the default-noun policy
    pub fn with_default_noun(mut self, noun: Option<&'a str>) -> Self {
        self.default_noun = noun;
        self
    }

    pub fn parse(&self, text: &str) -> ParsedIntent {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        let Some((verb_index, verb)) = self.find_verb(&tokens) else {
            return ParsedIntent::default();
        };

        let noun = self
            .find_noun(&tokens, verb_index, &verb)
            .or_else(|| self.default_noun_for(&verb));

        ParsedIntent {
            verb: Some(verb),
            noun,
        }
    }

    /// First token whose stem is a verb alias or a catalog verb
    fn find_verb(&self, tokens: &[&str]) -> Option<(usize, String)> {
        tokens.iter().enumerate().find_map(|(i, token)| {
            let stemmed = stem(token);
            if let Some(verb) = self.catalog.resolve_verb_alias(stemmed) {
                return Some((i, verb.to_string()));
            }
            self.catalog
                .has_verb(stemmed)
                .then(|| (i, stemmed.to_string()))
        })
    }

    /// First token (other than the verb's) that is a noun alias or a noun
    /// the verb knows
    fn find_noun(&self, tokens: &[&str], verb_index: usize, verb: &str) -> Option<String> {
        tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != verb_index)
            .find_map(|(_, token)| {
                let stemmed = stem(token);
                if let Some(noun) = self.catalog.resolve_noun_alias(stemmed) {
                    return Some(noun.to_string());
                }
                self.catalog
                    .has_noun(verb, stemmed)
                    .then(|| stemmed.to_string())
            })
    }

    fn default_noun_for(&self, verb: &str) -> Option<String> {
        let noun = self.default_noun?;
        self.catalog.has_noun(verb, noun).then(|| noun.to_string())
    }
}
