//! Static verb/noun command catalog
//!
//! Curated knowledge: `verb -> noun -> {command, description}` plus the
//! alias tables that normalize surface forms onto canonical verbs and nouns.
//! A catalog is built once and only read afterwards.

mod data;
pub mod fuzzy;

use crate::core::error::{ClioError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// One curated command for a `(verb, noun)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub command: String,
    pub description: String,
}

/// On-disk layout of an externalised catalog
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    verbs: HashMap<String, HashMap<String, CatalogEntry>>,
    #[serde(default)]
    verb_aliases: HashMap<String, String>,
    #[serde(default)]
    noun_aliases: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    verbs: HashMap<String, HashMap<String, CatalogEntry>>,
    verb_aliases: HashMap<String, String>,
    noun_aliases: HashMap<String, String>,
}

static BUILTIN: OnceLock<Arc<Catalog>> = OnceLock::new();

impl Catalog {
    /// The process-wide built-in catalog (built on first use)
    pub fn builtin() -> &'static Arc<Catalog> {
        BUILTIN.get_or_init(|| Arc::new(Self::from_builtin_tables()))
    }

    fn from_builtin_tables() -> Self {
        let verbs = data::VERB_NOUNS
            .iter()
            .map(|(verb, nouns)| {
                let entries = nouns
                    .iter()
                    .map(|(noun, command, description)| {
                        (
                            noun.to_string(),
                            CatalogEntry {
                                command: command.to_string(),
                                description: description.to_string(),
                            },
                        )
                    })
                    .collect();
                (verb.to_string(), entries)
            })
            .collect();

        Self {
            verbs,
            verb_aliases: owned_pairs(data::VERB_ALIASES),
            noun_aliases: owned_pairs(data::NOUN_ALIASES),
        }
    }

    /// Parse a catalog from TOML:
    ///
    /// ```toml
    /// [verbs.copy.file]
    /// command = "cp"
    /// description = "Copy a file"
    ///
    /// [verb_aliases]
    /// duplicate = "copy"
    ///
    /// [noun_aliases]
    /// doc = "file"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let catalog = Self {
            verbs: lowercase_verbs(file.verbs),
            verb_aliases: lowercase_pairs(file.verb_aliases),
            noun_aliases: lowercase_pairs(file.noun_aliases),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load an externalised catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        for (alias, verb) in &self.verb_aliases {
            if !self.verbs.contains_key(verb) {
                return Err(ClioError::Catalog(format!(
                    "verb alias '{}' points to unknown verb '{}'",
                    alias, verb
                )));
            }
        }
        for (verb, nouns) in &self.verbs {
            if let Some((noun, _)) = nouns.iter().find(|(_, e)| e.command.trim().is_empty()) {
                return Err(ClioError::Catalog(format!(
                    "entry ({}, {}) has an empty command",
                    verb, noun
                )));
            }
        }
        Ok(())
    }

    pub fn lookup(&self, verb: &str, noun: &str) -> Option<&CatalogEntry> {
        self.verbs.get(verb)?.get(noun)
    }

    pub fn has_verb(&self, verb: &str) -> bool {
        self.verbs.contains_key(verb)
    }

    /// True when `noun` is a literal key under `verb`
    pub fn has_noun(&self, verb: &str, noun: &str) -> bool {
        self.lookup(verb, noun).is_some()
    }

    pub fn resolve_verb_alias(&self, word: &str) -> Option<&str> {
        self.verb_aliases.get(word).map(String::as_str)
    }

    pub fn resolve_noun_alias(&self, word: &str) -> Option<&str> {
        self.noun_aliases.get(word).map(String::as_str)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.verbs.keys().map(String::as_str)
    }

    pub fn entry_count(&self) -> usize {
        self.verbs.values().map(HashMap::len).sum()
    }

    /// Every word the catalog recognizes, keyed by its own spelling
    ///
    /// Verb keys, noun keys and both alias tables' surface forms. Used as the
    /// flat candidate set for typo correction.
    pub fn vocabulary(&self) -> HashMap<String, String> {
        let mut words = HashMap::new();
        let known = self
            .verbs
            .iter()
            .flat_map(|(verb, nouns)| std::iter::once(verb).chain(nouns.keys()))
            .chain(self.verb_aliases.keys())
            .chain(self.noun_aliases.keys());
        for word in known {
            words.insert(word.clone(), word.clone());
        }
        words
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn lowercase_pairs(pairs: HashMap<String, String>) -> HashMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
        .collect()
}

fn lowercase_verbs(
    verbs: HashMap<String, HashMap<String, CatalogEntry>>,
) -> HashMap<String, HashMap<String, CatalogEntry>> {
    verbs
        .into_iter()
        .map(|(verb, nouns)| {
            let nouns = nouns
                .into_iter()
                .map(|(noun, entry)| (noun.to_lowercase(), entry))
                .collect();
            (verb.to_lowercase(), nouns)
        })
        .collect()
}
