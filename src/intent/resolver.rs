//! Resolution cascade
//!
//! Turns a request into one command by trying tiers cheapest first:
//!
//! static catalog -> man pages -> module store -> remote search
//!
//! The first acceptable candidate wins. Provider failures skip the tier.
//! Each tier reports a fixed confidence, independent of the provider's own
//! score; the order is by cost, not by confidence.

use crate::catalog::fuzzy::fuzzy_lookup_within;
use crate::catalog::Catalog;
use crate::core::config::ResolverConfig;
use crate::core::error::ResolveError;
use crate::intent::keywords::extract_keywords;
use crate::intent::parser::VerbNounParser;
use crate::intent::stemmer::stem;
use crate::providers::{Candidate, ManPageProvider, ModuleProvider, RemoteProvider, Source};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Tokens shorter than this are never typo-corrected
const MIN_CORRECTABLE_LEN: usize = 4;

/// The single command chosen for a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    pub command: String,
    pub description: String,
    pub source: Source,
    pub confidence: f64,
}

pub struct Resolver {
    config: ResolverConfig,
    catalog: Arc<Catalog>,
    /// Built only when the correction pass is enabled
    vocabulary: HashMap<String, String>,
    man_pages: Option<Arc<dyn ManPageProvider>>,
    modules: Option<Arc<dyn ModuleProvider>>,
    remote: Option<Arc<dyn RemoteProvider>>,
}

impl Resolver {
    /// A resolver with only the static tier; attach providers with the
    /// `with_*` methods
    pub fn new(config: ResolverConfig, catalog: Arc<Catalog>) -> Self {
        let vocabulary = if config.fuzzy_fallback {
            catalog.vocabulary()
        } else {
            HashMap::new()
        };
        Self {
            config,
            catalog,
            vocabulary,
            man_pages: None,
            modules: None,
            remote: None,
        }
    }

    pub fn with_man_pages(mut self, provider: Arc<dyn ManPageProvider>) -> Self {
        self.man_pages = Some(provider);
        self
    }

    pub fn with_modules(mut self, provider: Arc<dyn ModuleProvider>) -> Self {
        self.modules = Some(provider);
        self
    }

    pub fn with_remote(mut self, provider: Arc<dyn RemoteProvider>) -> Self {
        self.remote = Some(provider);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a request to one command
    pub async fn resolve(&self, input: &str) -> Result<DetectionResult, ResolveError> {
        if let Some(result) = self.resolve_static(input) {
            return Ok(self.accept(result));
        }

        if self.config.fuzzy_fallback {
            if let Some(result) = self.resolve_corrected(input) {
                return Ok(self.accept(result));
            }
        }

        let keywords = extract_keywords(input);
        if keywords.is_empty() {
            return Err(ResolveError::NoKeywords);
        }
        tracing::debug!("Keywords: {:?}", keywords);

        if let Some(result) = self.try_man_pages(&keywords).await {
            return Ok(self.accept(result));
        }
        if let Some(result) = self.try_modules(&keywords).await {
            return Ok(self.accept(result));
        }
        if let Some(result) = self.try_remote(input).await {
            return Ok(self.accept(result));
        }

        Err(ResolveError::NoMatch)
    }

    /// Resolve unless `cancel` completes first
    ///
    /// On cancellation the in-flight tier is dropped and no partial result
    /// is returned.
    pub async fn resolve_until<F>(&self, input: &str, cancel: F) -> Result<DetectionResult, ResolveError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.resolve(input) => result,
            _ = cancel => {
                tracing::info!("Resolution cancelled");
                Err(ResolveError::Cancelled)
            }
        }
    }

    /// Exact catalog lookup on the parsed `(verb, noun)` pair. No I/O.
    pub fn resolve_static(&self, input: &str) -> Option<DetectionResult> {
        let parsed = self.parser().parse(input);
        let (verb, noun) = parsed.pair()?;
        let entry = self.catalog.lookup(verb, noun)?;
        Some(DetectionResult {
            command: entry.command.clone(),
            description: entry.description.clone(),
            source: Source::Static,
            confidence: self.config.static_confidence,
        })
    }

    /// Catalog lookup after correcting unknown tokens to the nearest known word
    fn resolve_corrected(&self, input: &str) -> Option<DetectionResult> {
        let lowered = input.to_lowercase();
        let mut changed = false;
        let corrected: Vec<&str> = lowered
            .split_whitespace()
            .map(|token| {
                if token.chars().count() < MIN_CORRECTABLE_LEN
                    || self.vocabulary.contains_key(token)
                    || self.vocabulary.contains_key(stem(token))
                {
                    return token;
                }
                match fuzzy_lookup_within(token, &self.vocabulary, self.config.fuzzy_max_distance) {
                    Some(word) => {
                        changed = true;
                        word.as_str()
                    }
                    None => token,
                }
            })
            .collect();

        if !changed {
            return None;
        }

        let corrected = corrected.join(" ");
        tracing::debug!("Corrected '{}' to '{}'", input, corrected);
        let mut result = self.resolve_static(&corrected)?;
        result.confidence = self.config.fuzzy_confidence;
        Some(result)
    }

    async fn try_man_pages(&self, keywords: &[String]) -> Option<DetectionResult> {
        let provider = self.man_pages.as_ref()?;
        tracing::debug!("Trying man tier");

        let hits = match provider.search_man_pages(keywords).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!("man tier skipped: {}", e);
                return None;
            }
        };

        let top = hits.into_iter().next()?;
        if top.score <= self.config.man_score_threshold {
            tracing::debug!(
                "Top man page '{}' scored {} (needs > {})",
                top.name,
                top.score,
                self.config.man_score_threshold
            );
            return None;
        }
        self.tier_result(top.into(), self.config.man_confidence)
    }

    async fn try_modules(&self, keywords: &[String]) -> Option<DetectionResult> {
        let provider = self.modules.as_ref()?;
        tracing::debug!("Trying module tier");

        match provider.search_modules(keywords).await {
            Ok(hits) => {
                let top = hits.into_iter().next()?;
                self.tier_result(top.into(), self.config.module_confidence)
            }
            Err(e) => {
                tracing::warn!("module tier skipped: {}", e);
                None
            }
        }
    }

    /// Remote search gets the raw request, not the keywords
    async fn try_remote(&self, input: &str) -> Option<DetectionResult> {
        let provider = self.remote.as_ref()?;
        tracing::debug!("Trying remote tier");

        match provider.search_remote(input).await {
            Ok(hits) => {
                let top = hits.into_iter().next()?;
                self.tier_result(top.into(), self.config.remote_confidence)
            }
            Err(e) => {
                tracing::warn!("remote tier skipped: {}", e);
                None
            }
        }
    }

    /// A candidate without a command is not a result
    fn tier_result(&self, candidate: Candidate, confidence: f64) -> Option<DetectionResult> {
        if candidate.command.trim().is_empty() {
            tracing::debug!("Ignoring {} candidate with empty command", candidate.source);
            return None;
        }
        Some(DetectionResult {
            command: candidate.command,
            description: candidate.description,
            source: candidate.source,
            confidence,
        })
    }

    fn accept(&self, result: DetectionResult) -> DetectionResult {
        tracing::info!(
            "Resolved to '{}' (source: {}, confidence: {:.2})",
            result.command,
            result.source,
            result.confidence
        );
        result
    }

    fn parser(&self) -> VerbNounParser<'_> {
        VerbNounParser::new(&self.catalog).with_default_noun(self.config.default_noun.as_deref())
    }
}
