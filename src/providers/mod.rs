//! Provider contracts for the search tiers
//!
//! Each tier past the static catalog asks one provider for a ranked list.
//! Providers may fail; the resolver treats any failure as "tier skipped".

pub mod man;
pub mod remote;

use crate::core::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use man::ManPageSearch;
pub use remote::RemoteSearch;

/// Which tier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Static,
    Man,
    Module,
    Remote,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Static => "static",
            Source::Man => "man",
            Source::Module => "module",
            Source::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// A ranked result from a provider, before the resolver picks a winner
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub command: String,
    pub description: String,
    pub source: Source,
    /// Provider-specific relevance; providers without scoring report 0
    pub score: f64,
}

/// One apropos match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManPageHit {
    pub name: String,
    pub description: String,
    pub score: u32,
}

/// One module store match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleHit {
    pub command: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// One remote search match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteHit {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub usage: String,
}

impl From<ManPageHit> for Candidate {
    fn from(hit: ManPageHit) -> Self {
        Self {
            command: hit.name,
            description: hit.description,
            source: Source::Man,
            score: f64::from(hit.score),
        }
    }
}

impl From<ModuleHit> for Candidate {
    fn from(hit: ModuleHit) -> Self {
        Self {
            command: hit.command,
            description: hit.description,
            source: Source::Module,
            score: 0.0,
        }
    }
}

impl From<RemoteHit> for Candidate {
    fn from(hit: RemoteHit) -> Self {
        let description = if hit.usage.trim().is_empty() {
            hit.description
        } else {
            format!("{}\nUsage: {}", hit.description, hit.usage)
        };
        Self {
            command: hit.name,
            description,
            source: Source::Remote,
            score: 0.0,
        }
    }
}

/// System manual search, ranked by descending score
#[async_trait]
pub trait ManPageProvider: Send + Sync {
    async fn search_man_pages(&self, keywords: &[String]) -> Result<Vec<ManPageHit>, ProviderError>;
}

/// Local module store search, in storage order
#[async_trait]
pub trait ModuleProvider: Send + Sync {
    async fn search_modules(&self, keywords: &[String]) -> Result<Vec<ModuleHit>, ProviderError>;
}

/// Remote command search; receives the raw, unprocessed request
#[async_trait]
pub trait RemoteProvider: Send + Sync {
    async fn search_remote(&self, input: &str) -> Result<Vec<RemoteHit>, ProviderError>;
}
