//! Local indexed module store
//!
//! Records live in memory behind a `RwLock` (concurrent readers, one writer)
//! and are persisted as a JSON snapshot. The store is constructed once by
//! the owning process and handed to the resolver by reference.

use crate::core::error::{ClioError, ProviderError, Result};
use crate::providers::{ModuleHit, ModuleProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Default cap on search results
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Indexed metadata for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub version: String,
    /// Command suggested for this module; the module id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ModuleRecord {
    pub fn command(&self) -> &str {
        self.command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(self.id.as_str())
    }

    fn matches(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(keyword)
            || self.description.to_lowercase().contains(keyword)
            || self.tags.join(",").to_lowercase().contains(keyword)
    }

    fn to_hit(&self) -> ModuleHit {
        ModuleHit {
            command: self.command().to_string(),
            description: self.description.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    modules: Vec<ModuleRecord>,
}

#[derive(Debug)]
pub struct ModuleStore {
    path: Option<PathBuf>,
    records: RwLock<Vec<ModuleRecord>>,
    limit: usize,
}

impl ModuleStore {
    /// A store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: RwLock::new(Vec::new()),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Open a snapshot file, starting empty when it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&content)?;
            snapshot.modules
        } else {
            Vec::new()
        };
        tracing::debug!("Opened module store {} ({} modules)", path.display(), records.len());

        Ok(Self {
            path: Some(path),
            records: RwLock::new(records),
            limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert a record, or replace the one with the same id in place
    pub fn upsert(&self, record: ModuleRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| ClioError::Store(e.to_string()))?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<ModuleRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| ClioError::Store(e.to_string()))?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    pub fn len(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|e| ClioError::Store(e.to_string()))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Records matching any keyword in name, description or tags
    ///
    /// Case-insensitive substring match, storage order, capped at the
    /// store's limit.
    pub fn search(&self, keywords: &[String]) -> Result<Vec<ModuleRecord>> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let records = self
            .records
            .read()
            .map_err(|e| ClioError::Store(e.to_string()))?;
        Ok(records
            .iter()
            .filter(|r| keywords.iter().any(|k| r.matches(k)))
            .take(self.limit)
            .cloned()
            .collect())
    }

    /// Write the snapshot; a no-op for in-memory stores
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let snapshot = {
            let records = self
                .records
                .read()
                .map_err(|e| ClioError::Store(e.to_string()))?;
            Snapshot {
                modules: records.clone(),
            }
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&snapshot)?)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[async_trait]
impl ModuleProvider for ModuleStore {
    async fn search_modules(
        &self,
        keywords: &[String],
    ) -> std::result::Result<Vec<ModuleHit>, ProviderError> {
        let records = self
            .search(keywords)
            .map_err(|e| ProviderError::Query(e.to_string()))?;
        Ok(records.iter().map(ModuleRecord::to_hit).collect())
    }
}
