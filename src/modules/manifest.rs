//! Module manifests (YAML) and directory ingest

use crate::core::error::{ClioError, Result};
use crate::modules::store::{ModuleRecord, ModuleStore};
use serde::Deserialize;
use std::path::Path;

/// Metadata header of a module manifest
///
/// Manifests also carry workflow definitions (flows, steps); those keys are
/// ignored here, only the metadata is indexed.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleManifest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub command: Option<String>,
}

impl ModuleManifest {
    /// Parse and validate a manifest document
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: ModuleManifest = serde_yaml::from_str(content)?;
        if manifest.id.trim().is_empty() || manifest.name.trim().is_empty() {
            return Err(ClioError::Manifest("missing id or name".into()));
        }
        Ok(manifest)
    }

    pub fn into_record(self) -> ModuleRecord {
        ModuleRecord {
            id: self.id,
            name: self.name,
            description: self.description,
            tags: self.tags,
            version: self.version,
            command: self.command,
        }
    }
}

/// Load every `*.yaml` manifest in `dir` into the store
///
/// Unreadable or invalid files are skipped with a warning, as are modules
/// already present in the store. A missing directory ingests nothing.
/// Returns the number of modules added.
pub fn ingest_dir(store: &ModuleStore, dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        tracing::debug!("No module directory at {}", dir.display());
        return Ok(0);
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    paths.sort();

    let mut added = 0;
    for path in paths {
        let manifest = match std::fs::read_to_string(&path)
            .map_err(ClioError::from)
            .and_then(|content| ModuleManifest::parse(&content))
        {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if store.contains(&manifest.id)? {
            continue;
        }

        tracing::info!("Loaded module: {}", manifest.name);
        store.upsert(manifest.into_record())?;
        added += 1;
    }

    if added > 0 {
        store.save()?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIT_SETUP: &str = r#"
name: Git Setup
id: git_setup
version: "1.2"
description: Configure git identity and defaults
tags: [git, vcs]
flows:
  - name: setup
    steps:
      - type: message
        content: Hello
"#;

    #[test]
    fn test_parse_ignores_flows() {
        let manifest = ModuleManifest::parse(GIT_SETUP).unwrap();
        assert_eq!(manifest.id, "git_setup");
        assert_eq!(manifest.version, "1.2");
        assert_eq!(manifest.tags, vec!["git", "vcs"]);
        assert!(manifest.command.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_id() {
        let result = ModuleManifest::parse("name: Nameless\n");
        assert!(matches!(result, Err(ClioError::Manifest(_))));
    }

    #[test]
    fn test_ingest_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("git.yaml"), GIT_SETUP).unwrap();
        std::fs::write(dir.path().join("broken.yaml"), "id: [unterminated").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a manifest").unwrap();

        let store = ModuleStore::in_memory();
        assert_eq!(ingest_dir(&store, dir.path()).unwrap(), 1);
        assert!(store.contains("git_setup").unwrap());

        // second pass skips what is already there
        assert_eq!(ingest_dir(&store, dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_ingest_missing_dir() {
        let store = ModuleStore::in_memory();
        let missing = Path::new("/nonexistent/clio/modules");
        assert_eq!(ingest_dir(&store, missing).unwrap(), 0);
    }
}
