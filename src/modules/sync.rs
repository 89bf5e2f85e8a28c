//! Pull module manifests from a remote directory listing
//!
//! The listing follows the GitHub contents API shape: an array of
//! `{name, type, download_url}` entries. Each `*.yaml` file is downloaded,
//! validated and upserted into the store.

use crate::core::config::ResolverConfig;
use crate::core::error::{ClioError, Result};
use crate::modules::manifest::ModuleManifest;
use crate::modules::store::ModuleStore;
use crate::providers::remote::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Pause between downloads to stay under API rate limits
const DOWNLOAD_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ListingEntry {
    fn manifest_url(&self) -> Option<&str> {
        if self.kind != "file" || !self.name.ends_with(".yaml") {
            return None;
        }
        self.download_url.as_deref()
    }
}

pub struct ModuleSync {
    client: Client,
    listing_url: String,
    delay: Duration,
}

impl ModuleSync {
    pub fn new(listing_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClioError::Sync(e.to_string()))?;
        Ok(Self {
            client,
            listing_url: listing_url.into(),
            delay: DOWNLOAD_DELAY,
        })
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::new(
            config.modules_listing_url.clone(),
            Duration::from_secs(config.remote_timeout_secs),
        )
    }

    /// Override the pause between downloads
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Download every manifest in the listing into `store`
    ///
    /// Individual manifest failures are logged and skipped. Returns the
    /// number of modules updated.
    pub async fn sync(&self, store: &ModuleStore) -> Result<usize> {
        tracing::info!("Syncing modules from {}", self.listing_url);

        let entries = self.fetch_listing().await?;
        let mut updated = 0;

        for entry in &entries {
            let Some(url) = entry.manifest_url() else {
                continue;
            };

            match self.fetch_manifest(url).await {
                Ok(manifest) => {
                    store.upsert(manifest.into_record())?;
                    updated += 1;
                }
                Err(e) => tracing::warn!("Failed {}: {}", entry.name, e),
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        store.save()?;
        tracing::info!("Sync complete. Updated {} modules.", updated);
        Ok(updated)
    }

    async fn fetch_listing(&self) -> Result<Vec<ListingEntry>> {
        let response = self
            .client
            .get(&self.listing_url)
            .send()
            .await
            .map_err(|e| ClioError::Sync(format!("failed to fetch module list: {}", e)))?;

        if !response.status().is_success() {
            return Err(ClioError::Sync(format!(
                "module listing returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ClioError::Sync(format!("invalid module listing: {}", e)))
    }

    async fn fetch_manifest(&self, url: &str) -> Result<ModuleManifest> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClioError::Sync(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClioError::Sync(format!("{} returned {}", url, response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClioError::Sync(e.to_string()))?;
        ModuleManifest::parse(&body)
    }
}
