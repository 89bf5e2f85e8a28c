//! HTTP client for the remote command search
//!
//! Last tier of the cascade. Sends the user's request verbatim along with
//! the host OS and architecture, and gives up after a short timeout.

use crate::core::config::ResolverConfig;
use crate::core::error::{ClioError, ProviderError, Result};
use crate::providers::{RemoteHit, RemoteProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User agent sent with every remote request
pub const USER_AGENT: &str = concat!("clio/", env!("CARGO_PKG_VERSION"));

pub struct RemoteSearch {
    client: Client,
    url: String,
    limit: usize,
}

impl RemoteSearch {
    pub fn new(url: impl Into<String>, timeout: Duration, limit: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClioError::Provider(ProviderError::Transport(e.to_string())))?;
        Ok(Self {
            client,
            url: url.into(),
            limit,
        })
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::new(
            config.remote_url.clone(),
            Duration::from_secs(config.remote_timeout_secs),
            config.provider_result_limit,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RemoteProvider for RemoteSearch {
    async fn search_remote(&self, input: &str) -> std::result::Result<Vec<RemoteHit>, ProviderError> {
        let request = SearchRequest {
            query: input,
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "remote search returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| match classify(e) {
                ProviderError::Transport(msg) => ProviderError::Parse(msg),
                other => other,
            })?;

        let mut results = body.results;
        results.truncate(self.limit);
        Ok(results)
    }
}

fn classify(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_decode() {
        ProviderError::Parse(e.to_string())
    } else {
        ProviderError::Transport(e.to_string())
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    os: &'a str,
    arch: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RemoteHit>,
}
