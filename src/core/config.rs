//! Resolver configuration with documented constants
//!
//! Every threshold and confidence the cascade uses lives here, so the
//! tier policy can be read (and tuned) in one place.

use crate::core::error::{ClioError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default endpoint for the remote command search
pub const DEFAULT_REMOTE_URL: &str = "https://clipilot.themobileprof.com/api/commands/search";

/// Default directory listing that module sync pulls manifests from
pub const DEFAULT_LISTING_URL: &str =
    "https://api.github.com/repos/themobileprof/clipilot/contents/modules";

/// Configuration for the resolution cascade
///
/// Tier order is fixed (static, man, module, remote) and does not follow
/// the confidence values below: the module tier reports a higher
/// confidence than the man tier but is tried after it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    // === STATIC TIER ===
    /// Confidence reported for an exact catalog hit
    pub static_confidence: f64,

    /// Noun assumed when only a verb is recognized
    ///
    /// Biases bare verbs ("list", "copy") toward their most common object.
    /// Only applied when the catalog has an entry for the verb and this noun.
    /// `None` (an empty string in TOML) disables the policy.
    pub default_noun: Option<String>,

    /// Run the edit-distance correction pass when the exact lookup misses
    ///
    /// Off by default: it can turn short typos into confident answers.
    pub fuzzy_fallback: bool,

    /// Largest edit distance the correction pass accepts
    pub fuzzy_max_distance: usize,

    /// Confidence reported for a catalog hit reached through correction
    pub fuzzy_confidence: f64,

    // === MAN TIER ===
    /// Top man-page candidate must score strictly above this
    ///
    /// One keyword hit is worth 10, so the bar demands more than a single
    /// bare appearance in the apropos output.
    pub man_score_threshold: u32,

    /// Confidence reported for an accepted man-page candidate
    pub man_confidence: f64,

    // === MODULE TIER ===
    /// Confidence reported for a module store hit
    pub module_confidence: f64,

    // === REMOTE TIER ===
    /// Confidence reported for a remote search hit
    pub remote_confidence: f64,

    /// Remote search endpoint
    pub remote_url: String,

    /// Per-request timeout for the remote search, in seconds
    pub remote_timeout_secs: u64,

    // === PROVIDERS ===
    /// Maximum candidates any provider returns
    pub provider_result_limit: usize,

    /// Directory holding the module store and manifests (default ~/.clio)
    pub data_dir: Option<PathBuf>,

    /// Manifest listing used by module sync
    pub modules_listing_url: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            static_confidence: 1.0,
            default_noun: Some("file".into()),
            fuzzy_fallback: false,
            fuzzy_max_distance: 2,
            fuzzy_confidence: 0.9,

            man_score_threshold: 10,
            man_confidence: 0.8,

            module_confidence: 0.85,

            remote_confidence: 0.7,
            remote_url: DEFAULT_REMOTE_URL.into(),
            remote_timeout_secs: 5,

            provider_result_limit: 5,
            data_dir: None,
            modules_listing_url: DEFAULT_LISTING_URL.into(),
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: ResolverConfig = toml::from_str(content)?;
        if config.default_noun.as_deref() == Some("") {
            config.default_noun = None;
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides
    ///
    /// Optional: CLIO_REMOTE_URL, CLIO_DATA_DIR
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("CLIO_REMOTE_URL") {
            self.remote_url = url;
        }
        if let Ok(dir) = std::env::var("CLIO_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Resolved data directory, if one can be determined
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".clio")))
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let confidences = [
            ("static_confidence", self.static_confidence),
            ("fuzzy_confidence", self.fuzzy_confidence),
            ("man_confidence", self.man_confidence),
            ("module_confidence", self.module_confidence),
            ("remote_confidence", self.remote_confidence),
        ];
        for (name, value) in confidences {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClioError::Config(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        if self.remote_timeout_secs == 0 {
            return Err(ClioError::Config("remote_timeout_secs must be positive".into()));
        }

        if self.provider_result_limit == 0 {
            return Err(ClioError::Config("provider_result_limit must be positive".into()));
        }

        Ok(())
    }
}
