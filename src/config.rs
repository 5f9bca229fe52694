//! Extractor configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Post-extraction checks applied by the dispatcher to every image URL.
/// All checks are on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePolicy {
    /// Keep only URLs with an image extension or image keyword
    pub require_image_hint: bool,
    /// Keep only URLs served from the retailer's own domains
    pub require_retailer_domain: bool,
    /// Rewrite kept URLs to the retailer's high-resolution form
    pub upgrade_resolution: bool,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            require_image_hint: true,
            require_retailer_domain: true,
            upgrade_resolution: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Minimum gap between two requests through the shared rate limiter
    pub rate_limit_delay_ms: u64,
    /// Pause between products in a batch run
    pub batch_delay_ms: u64,
    /// Upper bound on images returned per product, never more than 5
    pub max_images: usize,
    pub user_agent: String,
    pub image_policy: ImagePolicy,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            rate_limit_delay_ms: 1000,
            batch_delay_ms: 1000,
            max_images: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            image_policy: ImagePolicy::default(),
        }
    }
}

impl ExtractorConfig {
    /// Load from a JSON file; absent keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}
