//! Page fetching
//!
//! Extraction only needs "give me the HTML behind this URL". `PageFetcher`
//! is that seam; `HttpFetcher` is the real implementation on top of a
//! blocking `ureq` agent.

use std::time::Duration;
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};

/// Browser-like headers sent with every page request
const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
];

/// Source of product page HTML
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

impl<F> PageFetcher for F
where
    F: Fn(&str) -> Result<String>,
{
    fn fetch(&self, url: &str) -> Result<String> {
        self(url)
    }
}

/// Blocking HTTP fetcher with a global per-request timeout
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .user_agent(user_agent)
                .http_status_as_error(false)
                .build(),
        );
        Self { agent }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(&config.user_agent, config.request_timeout())
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {url}");
        let mut request = self.agent.get(url);
        for (name, value) in BROWSER_HEADERS {
            request = request.header(*name, *value);
        }

        let resp = request.call()?;
        if !resp.status().is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        resp.into_body()
            .read_to_string()
            .map_err(|e| ExtractError::Body {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}
