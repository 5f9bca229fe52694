//! Error types shared by fetching, extraction and report output

use thiserror::Error;

/// Everything that can go wrong while turning a product URL into a record.
///
/// A selector or pattern that matches nothing is not an error; it simply
/// yields fewer images.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("network error: {0}")]
    Network(#[from] ureq::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("no extractor registered for {0}")]
    UnsupportedRetailer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
