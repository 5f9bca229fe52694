//! Product records and the JSON report written by the CLI

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::retailer::Retailer;

/// Longest description kept on a record, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Everything extracted for one product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    #[serde(rename = "url")]
    pub source_url: String,
    pub retailer: Retailer,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
}

impl ProductRecord {
    /// Record for a page that could not be read
    pub fn fallback(url: &str, retailer: Retailer) -> Self {
        Self {
            title: retailer.default_title(),
            source_url: url.to_string(),
            retailer,
            price: None,
            description: None,
            image_urls: vec![],
        }
    }

    /// Record for a URL no retailer claims
    pub fn unknown(url: &str) -> Self {
        Self {
            title: "Unknown Product".to_string(),
            ..Self::fallback(url, Retailer::Unknown)
        }
    }

    /// Stand-in for a batch entry whose extraction failed
    pub fn error(url: &str) -> Self {
        Self {
            title: "Error".to_string(),
            ..Self::fallback(url, Retailer::Unknown)
        }
    }

    pub fn into_report(self) -> ProductReport {
        ProductReport {
            record: self,
            extraction_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Cut `text` to at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// JSON document saved by `--output`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReport {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub extraction_time: String,
}

impl ProductReport {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(self, path.as_ref())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Save several reports as one JSON array
pub fn save_reports(reports: &[ProductReport], path: impl AsRef<Path>) -> Result<()> {
    write_json(reports, path.as_ref())
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    info!("Results saved to: {}", path.display());
    Ok(())
}
