//! Retailer identifiers and URL classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported retailers, plus `Unknown` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Retailer {
    Amazon,
    Flipkart,
    Myntra,
    Ajio,
    Nykaa,
    Tatacliq,
    Unknown,
}

impl Retailer {
    /// Known retailers in classification priority order
    pub const ALL: [Retailer; 6] = [
        Retailer::Amazon,
        Retailer::Flipkart,
        Retailer::Myntra,
        Retailer::Ajio,
        Retailer::Nykaa,
        Retailer::Tatacliq,
    ];

    /// Classify a product URL by case-insensitive substring match on the
    /// retailer's domain token. The first retailer in `ALL` order wins.
    pub fn classify(url: &str) -> Retailer {
        let lower = url.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| lower.contains(r.domain_token()))
            .unwrap_or(Retailer::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Retailer::Amazon => "amazon",
            Retailer::Flipkart => "flipkart",
            Retailer::Myntra => "myntra",
            Retailer::Ajio => "ajio",
            Retailer::Nykaa => "nykaa",
            Retailer::Tatacliq => "tatacliq",
            Retailer::Unknown => "unknown",
        }
    }

    /// Token that identifies the retailer inside a product page URL.
    /// `Unknown` has an empty token and is never matched by `classify`.
    pub fn domain_token(self) -> &'static str {
        match self {
            Retailer::Unknown => "",
            other => other.as_str(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Retailer::Amazon => "Amazon",
            Retailer::Flipkart => "Flipkart",
            Retailer::Myntra => "Myntra",
            Retailer::Ajio => "AJIO",
            Retailer::Nykaa => "Nykaa",
            Retailer::Tatacliq => "TataCliq",
            Retailer::Unknown => "Unknown",
        }
    }

    /// Title used when a product page could not be read
    pub fn default_title(self) -> String {
        format!("{} Product", self.display_name())
    }

    pub fn is_known(self) -> bool {
        self != Retailer::Unknown
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Retailer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .chain(std::iter::once(Retailer::Unknown))
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| format!("unknown retailer identifier: {s}"))
    }
}
