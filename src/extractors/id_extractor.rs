//! Product identifiers from product page URLs
//!
//! The identifier (Amazon ASIN, Flipkart `pid`, path segment elsewhere) is
//! enough to build a canonical CDN image URL when scraping finds nothing.

use crate::profiles;
use crate::retailer::Retailer;

/// First identifier matched by the retailer's patterns, tried in order
pub fn extract_product_id(url: &str, retailer: Retailer) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    let profile = profiles::profile(retailer)?;
    profile.id_patterns.iter().find_map(|re| {
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|id| !id.is_empty())
    })
}

/// CDN image URL for a product identifier
pub fn generated_image_url(product_id: &str, retailer: Retailer) -> Option<String> {
    if product_id.is_empty() {
        return None;
    }
    profiles::profile(retailer).map(|p| p.image_url_for(product_id))
}
