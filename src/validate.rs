//! Image URL validation heuristics
//!
//! These are string checks only. Nothing here downloads or sniffs images.

use crate::profiles;
use crate::retailer::Retailer;

/// Extensions accepted by the URL-level image check
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif", ".bmp"];

/// Extensions accepted when scraping a product page
pub const PAGE_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

const IMAGE_KEYWORDS: &[&str] = &["image", "img", "photo", "picture", "pic"];

/// True if the string parses with both a scheme and an authority
pub fn is_valid_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.has_host(),
        Err(_) => false,
    }
}

/// True if the URL looks like an image: an image extension or an
/// image-related keyword anywhere in the text. Will happily accept a
/// non-image URL that mentions "photo".
pub fn is_image_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
        || IMAGE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// True if the URL contains one of the retailer's domain tokens
pub fn is_retailer_image(url: &str, retailer: Retailer) -> bool {
    if url.is_empty() {
        return false;
    }
    profiles::profile(retailer).is_some_and(|p| p.matches_domain(url))
}

/// Acceptance test for image candidates found on a product page: non-empty,
/// served from the retailer's domains, with a recognised image extension.
pub fn is_valid_image_url(url: &str, retailer: Retailer) -> bool {
    let lower = url.to_lowercase();
    !url.is_empty()
        && is_retailer_image(url, retailer)
        && PAGE_IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext))
}
