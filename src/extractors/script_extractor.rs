//! Image URLs embedded in inline `<script>` data
//!
//! Retailers ship their gallery as JSON or JS objects inside script tags.
//! Only scripts carrying one of the retailer's marker strings are scanned,
//! and only absolute https URLs ending in an image extension are taken.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static SCRIPT_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://[^"'\s<>\\]+?\.(?:jpe?g|png|webp)\b(?:\?[^"'\s<>\\]*)?"#)
        .expect("static regex")
});

/// Collect image URLs from scripts matched by `script_selector` whose text
/// contains any of `markers`, in document order.
pub fn extract_script_image_urls(
    document: &Html,
    script_selector: &Selector,
    markers: &[&str],
) -> Vec<String> {
    let mut urls = Vec::new();

    for element in document.select(script_selector) {
        let script = element.text().collect::<String>();
        if script.trim().is_empty() || !markers.iter().any(|m| script.contains(m)) {
            continue;
        }

        // JSON payloads usually escape forward slashes
        let script = script.replace("\\/", "/");
        let before = urls.len();
        urls.extend(
            SCRIPT_IMAGE_URL
                .find_iter(&script)
                .map(|m| m.as_str().to_string()),
        );
        debug!("Script with gallery marker yielded {} URLs", urls.len() - before);
    }

    urls
}
