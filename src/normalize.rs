//! Image URL normalisation: high-resolution rewrites and size stripping

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::profiles::{self, HighResRule, UNKNOWN_BRAND_COLOUR};
use crate::retailer::Retailer;

static SIZING_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&](?:w|h|q|quality|format)=[^&]*").expect("static regex"));
static INFIX_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d+x\d+_").expect("static regex"));
static SEGMENT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+x\d+/").expect("static regex"));
static TRAILING_QUERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&].*$").expect("static regex"));

/// Rewrite an image URL to the retailer's canonical high-resolution form.
///
/// Unknown retailers, empty strings and strings that do not parse as URLs
/// are returned unchanged. Applying the rewrite twice gives the same result
/// as applying it once.
pub fn high_res(url: &str, retailer: Retailer) -> String {
    let Some(profile) = profiles::profile(retailer) else {
        return url.to_string();
    };
    if url.is_empty() || url::Url::parse(url).is_err() {
        debug!("Not rewriting malformed image URL: {url:?}");
        return url.to_string();
    }

    // A required suffix can expose a new match, so run to a fixed point.
    let mut current = url.to_string();
    for _ in 0..4 {
        let next = rewrite_once(&current, &profile.high_res);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn rewrite_once(url: &str, rule: &HighResRule) -> String {
    let mut out = rule.pattern.replace_all(url, rule.replacement).into_owned();
    if let Some(suffix) = rule.required_suffix {
        if !out.ends_with(suffix) {
            out.push_str(suffix);
        }
    }
    out
}

/// Strip sizing query parameters, `WxH` size tokens and any trailing query
pub fn clean_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let url = SIZING_PARAM.replace_all(url, "");
    let url = INFIX_SIZE.replace_all(&url, "_");
    let url = SEGMENT_SIZE.replace_all(&url, "/");
    let url = TRAILING_QUERY.replace(&url, "");
    url.trim().to_string()
}

/// Branded placeholder image for products without any usable image
pub fn placeholder_url(retailer: Retailer, size: (u32, u32)) -> String {
    let colour = profiles::profile(retailer)
        .map(|p| p.brand_colour)
        .unwrap_or(UNKNOWN_BRAND_COLOUR);
    let (width, height) = size;
    format!(
        "https://via.placeholder.com/{width}x{height}/{colour}/FFFFFF?text={}",
        retailer.as_str().to_uppercase()
    )
}
