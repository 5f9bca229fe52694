//! Per-retailer extraction profiles
//!
//! Every supported retailer is one row in this table. The extraction
//! pipeline is identical for all of them; only the data below differs.
//! Update the selectors here when a retailer changes its page markup.

use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

use crate::retailer::Retailer;

/// Regex rewrite that turns a thumbnail URL into a high-resolution one
#[derive(Debug)]
pub struct HighResRule {
    pub pattern: Regex,
    pub replacement: &'static str,
    /// Appended when the rewritten URL does not already end with it
    pub required_suffix: Option<&'static str>,
}

/// Static description of how to scrape one retailer
#[derive(Debug)]
pub struct RetailerProfile {
    pub retailer: Retailer,
    /// Substrings identifying the retailer's own and CDN hosts
    pub domain_tokens: &'static [&'static str],
    /// Image element selectors, tried in order
    pub image_selectors: Vec<Selector>,
    /// Attributes holding the image source, `src` first then lazy-load ones
    pub image_attributes: &'static [&'static str],
    /// Which script elements to scan for embedded gallery data
    pub script_selector: Selector,
    /// A script is only scanned if it contains one of these markers
    pub script_markers: &'static [&'static str],
    /// Product identifier patterns, tried in order; capture group 1 is the id
    pub id_patterns: Vec<Regex>,
    /// CDN URL with an `{id}` placeholder
    pub image_url_template: &'static str,
    pub high_res: HighResRule,
    pub title_selectors: Vec<Selector>,
    pub price_selectors: Vec<Selector>,
    pub description_selectors: Vec<Selector>,
    /// Hex colour used for placeholder images
    pub brand_colour: &'static str,
}

impl RetailerProfile {
    pub fn matches_domain(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        self.domain_tokens.iter().any(|t| lower.contains(t))
    }

    /// Image URL synthesised from a product identifier
    pub fn image_url_for(&self, product_id: &str) -> String {
        self.image_url_template.replace("{id}", product_id)
    }
}

const GENERIC_IMAGE_ATTRIBUTES: &[&str] = &["src", "data-src"];
const GENERIC_SCRIPT_MARKERS: &[&str] = &["imageGallery"];
const GENERIC_TITLE_SELECTORS: &[&str] = &[".pdp-name", ".product-title", "h1[class*=\"title\"]"];
const GENERIC_PRICE_SELECTORS: &[&str] = &[".pdp-price", ".price", "[class*=\"price\"]"];

/// Placeholder colour for retailers without a profile
pub const UNKNOWN_BRAND_COLOUR: &str = "6B7280";

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid built-in pattern {re:?}: {e}"))
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e}"))
}

fn selectors(list: &[&str]) -> Vec<Selector> {
    list.iter().map(|css| selector(css)).collect()
}

/// Forces a `/WxH.` path segment to 1080x1080
fn square_1080_rule() -> HighResRule {
    HighResRule {
        pattern: pattern(r"/\d+x\d+\."),
        replacement: "/1080x1080.",
        required_suffix: None,
    }
}

static PROFILES: LazyLock<Vec<RetailerProfile>> = LazyLock::new(|| {
    vec![
        RetailerProfile {
            retailer: Retailer::Amazon,
            domain_tokens: &["amazon", "ssl-images-amazon"],
            image_selectors: selectors(&[
                "#landingImage",
                ".a-dynamic-image",
                "#imgTagWrapperId img",
                ".a-button-selected img",
                "[data-old-hires]",
            ]),
            image_attributes: &["src", "data-src", "data-old-hires"],
            script_selector: selector(r#"script[type="application/json"]"#),
            script_markers: &["imageGalleryData", "colorImages"],
            id_patterns: vec![pattern(r"/dp/([A-Z0-9]{10})")],
            image_url_template: "https://images-na.ssl-images-amazon.com/images/P/{id}.01.L.jpg",
            high_res: HighResRule {
                // e.g. "._AC_SX679_." or "._SX300_SY300_QL70_FMwebp_."
                pattern: pattern(r"(?:\._[A-Za-z0-9_,]+)+\."),
                replacement: ".",
                required_suffix: Some(".jpg"),
            },
            title_selectors: selectors(&["#productTitle", ".product-title", "h1.a-size-large"]),
            price_selectors: selectors(&[
                ".a-price-whole",
                ".a-price .a-offscreen",
                "#priceblock_dealprice",
                "#priceblock_ourprice",
            ]),
            description_selectors: selectors(&["#feature-bullets ul", ".a-unordered-list"]),
            brand_colour: "FF9900",
        },
        RetailerProfile {
            retailer: Retailer::Flipkart,
            domain_tokens: &["flipkart", "flixcart"],
            image_selectors: selectors(&[
                "._396cs4",
                "._2r_T1I",
                "._1BweB1",
                ".CXW8mj img",
                "[data-testid=\"product-image\"]",
            ]),
            image_attributes: GENERIC_IMAGE_ATTRIBUTES,
            script_selector: selector("script"),
            script_markers: GENERIC_SCRIPT_MARKERS,
            id_patterns: vec![pattern(r"pid=([^&#]+)")],
            image_url_template: "https://rukminim1.flixcart.com/image/416/416/product/{id}.jpeg",
            high_res: HighResRule {
                pattern: pattern(r"/image/\d+/\d+/"),
                replacement: "/image/832/832/",
                required_suffix: None,
            },
            title_selectors: selectors(&[".B_NuCI", "._35KyD6", "h1[class*=\"title\"]"]),
            price_selectors: selectors(&["._30jeq3", "._1vC4OE", "._3qQ9m1"]),
            description_selectors: Vec::new(),
            brand_colour: "2874F0",
        },
        RetailerProfile {
            retailer: Retailer::Myntra,
            domain_tokens: &["myntra", "myntassets"],
            image_selectors: selectors(&[
                ".image-grid-image",
                ".pdp-product-image",
                ".product-image",
                "img[data-testid=\"product-image\"]",
            ]),
            image_attributes: GENERIC_IMAGE_ATTRIBUTES,
            script_selector: selector("script"),
            script_markers: GENERIC_SCRIPT_MARKERS,
            id_patterns: vec![
                pattern(r"/product/([^/?#]+)"),
                pattern(r"/p/([^/?#]+)"),
                pattern(r"/item/([^/?#]+)"),
                pattern(r"pid=([^&#]+)"),
            ],
            image_url_template: "https://assets.myntassets.com/images/{id}/1.jpg",
            high_res: square_1080_rule(),
            title_selectors: selectors(&[".pdp-product-name", ".pdp-name", "h1[class*=\"title\"]"]),
            price_selectors: selectors(GENERIC_PRICE_SELECTORS),
            description_selectors: Vec::new(),
            brand_colour: "FF3F6C",
        },
        RetailerProfile {
            retailer: Retailer::Ajio,
            domain_tokens: &["ajio", "assets.ajio"],
            image_selectors: selectors(&[
                ".prod-img",
                ".product-image",
                ".pdp-image",
                "img[data-testid=\"product-image\"]",
            ]),
            image_attributes: GENERIC_IMAGE_ATTRIBUTES,
            script_selector: selector("script"),
            script_markers: GENERIC_SCRIPT_MARKERS,
            id_patterns: vec![pattern(r"/p/([^/?#]+)")],
            image_url_template: "https://assets.ajio.com/images/{id}/1.jpg",
            high_res: square_1080_rule(),
            title_selectors: selectors(&[".prod-name", ".pdp-name", "h1[class*=\"title\"]"]),
            price_selectors: selectors(&[".prod-price", ".price", "[class*=\"price\"]"]),
            description_selectors: Vec::new(),
            brand_colour: "FF6B35",
        },
        RetailerProfile {
            retailer: Retailer::Nykaa,
            domain_tokens: &["nykaa", "images-static.nykaa"],
            image_selectors: selectors(&[
                ".product-image",
                ".pdp-image",
                ".prod-img",
                "img[data-testid=\"product-image\"]",
            ]),
            image_attributes: GENERIC_IMAGE_ATTRIBUTES,
            script_selector: selector("script"),
            script_markers: GENERIC_SCRIPT_MARKERS,
            id_patterns: vec![pattern(r"/p/([^/?#]+)")],
            image_url_template: "https://images-static.nykaa.com/images/{id}/1.jpg",
            high_res: square_1080_rule(),
            title_selectors: selectors(GENERIC_TITLE_SELECTORS),
            price_selectors: selectors(GENERIC_PRICE_SELECTORS),
            description_selectors: Vec::new(),
            brand_colour: "FF1493",
        },
        RetailerProfile {
            retailer: Retailer::Tatacliq,
            domain_tokens: &["tatacliq", "img.tatacliq"],
            image_selectors: selectors(&[
                ".product-image",
                ".pdp-image",
                ".prod-img",
                "img[data-testid=\"product-image\"]",
            ]),
            image_attributes: GENERIC_IMAGE_ATTRIBUTES,
            script_selector: selector("script"),
            script_markers: GENERIC_SCRIPT_MARKERS,
            id_patterns: vec![pattern(r"/p/([^/?#]+)")],
            image_url_template: "https://img.tatacliq.com/images/{id}/1.jpg",
            high_res: square_1080_rule(),
            title_selectors: selectors(GENERIC_TITLE_SELECTORS),
            price_selectors: selectors(GENERIC_PRICE_SELECTORS),
            description_selectors: Vec::new(),
            brand_colour: "000000",
        },
    ]
});

/// Profile for a retailer; `None` for `Retailer::Unknown`
pub fn profile(retailer: Retailer) -> Option<&'static RetailerProfile> {
    PROFILES.iter().find(|p| p.retailer == retailer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_retailer_has_a_profile() {
        for r in Retailer::ALL {
            let p = profile(r).unwrap();
            assert_eq!(p.retailer, r);
            assert!(p.domain_tokens.contains(&r.domain_token()));
            assert!(p.image_url_template.contains("{id}"));
        }
        assert!(profile(Retailer::Unknown).is_none());
    }

    #[test]
    fn test_profile_table_builds() {
        assert_eq!(PROFILES.len(), Retailer::ALL.len());
        for p in PROFILES.iter() {
            assert!(!p.image_selectors.is_empty(), "{}", p.retailer);
            assert!(!p.title_selectors.is_empty(), "{}", p.retailer);
        }
    }

    #[test]
    fn test_amazon_only_scans_json_scripts() {
        let document = scraper::Html::parse_document(
            r#"<script>var a = 1;</script><script type="application/json">{}</script>"#,
        );
        let amazon = profile(Retailer::Amazon).unwrap();
        assert_eq!(document.select(&amazon.script_selector).count(), 1);

        let flipkart = profile(Retailer::Flipkart).unwrap();
        assert_eq!(document.select(&flipkart.script_selector).count(), 2);
    }

    #[test]
    fn test_generated_urls_belong_to_retailer() {
        for r in Retailer::ALL {
            let p = profile(r).unwrap();
            assert!(p.matches_domain(&p.image_url_for("ABC123")), "{r}");
        }
    }
}
