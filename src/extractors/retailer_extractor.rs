//! One extractor, parameterised by a retailer profile
//!
//! Image extraction runs three strategies in order and merges their output:
//! 1. CSS selectors over image elements
//! 2. gallery data embedded in inline scripts
//! 3. a CDN URL built from the product identifier in the page URL
//!
//! Every kept URL is rewritten to high resolution and deduplicated by exact
//! string equality, first occurrence wins.

use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, error, info};
use url::Url;

use super::css_extractor::{extract_first_text, extract_image_sources};
use super::id_extractor::extract_product_id;
use super::script_extractor::extract_script_image_urls;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::normalize::high_res;
use crate::product::{truncate_chars, ProductRecord, MAX_DESCRIPTION_CHARS};
use crate::profiles::{self, RetailerProfile};
use crate::retailer::Retailer;
use crate::validate::is_valid_image_url;

pub const DEFAULT_MAX_IMAGES: usize = 5;

/// Ordered, deduplicated image list
#[derive(Debug, Default)]
struct ImageList {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl ImageList {
    fn push(&mut self, url: String) {
        if self.seen.insert(url.clone()) {
            self.urls.push(url);
        }
    }

    fn len(&self) -> usize {
        self.urls.len()
    }

    fn into_vec(self, max: usize) -> Vec<String> {
        let mut urls = self.urls;
        urls.truncate(max);
        urls
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetailerExtractor {
    profile: &'static RetailerProfile,
    max_images: usize,
}

impl RetailerExtractor {
    /// `None` for `Retailer::Unknown`, which has no extraction strategy
    pub fn new(retailer: Retailer) -> Option<Self> {
        profiles::profile(retailer).map(|profile| Self {
            profile,
            max_images: DEFAULT_MAX_IMAGES,
        })
    }

    /// Lower the image cap; values above `DEFAULT_MAX_IMAGES` are clamped
    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = max_images.min(DEFAULT_MAX_IMAGES);
        self
    }

    pub fn retailer(&self) -> Retailer {
        self.profile.retailer
    }

    fn name(&self) -> &'static str {
        self.profile.retailer.display_name()
    }

    /// Fetch the page and extract its images. Never fails: fetch errors are
    /// logged and produce an empty list.
    pub fn extract_images(&self, fetcher: &dyn PageFetcher, url: &str) -> Vec<String> {
        info!("Extracting images from {} URL: {url}", self.name());
        match fetcher.fetch(url) {
            Ok(html) => self.images_from_html(url, &html),
            Err(e) => {
                error!("Error extracting {} images: {e}", self.name());
                vec![]
            }
        }
    }

    /// Run all image strategies over already fetched HTML
    pub fn images_from_html(&self, page_url: &str, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        self.images_from_document(page_url, &document)
    }

    fn images_from_document(&self, page_url: &str, document: &Html) -> Vec<String> {
        let retailer = self.retailer();
        let base = Url::parse(page_url).ok();
        let mut images = ImageList::default();

        let sources = extract_image_sources(
            document,
            &self.profile.image_selectors,
            self.profile.image_attributes,
        );
        for src in sources {
            let Some(absolute) = resolve(base.as_ref(), &src) else {
                continue;
            };
            if is_valid_image_url(&absolute, retailer) {
                images.push(high_res(&absolute, retailer));
            }
        }
        debug!("{} images after selector pass", images.len());

        let embedded = extract_script_image_urls(
            document,
            &self.profile.script_selector,
            self.profile.script_markers,
        );
        for candidate in embedded {
            if is_valid_image_url(&candidate, retailer) {
                images.push(high_res(&candidate, retailer));
            }
        }
        debug!("{} images after script pass", images.len());

        if let Some(product_id) = extract_product_id(page_url, retailer) {
            let generated = self.profile.image_url_for(&product_id);
            debug!("Product id {product_id} -> {generated}");
            images.push(high_res(&generated, retailer));
        }

        info!("Found {} images for {} product", images.len(), self.name());
        images.into_vec(self.max_images)
    }

    /// Fetch the page and read title, price, description and images
    pub fn try_product_info(&self, fetcher: &dyn PageFetcher, url: &str) -> Result<ProductRecord> {
        let html = fetcher.fetch(url)?;
        Ok(self.info_from_html(url, &html))
    }

    /// Like `try_product_info`, but any failure yields the retailer's
    /// fallback record with no images, price or description.
    pub fn product_info(&self, fetcher: &dyn PageFetcher, url: &str) -> ProductRecord {
        self.try_product_info(fetcher, url).unwrap_or_else(|e| {
            error!("Error getting {} product info: {e}", self.name());
            ProductRecord::fallback(url, self.retailer())
        })
    }

    pub fn info_from_html(&self, page_url: &str, html: &str) -> ProductRecord {
        let document = Html::parse_document(html);

        let title = extract_first_text(&document, &self.profile.title_selectors)
            .unwrap_or_else(|| self.retailer().default_title());
        let price = extract_first_text(&document, &self.profile.price_selectors);
        let description = extract_first_text(&document, &self.profile.description_selectors)
            .map(|d| truncate_chars(&d, MAX_DESCRIPTION_CHARS));

        ProductRecord {
            title,
            source_url: page_url.to_string(),
            retailer: self.retailer(),
            price,
            description,
            image_urls: self.images_from_document(page_url, &document),
        }
    }
}

/// Absolute http(s) form of an attribute value, resolved against the page
fn resolve(base: Option<&Url>, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    let absolute = match base {
        Some(base) => base.join(src).ok()?,
        None => Url::parse(src).ok()?,
    };
    matches!(absolute.scheme(), "http" | "https").then(|| absolute.to_string())
}
