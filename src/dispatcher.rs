//! Entry point tying classification, rate limiting, extraction and the
//! image policy together

use std::collections::HashSet;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::config::{ExtractorConfig, ImagePolicy};
use crate::error::{ExtractError, Result};
use crate::extractors::RetailerExtractor;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::normalize::high_res;
use crate::product::ProductRecord;
use crate::rate_limit::RateLimiter;
use crate::retailer::Retailer;
use crate::validate::{is_image_url, is_retailer_image, is_valid_url};

/// Extracts product images and details from any supported retailer URL.
///
/// All calls are sequential and blocking. One rate limiter is shared by
/// every call made through this instance.
pub struct ProductImageExtractor {
    fetcher: Box<dyn PageFetcher>,
    rate_limiter: RateLimiter,
    policy: ImagePolicy,
    max_images: usize,
    batch_delay: Duration,
}

impl ProductImageExtractor {
    /// Extractor backed by a real HTTP client
    pub fn new(config: &ExtractorConfig) -> Self {
        Self::with_fetcher(config, HttpFetcher::from_config(config))
    }

    pub fn with_fetcher(config: &ExtractorConfig, fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            rate_limiter: RateLimiter::new(config.rate_limit_delay()),
            policy: config.image_policy.clone(),
            max_images: config.max_images,
            batch_delay: config.batch_delay(),
        }
    }

    pub fn detect_retailer(&self, url: &str) -> Retailer {
        let retailer = Retailer::classify(url);
        info!("Detected retailer: {retailer} for URL: {url}");
        retailer
    }

    fn extractor_for(&self, retailer: Retailer) -> Option<RetailerExtractor> {
        RetailerExtractor::new(retailer).map(|ex| ex.with_max_images(self.max_images))
    }

    /// Image URLs for a product page, filtered and rewritten by the image
    /// policy. Invalid input URLs, unsupported retailers and fetch failures
    /// all give an empty list.
    pub fn extract_images(&self, url: &str) -> Vec<String> {
        if !is_valid_url(url) {
            error!("Invalid URL: {url}");
            return vec![];
        }

        let retailer = self.detect_retailer(url);
        let Some(extractor) = self.extractor_for(retailer) else {
            warn!("No extractor available for retailer: {retailer}");
            return vec![];
        };

        self.rate_limiter.wait();
        let images = extractor.extract_images(self.fetcher.as_ref(), url);
        self.apply_policy(images, retailer)
    }

    /// Product details, or a fallback record if the page cannot be read
    pub fn product_info(&self, url: &str) -> ProductRecord {
        self.try_product_info(url).unwrap_or_else(|e| {
            let retailer = Retailer::classify(url);
            error!("Error getting {} product info: {e}", retailer.display_name());
            ProductRecord::fallback(url, retailer)
        })
    }

    /// Product details; unsupported retailers give the "Unknown Product"
    /// record, fetch failures are returned as errors.
    pub fn try_product_info(&self, url: &str) -> Result<ProductRecord> {
        let retailer = self.detect_retailer(url);
        let Some(extractor) = self.extractor_for(retailer) else {
            warn!("No extractor available for retailer: {retailer}");
            return Ok(ProductRecord::unknown(url));
        };

        self.rate_limiter.wait();
        let mut record = extractor.try_product_info(self.fetcher.as_ref(), url)?;
        record.image_urls = self.apply_policy(record.image_urls, retailer);
        Ok(record)
    }

    /// Process URLs one after another, pausing between them. A failing URL
    /// is replaced by an error record and never stops the batch.
    pub fn extract_multiple_products<S: AsRef<str>>(&self, urls: &[S]) -> Vec<ProductRecord> {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for (i, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            if i > 0 && !self.batch_delay.is_zero() {
                std::thread::sleep(self.batch_delay);
            }
            info!("Processing product {}/{total}: {url}", i + 1);

            let record = self.try_product_info(url).unwrap_or_else(|e| {
                error!("Error processing {url}: {e}");
                ProductRecord::error(url)
            });
            results.push(record);
        }

        results
    }

    /// Keep only URLs the policy accepts, rewritten if the policy says so
    pub fn apply_policy(&self, images: Vec<String>, retailer: Retailer) -> Vec<String> {
        let mut seen = HashSet::new();
        images
            .into_iter()
            .filter(|url| !self.policy.require_image_hint || is_image_url(url))
            .filter(|url| !self.policy.require_retailer_domain || is_retailer_image(url, retailer))
            .map(|url| {
                if self.policy.upgrade_resolution {
                    high_res(&url, retailer)
                } else {
                    url
                }
            })
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    /// Raw page HTML through the shared rate limiter. Only URLs of a
    /// supported retailer are fetched.
    pub fn fetch_page(&self, url: &str) -> Result<String> {
        if !is_valid_url(url) {
            return Err(ExtractError::InvalidUrl(url.to_string()));
        }
        if !Retailer::classify(url).is_known() {
            return Err(ExtractError::UnsupportedRetailer(url.to_string()));
        }
        self.rate_limiter.wait();
        self.fetcher.fetch(url)
    }
}
