//! Product image extractor for Indian e-commerce retailers
//!
//! Finds product image URLs and basic product details on pages from:
//! - Amazon, Flipkart, Myntra
//! - AJIO, Nykaa, TataCliq
//!
//! Each retailer is described by a data profile (selectors, script markers,
//! product id patterns, CDN templates and resolution rules) driving a single
//! extractor. `ProductImageExtractor` adds rate limiting, the image policy
//! and batch processing on top.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod logging;
pub mod normalize;
pub mod product;
pub mod profiles;
pub mod rate_limit;
pub mod retailer;
pub mod validate;

pub use config::{ExtractorConfig, ImagePolicy};
pub use dispatcher::ProductImageExtractor;
pub use error::{ExtractError, Result};
pub use extractors::{extract_product_id, generated_image_url, RetailerExtractor};
pub use fetch::{HttpFetcher, PageFetcher};
pub use normalize::{clean_url, high_res, placeholder_url};
pub use product::{save_reports, ProductRecord, ProductReport};
pub use retailer::Retailer;
pub use validate::{is_image_url, is_retailer_image, is_valid_image_url, is_valid_url};
