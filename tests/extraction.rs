//! End-to-end extraction through the dispatcher with canned pages

use std::collections::HashMap;

use retail_images::{
    save_reports, ExtractError, ExtractorConfig, PageFetcher, ProductImageExtractor,
    ProductRecord, ProductReport, Retailer,
};

/// Serves fixed HTML per URL; anything else fails like an unreachable host
#[derive(Default)]
struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> retail_images::Result<String> {
        self.pages.get(url).cloned().ok_or_else(|| ExtractError::Status {
            url: url.to_string(),
            status: 502,
        })
    }
}

fn extractor(fetcher: StubFetcher) -> ProductImageExtractor {
    let config = ExtractorConfig {
        rate_limit_delay_ms: 0,
        batch_delay_ms: 0,
        ..ExtractorConfig::default()
    };
    ProductImageExtractor::with_fetcher(&config, fetcher)
}

const AMAZON_URL: &str = "https://www.amazon.in/dp/B08X123456";
const MYNTRA_URL: &str = "https://www.myntra.com/tshirts/product/1234567";

#[test]
fn test_amazon_unreachable_degrades() {
    let ex = extractor(StubFetcher::default());

    assert!(ex.extract_images(AMAZON_URL).is_empty());

    let record = ex.product_info(AMAZON_URL);
    assert_eq!(record.title, "Amazon Product");
    assert_eq!(record.retailer, Retailer::Amazon);
    assert_eq!(record.source_url, AMAZON_URL);
    assert!(record.image_urls.is_empty());
    assert!(record.price.is_none());
}

#[test]
fn test_flipkart_pid_generates_high_res_url() {
    let url = "https://flipkart.com/product/x?pid=ABC123";
    let ex = extractor(StubFetcher::default().with_page(url, "<html><body></body></html>"));

    assert_eq!(
        ex.extract_images(url),
        vec!["https://rukminim1.flixcart.com/image/832/832/product/ABC123.jpeg"]
    );
}

#[test]
fn test_flipkart_pid_stops_at_fragment() {
    let url = "https://www.flipkart.com/x/p/itm?pid=ABC123#reviews";
    let ex = extractor(StubFetcher::default().with_page(url, "<html></html>"));

    assert_eq!(
        ex.extract_images(url),
        vec!["https://rukminim1.flixcart.com/image/832/832/product/ABC123.jpeg"]
    );
}

#[test]
fn test_configured_cap_never_exceeds_five() {
    let imgs: String = (0..9)
        .map(|i| format!(r#"<img class="image-grid-image" src="https://assets.myntassets.com/p/{i}/300x400.jpg">"#))
        .collect();
    let config = ExtractorConfig {
        rate_limit_delay_ms: 0,
        batch_delay_ms: 0,
        max_images: 8,
        ..ExtractorConfig::default()
    };
    let ex = ProductImageExtractor::with_fetcher(
        &config,
        StubFetcher::default().with_page(MYNTRA_URL, &format!("<html><body>{imgs}</body></html>")),
    );

    assert_eq!(ex.extract_images(MYNTRA_URL).len(), 5);
    assert_eq!(ex.product_info(MYNTRA_URL).image_urls.len(), 5);
}

#[test]
fn test_images_are_capped_and_unique() {
    let html = r#"
        <html><body>
            <img class="image-grid-image" src="https://assets.myntassets.com/p/a/300x400.jpg">
            <img class="image-grid-image" src="https://assets.myntassets.com/p/a/600x800.jpg">
            <img class="image-grid-image" src="https://assets.myntassets.com/p/b/300x400.jpg">
            <img class="image-grid-image" src="https://assets.myntassets.com/p/c/300x400.jpg">
            <img class="image-grid-image" src="https://assets.myntassets.com/p/d/300x400.jpg">
            <img class="image-grid-image" src="https://assets.myntassets.com/p/e/300x400.jpg">
            <img class="image-grid-image" src="https://assets.myntassets.com/p/f/300x400.jpg">
            <img class="image-grid-image" src="https://tracker.example.com/pixel.jpg">
        </body></html>
    "#;
    let ex = extractor(StubFetcher::default().with_page(MYNTRA_URL, html));

    let images = ex.extract_images(MYNTRA_URL);
    assert_eq!(
        images,
        vec![
            "https://assets.myntassets.com/p/a/1080x1080.jpg",
            "https://assets.myntassets.com/p/b/1080x1080.jpg",
            "https://assets.myntassets.com/p/c/1080x1080.jpg",
            "https://assets.myntassets.com/p/d/1080x1080.jpg",
            "https://assets.myntassets.com/p/e/1080x1080.jpg",
        ]
    );
}

#[test]
fn test_product_info_from_page() {
    let html = r#"
        <html>
        <head>
            <script type="application/json">{"colorImages": {"initial": [{"hiRes": "https:\/\/m.media-amazon.com\/images\/I\/71gallery._AC_SL1500_.jpg"}]}}</script>
            <script>var colorImages = {"initial": [{"hiRes": "https://m.media-amazon.com/images/I/71inline._AC_SL1500_.jpg"}]};</script>
        </head>
        <body>
            <span id="productTitle">  Wireless Earbuds  </span>
            <span class="a-price"><span class="a-offscreen">₹1,999</span></span>
            <div id="feature-bullets"><ul><li>Long battery life</li></ul></div>
            <img id="landingImage" data-old-hires="https://m.media-amazon.com/images/I/71main._AC_SX679_.jpg">
        </body>
        </html>
    "#;
    let ex = extractor(StubFetcher::default().with_page(AMAZON_URL, html));

    let record = ex.product_info(AMAZON_URL);
    assert_eq!(record.title, "Wireless Earbuds");
    assert_eq!(record.price.as_deref(), Some("₹1,999"));
    assert_eq!(record.description.as_deref(), Some("Long battery life"));
    assert_eq!(
        record.image_urls,
        vec![
            "https://m.media-amazon.com/images/I/71main.jpg",
            "https://m.media-amazon.com/images/I/71gallery.jpg",
            "https://images-na.ssl-images-amazon.com/images/P/B08X123456.01.L.jpg",
        ]
    );
}

#[test]
fn test_unknown_and_invalid_urls() {
    let ex = extractor(StubFetcher::default());

    assert!(ex.extract_images("https://www.example.com/item/1").is_empty());
    assert!(ex.extract_images("not a url").is_empty());

    let record = ex.product_info("https://www.example.com/item/1");
    assert_eq!(record.title, "Unknown Product");
    assert_eq!(record.retailer, Retailer::Unknown);
}

#[test]
fn test_batch_survives_a_failure() {
    let first = "https://www.nykaa.com/lipstick/p/111";
    let second = "https://www.ajio.com/shirt/p/222";
    let third = "https://www.tatacliq.com/watch/p/333";
    let ex = extractor(
        StubFetcher::default()
            .with_page(first, r#"<h1 class="product-title">Matte Lipstick</h1>"#)
            .with_page(third, "<html></html>"),
    );

    let records = ex.extract_multiple_products(&[first, second, third]);
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].retailer, Retailer::Nykaa);
    assert_eq!(records[0].title, "Matte Lipstick");
    assert_eq!(
        records[0].image_urls,
        vec!["https://images-static.nykaa.com/images/111/1.jpg"]
    );

    assert_eq!(records[1], ProductRecord::error(second));

    assert_eq!(records[2].retailer, Retailer::Tatacliq);
    assert_eq!(records[2].title, "TataCliq Product");
}

#[test]
fn test_reports_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let ex = extractor(StubFetcher::default());

    let report = ex.product_info(AMAZON_URL).into_report();
    let single = dir.path().join("single.json");
    report.save(&single).unwrap();
    assert_eq!(ProductReport::load(&single).unwrap(), report);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&single).unwrap()).unwrap();
    assert_eq!(raw["url"], AMAZON_URL);
    assert_eq!(raw["retailer"], "amazon");
    assert!(raw["price"].is_null());
    assert!(raw["extraction_time"].is_string());

    let batch = dir.path().join("batch.json");
    let reports: Vec<_> = ex
        .extract_multiple_products(&[AMAZON_URL, "https://www.example.com/x"])
        .into_iter()
        .map(ProductRecord::into_report)
        .collect();
    save_reports(&reports, &batch).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&batch).unwrap()).unwrap();
    assert_eq!(raw.as_array().map(Vec::len), Some(2));
    assert_eq!(raw[1]["title"], "Unknown Product");
}
