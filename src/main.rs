use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use retail_images::logging::{init_logging, LoggingConfig, DEFAULT_LOG_FILE};
use retail_images::{
    placeholder_url, save_reports, ExtractorConfig, ProductImageExtractor, ProductRecord,
};

const RULE_WIDTH: usize = 60;
const PLACEHOLDER_SIZE: (u32, u32) = (400, 400);

/// Extract product images from Indian e-commerce websites
#[derive(Parser, Debug)]
#[command(name = "retail-images", version, long_about = None)]
struct Args {
    /// Product URL(s) to extract images from
    #[arg(required = true, num_args = 1..)]
    urls: Vec<String>,

    /// Output file to save results (JSON format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with extractor settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log to the console only
    #[arg(long)]
    no_log_file: bool,
}

fn banner(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{rule}");
    println!("{title}");
    println!("{rule}");
}

fn print_record(record: &ProductRecord) {
    banner("PRODUCT INFORMATION");
    println!("Title: {}", record.title);
    println!("Retailer: {}", record.retailer);
    println!("URL: {}", record.source_url);
    println!("Price: {}", record.price.as_deref().unwrap_or("N/A"));
    println!("Description: {}", record.description.as_deref().unwrap_or("N/A"));
    println!("\nImages found: {}", record.image_urls.len());

    if record.image_urls.is_empty() {
        println!("\nNo images found!");
        println!("Placeholder: {}", placeholder_url(record.retailer, PLACEHOLDER_SIZE));
    } else {
        banner("IMAGE URLs");
        for (i, url) in record.image_urls.iter().enumerate() {
            println!("{}. {url}", i + 1);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _guard = init_logging(&LoggingConfig {
        verbose: args.verbose,
        log_file: (!args.no_log_file).then(|| PathBuf::from(DEFAULT_LOG_FILE)),
    })?;

    let config = match &args.config {
        Some(path) => ExtractorConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ExtractorConfig::default(),
    };
    let extractor = ProductImageExtractor::new(&config);

    if let [url] = args.urls.as_slice() {
        info!("Starting image extraction for: {url}");
        let record = extractor.product_info(url);
        print_record(&record);

        if let Some(path) = &args.output {
            record
                .into_report()
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        return Ok(());
    }

    info!("Starting batch extraction for {} URLs", args.urls.len());
    let records = extractor.extract_multiple_products(&args.urls);
    for record in &records {
        print_record(record);
    }

    if let Some(path) = &args.output {
        let reports: Vec<_> = records.into_iter().map(ProductRecord::into_report).collect();
        save_reports(&reports, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
