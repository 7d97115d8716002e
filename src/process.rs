use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;

use crate::config::Config;
use crate::input::load_skus;
use crate::parse::{CatalogSearchParser, PageParser};
use crate::report::write_report;
use crate::request::{build_client, Resolution, Resolver};
use crate::{error_time, info_time, Result};

/// Runs the whole batch with the site's default page parser.
pub async fn process_skus(cfg: &Config) -> Result<PathBuf> {
    let parser = Arc::new(CatalogSearchParser::praktis()?);
    process_skus_with(cfg, parser).await
}

/// Loads the SKUs, resolves them one by one with a pause after each request
/// and writes the report. Returns the path of the written file.
pub async fn process_skus_with(cfg: &Config, parser: Arc<dyn PageParser>) -> Result<PathBuf> {
    info_time!("Starting SKU URL check. Input: {}", cfg.input.display());

    let skus = load_skus(&cfg.input, cfg.has_header).inspect_err(|e| {
        error_time!("Error reading input file {}: {e}", cfg.input.display());
    })?;
    info_time!("Loaded {} SKUs", skus.len());

    let client = build_client(cfg)?;
    let resolver = Resolver::new(client, &cfg.site, parser)?;

    let start_time = Local::now();
    let results = resolve_all(&resolver, &skus, cfg).await;
    info_time!(start_time, "Resolved {} SKUs.", results.len());

    let path = write_report(&results, &cfg.output_dir).inspect_err(|e| {
        error_time!("Error saving output file in {}: {e}", cfg.output_dir.display());
    })?;
    info_time!("Finished! Results written to: {}", path.display());

    Ok(path)
}

/// One SKU at a time, pausing for the configured delay after every request.
/// The output keeps the input order.
async fn resolve_all(resolver: &Resolver, skus: &[String], cfg: &Config) -> Vec<Resolution> {
    let delay = cfg.request_delay();
    let mut results = Vec::with_capacity(skus.len());

    for sku in skus {
        results.push(resolver.resolve(sku).await);
        tokio::time::sleep(delay).await;
    }
    results
}
