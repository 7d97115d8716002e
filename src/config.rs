use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::{
    DEFAULT_DELAY_MS, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, DEFAULT_SITE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

/// Run configuration. Every value has a default so a bare invocation works.
#[derive(Debug, Clone, Parser)]
#[command(name = "sku-lookup")]
#[command(about = "Look up product SKUs on a catalog search page and write an xlsx report", long_about = None)]
pub struct Config {
    /// Spreadsheet with the SKUs in the first column of the first sheet.
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory the timestamped report is written to (created if missing).
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Site origin hosting the `/catalogsearch/result/` endpoint.
    #[arg(long, default_value = DEFAULT_SITE)]
    pub site: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Pause after every SKU, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// `User-Agent` header sent with every search request.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Treat the first row as data instead of a column header.
    #[arg(long = "no-header", action = clap::ArgAction::SetFalse)]
    pub has_header: bool,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            site: DEFAULT_SITE.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            delay_ms: DEFAULT_DELAY_MS,
            user_agent: DEFAULT_USER_AGENT.into(),
            has_header: true,
        }
    }
}
