//! SKU LOOKUP
//! Reads SKUs from a spreadsheet, finds each product page through the site's
//! catalog search and writes an xlsx report linking SKU to URL.

mod error;
mod macros;

pub mod config;
pub mod input;
pub mod parse;
pub mod process;
pub mod report;
pub mod request;

pub use config::Config;
pub use error::{Error, Result};
pub use request::{ProductUrl, Resolution};

const DEFAULT_INPUT: &str = "primer1.xls";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_SITE: &str = "https://praktis.bg";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DELAY_MS: u64 = 200;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

const SEARCH_PATH: &str = "/catalogsearch/result/";
/// Written in place of a URL whenever a SKU couldn't be resolved.
pub const NOT_FOUND: &str = "Item doesn't exist";
/// "Results found" phrase in the search page heading.
const RESULTS_HEADING_MARKER: &str = "Има намерени";
/// Class fragments that together mark the results grid.
const GRID_CLASS_FRAGMENTS: [&str; 2] = ["grid", "place-items-center"];
