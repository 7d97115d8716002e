use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use sku_lookup::{error_time, info_time, process::process_skus, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let start_time = Local::now();
    let cfg = Config::parse();

    let code = match process_skus(&cfg).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error_time!("Run aborted: {e}");
            ExitCode::FAILURE
        }
    };
    info_time!(start_time, "Full program time:");

    code
}
