use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Url Error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Couldn't read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Couldn't write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("The workbook has no sheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),
}
