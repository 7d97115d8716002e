use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet};
use url::Url;

use crate::request::{ProductUrl, Resolution};
use crate::{warn_time, Result};

const SHEET_NAME: &str = "Results";
const HEADERS: [&str; 2] = ["SKU", "URL"];
const NOT_FOUND_FILL: u32 = 0xFFCCCC;

/// Writes the results to `<output_dir>/output_<YYYYMMDD_HHMMSS>.xlsx` and returns the path.
/// The directory is created if missing and an existing file is never overwritten.
pub fn write_report(results: &[Resolution], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_path(output_dir, &Local::now().format("%Y%m%d_%H%M%S").to_string());

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    fill_sheet(sheet, results)?;
    workbook.save(&path)?;

    Ok(path)
}

/// Picks `output_<stamp>.xlsx`, or `output_<stamp>_<n>.xlsx` when a run in the
/// same second already took that name.
fn output_path(output_dir: &Path, stamp: &str) -> PathBuf {
    let first = output_dir.join(format!("output_{stamp}.xlsx"));
    if !first.exists() {
        return first;
    }
    let mut n = 1;
    loop {
        let path = output_dir.join(format!("output_{stamp}_{n}.xlsx"));
        if !path.exists() {
            return path;
        }
        n += 1;
    }
}

fn fill_sheet(sheet: &mut Worksheet, results: &[Resolution]) -> Result<()> {
    let header_format = Format::new().set_bold();
    let not_found_format = Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(NOT_FOUND_FILL));

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, res) in results.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &res.sku)?;

        match &res.url {
            ProductUrl::Found(url) if is_web_link(url) => {
                // Excel rejects some links (too long), keep the text then.
                if let Err(e) = sheet.write_url(row, 1, url.as_str()) {
                    warn_time!("{}: writing link as text ({e})", res.sku);
                    sheet.write_string(row, 1, url)?;
                }
            }
            other => {
                sheet.write_string_with_format(row, 1, other.as_str(), &not_found_format)?;
            }
        }
    }

    let sku_width = column_width(
        HEADERS[0],
        results.iter().map(|res| res.sku.as_str()),
    );
    let url_width = column_width(HEADERS[1], results.iter().map(|res| res.url.as_str()));
    sheet.set_column_width(0, sku_width)?;
    sheet.set_column_width(1, url_width)?;

    Ok(())
}

fn is_web_link(url: &str) -> bool {
    Url::parse(url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Longest value in characters, scaled by 1.2, plus a margin of 2.
fn column_width<'a>(header: &'a str, values: impl Iterator<Item = &'a str>) -> f64 {
    let max_len = std::iter::once(header)
        .chain(values)
        .map(|value| value.chars().count())
        .max()
        .unwrap_or(0);
    max_len as f64 * 1.2 + 2.0
}
