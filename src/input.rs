use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::{Error, Result};

/// Reads the first sheet of the workbook at `path` and returns column A as SKUs,
/// top to bottom. With `has_header` the first used row is skipped.
/// Empty cells are dropped; every other cell is kept as text.
pub fn load_skus(path: &Path, has_header: bool) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptyWorkbook(path.to_path_buf()))??;

    Ok(first_column(&range, has_header))
}

fn first_column(range: &Range<Data>, has_header: bool) -> Vec<String> {
    let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };
    let first_data_row = if has_header { start_row + 1 } else { start_row };

    (first_data_row..=end_row)
        .filter_map(|row| range.get_value((row, 0)))
        .filter_map(cell_text)
        .collect()
}

/// Text form of a cell, or `None` for cells that carry no SKU.
/// Whitespace-only strings are kept verbatim, only zero-length text is dropped.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        // Numeric SKUs come back as floats from most writers.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
