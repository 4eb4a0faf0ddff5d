//! Spreadsheet decoder: raw bytes to a header row plus data rows.
//!
//! xlsx/xls goes through calamine, csv through the csv crate. Only the
//! first worksheet is processed; additional sheets are silently ignored
//! (documented limitation). Decode failures are always fatal and never
//! yield partial data.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::ImportError;
use crate::shared::security::SecurityLimits;

use super::admission::file_extension;

/// First row (trimmed) plus the remaining data rows of the first sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn parse_spreadsheet(
    bytes: &[u8],
    file_name: &str,
    limits: &SecurityLimits,
) -> Result<ParsedSheet, ImportError> {
    let grid = match file_extension(file_name).as_deref() {
        Some(".csv") => decode_csv(bytes)?,
        _ => decode_workbook(bytes)?,
    };
    finalize(grid, limits)
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ImportError::Parse(e.to_string()))?;

    // First sheet by position, not by name.
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheets)?
        .map_err(|e| ImportError::Parse(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<Vec<String>>, ImportError> {
    // Strip UTF-8 BOM if present
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::Parse(e.to_string()))?;
        grid.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(grid)
}

fn finalize(grid: Vec<Vec<String>>, limits: &SecurityLimits) -> Result<ParsedSheet, ImportError> {
    if grid.is_empty() {
        return Err(ImportError::EmptyFile);
    }

    let data_rows = grid.len() - 1;
    if data_rows > limits.max_row_count {
        return Err(ImportError::TooManyRows {
            found: data_rows,
            max: limits.max_row_count,
        });
    }

    // Blunt memory-exhaustion defense: one oversized cell anywhere fails
    // the whole parse, no row/column pinpointing.
    for row in &grid {
        for cell in row {
            if cell.chars().count() > limits.max_cell_length {
                return Err(ImportError::CellTooLong {
                    max: limits.max_cell_length,
                });
            }
        }
    }

    let mut grid = grid.into_iter();
    let headers = grid
        .next()
        .map(|row| row.iter().map(|h| h.trim().to_string()).collect())
        .unwrap_or_default();

    Ok(ParsedSheet {
        headers,
        rows: grid.collect(),
    })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => float_to_string(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => float_to_string(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Whole numbers print without a trailing ".0" so serials typed as
/// numeric cells survive the round trip.
fn float_to_string(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}
