//! One-off cleaning pass over a combined contract-notice export.
//!
//! Produces the snapshot the dataset store loads: one row per CN ID (latest
//! amendment wins), plain decimal values and ISO dates. Columns the store
//! does not use are carried through untouched apart from trimming.

use crate::dataset::{columns, dedup_keep_last};
use crate::error::TrawlError;
use crate::parsing::{parse_currency, parse_date};
use serde::Serialize;
use std::io::{Read, Write};

const DATE_COLUMNS: &[&str] = &[
    columns::PUBLISH_DATE,
    columns::START_DATE,
    columns::END_DATE,
    columns::AMENDMENT_PUBLISH_DATE,
];

/// Counters from a cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_read: usize,
    pub duplicates_removed: usize,
    pub rows_written: usize,
    /// Non-empty value cells that could not be parsed and were blanked.
    pub values_nulled: usize,
    /// Non-empty date cells that could not be parsed and were blanked.
    pub dates_nulled: usize,
}

/// Clean a raw CSV export from `input` and write the snapshot to `output`.
pub fn clean_csv<R: Read, W: Write>(input: R, output: W) -> Result<CleanReport, TrawlError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name);
    let id_col = position(columns::ID);
    let value_col = position(columns::VALUE);
    let date_cols: Vec<usize> = DATE_COLUMNS.iter().filter_map(|c| position(*c)).collect();

    let mut report = CleanReport::default();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for record in reader.records() {
        let record = record?;
        report.rows_read += 1;

        let mut row: Vec<String> = (0..headers.len())
            .map(|i| record.get(i).unwrap_or("").trim().to_string())
            .collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        if let Some(col) = value_col {
            let cell = &mut row[col];
            match parse_currency(cell) {
                Some(value) => *cell = value.to_string(),
                None => {
                    if !cell.is_empty() {
                        report.values_nulled += 1;
                    }
                    cell.clear();
                }
            }
        }

        for &col in &date_cols {
            let cell = &mut row[col];
            match parse_date(cell) {
                Some(date) => *cell = date.format("%Y-%m-%d").to_string(),
                None => {
                    if !cell.is_empty() {
                        report.dates_nulled += 1;
                    }
                    cell.clear();
                }
            }
        }

        rows.push(row);
    }

    if let Some(col) = id_col {
        let before = rows.len();
        rows = dedup_keep_last(rows, |row| row[col].as_str());
        report.duplicates_removed = before - rows.len();
    } else {
        tracing::warn!("export has no '{}' column, skipping deduplication", columns::ID);
    }

    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    report.rows_written = rows.len();

    tracing::info!(
        read = report.rows_read,
        written = report.rows_written,
        duplicates = report.duplicates_removed,
        "cleaned contract export"
    );
    Ok(report)
}
