use chrono::Local;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use trawl_core::dataset::Dataset;
use trawl_core::error::TrawlError;

use crate::output;

pub fn run(input_file: &Path, out: &Path) -> Result<(), TrawlError> {
    let reader = BufReader::new(File::open(input_file)?);
    let writer = BufWriter::new(File::create(out)?);
    let report = trawl_core::etl::clean_csv(reader, writer)?;

    eprintln!(
        "Cleaned {} row(s) into {} ({} duplicate(s) removed), written to {}",
        report.rows_read,
        report.rows_written,
        report.duplicates_removed,
        out.display()
    );
    if report.values_nulled > 0 || report.dates_nulled > 0 {
        eprintln!(
            "  {} value(s) and {} date(s) could not be parsed and were left empty",
            report.values_nulled, report.dates_nulled
        );
    }

    // Re-read the snapshot the same way the query commands will
    let dataset = Dataset::from_path(out)?;
    println!(
        "{}",
        output::table::format_stats(&dataset.stats(Local::now().date_naive()))
    );
    Ok(())
}
