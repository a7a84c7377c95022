//! CSV export for grid day profiles.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::grid::GridState;

/// Column header, matching the JSON field names.
const HEADER: &str = "hour,gridLoadMw,carbonIntensity,pricePerMwh,isPeak";

/// Exports grid states to a CSV file at the given path.
///
/// Writes a header row followed by one row per state, in input order.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_grid_csv(states: &[GridState], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_grid_csv(states, buf)
}

/// Writes grid states as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_grid_csv(states: &[GridState], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for s in states {
        wtr.write_record(&[
            s.hour.to_string(),
            s.grid_load_mw.to_string(),
            s.carbon_intensity.to_string(),
            format!("{:.2}", s.price_per_mwh),
            s.is_peak.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
