// src/services/export.rs
use csv::Writer;
use std::io::Write;

use crate::error::Result;
use crate::models::SeriesPoint;

/// Write the series as CSV with a `date,return_inflation_adjusted,return_total`
/// header. Absent values become empty fields.
pub fn write_csv<W: Write>(series: &[SeriesPoint], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for point in series {
        wtr.serialize(point)?;
    }
    if series.is_empty() {
        wtr.write_record(["date", "return_inflation_adjusted", "return_total"])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_json(series: &[SeriesPoint]) -> Result<String> {
    Ok(serde_json::to_string_pretty(series)?)
}
