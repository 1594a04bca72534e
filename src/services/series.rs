// src/services/series.rs
use crate::models::{PeriodRecord, ResultSeries, SeriesPoint};

/// Sort records by date and shift each value one period forward, so every
/// point carries the return realized entering that period.
pub fn build_series(mut records: Vec<PeriodRecord>) -> ResultSeries {
    // Stable, so records sharing a date keep their row order
    records.sort_by_key(|r| r.date);

    let mut previous: Option<&PeriodRecord> = None;
    let mut series = Vec::with_capacity(records.len());
    for record in &records {
        series.push(SeriesPoint {
            date: record.date,
            return_inflation_adjusted: previous.and_then(|p| p.inflation_adjusted),
            return_total: previous.and_then(|p| p.total),
        });
        previous = Some(record);
    }
    series
}
