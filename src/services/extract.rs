// src/services/extract.rs
use chrono::NaiveDate;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{PortfolioError, Result};
use crate::models::{Granularity, PeriodRecord, YearRow};

use super::inflation::estimate_monthly_inflation;
use super::percent::parse_percent;

pub const YEAR_COLUMN: usize = 0;
pub const TOTAL_COLUMN: usize = 1;
pub const INFLATION_ADJUSTED_COLUMN: usize = 2;
pub const FIRST_MONTH_COLUMN: usize = 3;
pub const MONTHS_PER_YEAR: usize = 12;
/// Shortest row accepted in monthly mode.
pub const MIN_MONTHLY_CELLS: usize = 13;

fn year_pattern() -> &'static Regex {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    YEAR.get_or_init(|| Regex::new(r"^[0-9]{4}$").unwrap())
}

fn parse_cell(row: usize, column: usize, cell: &str) -> Result<Option<f64>> {
    parse_percent(cell).map_err(|source| PortfolioError::Parse {
        row,
        column,
        cell: cell.to_string(),
        source,
    })
}

/// Parse the text cells of one table row. `row` is the row's position in the
/// table body and only used for error context.
pub fn parse_year_row<S: AsRef<str>>(row: usize, cells: &[S]) -> Result<YearRow> {
    if cells.len() < FIRST_MONTH_COLUMN {
        return Err(PortfolioError::Structural(format!(
            "row {} has {} cells, expected at least year, total and inflation adjusted",
            row,
            cells.len()
        )));
    }

    let year_text = cells[YEAR_COLUMN].as_ref().trim();
    if !year_pattern().is_match(year_text) {
        return Err(PortfolioError::Structural(format!(
            "row {} does not start with a 4-digit year: '{}'",
            row, year_text
        )));
    }
    let year = year_text
        .parse::<i32>()
        .map_err(|e| PortfolioError::Structural(format!("row {}: {}", row, e)))?;

    let total = parse_cell(row, TOTAL_COLUMN, cells[TOTAL_COLUMN].as_ref())?;
    let inflation_adjusted = parse_cell(
        row,
        INFLATION_ADJUSTED_COLUMN,
        cells[INFLATION_ADJUSTED_COLUMN].as_ref(),
    )?;

    // Columns past December are not part of the table layout
    let months = cells
        .iter()
        .enumerate()
        .skip(FIRST_MONTH_COLUMN)
        .take(MONTHS_PER_YEAR)
        .map(|(column, cell)| parse_cell(row, column, cell.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    Ok(YearRow {
        year,
        total,
        inflation_adjusted,
        months,
    })
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        PortfolioError::Structural(format!("no such date: {}-{:02}-01", year, month))
    })
}

pub fn extract_annual(row: &YearRow) -> Result<PeriodRecord> {
    Ok(PeriodRecord {
        date: first_of_month(row.year, 1)?,
        total: row.total,
        inflation_adjusted: row.inflation_adjusted,
    })
}

/// One record per monthly cell. The table has a single figure per month, so
/// the inflation-adjusted value is that figure minus the year's average
/// monthly inflation.
pub fn extract_monthly(row: &YearRow) -> Result<Vec<PeriodRecord>> {
    let monthly_inflation = estimate_monthly_inflation(row.total, row.inflation_adjusted);
    debug!(
        "Year {}: average monthly inflation rate {:?}",
        row.year, monthly_inflation
    );

    row.months
        .iter()
        .zip(1u32..)
        .map(|(&factor, month)| {
            let inflation_adjusted = match (factor, monthly_inflation) {
                (Some(factor), Some(rate)) => Some(factor - rate),
                _ => None,
            };
            Ok(PeriodRecord {
                date: first_of_month(row.year, month)?,
                total: factor,
                inflation_adjusted,
            })
        })
        .collect()
}

/// Parse every row and emit dated records for the requested granularity.
/// Any malformed row aborts the whole extraction.
pub fn extract_records<S: AsRef<str>>(
    rows: &[Vec<S>],
    granularity: Granularity,
) -> Result<Vec<PeriodRecord>> {
    if granularity == Granularity::Monthly {
        if let Some((index, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() < MIN_MONTHLY_CELLS)
        {
            return Err(PortfolioError::Structural(format!(
                "row {} has {} cells, monthly returns need at least {}",
                index,
                cells.len(),
                MIN_MONTHLY_CELLS
            )));
        }
    }

    let year_rows = rows
        .iter()
        .enumerate()
        .map(|(index, cells)| parse_year_row(index, cells))
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::with_capacity(match granularity {
        Granularity::Annual => year_rows.len(),
        Granularity::Monthly => year_rows.len() * MONTHS_PER_YEAR,
    });

    for row in &year_rows {
        match granularity {
            Granularity::Annual => records.push(extract_annual(row)?),
            Granularity::Monthly => records.extend(extract_monthly(row)?),
        }
    }

    debug!(
        "Extracted {} {} records from {} rows",
        records.len(),
        granularity,
        year_rows.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map_or(false, |a| (a - b).abs() < 1e-12)
    }

    fn row_1990() -> Vec<&'static str> {
        vec![
            "1990", "+10.11", "+8.61", "+1.20", "-0.50", "+2.00", "", "+0.30", "-1.10",
            "+0.70", "+0.10", "-0.20", "+1.40", "+2.10", "+0.90",
        ]
    }

    #[test]
    fn test_parse_year_row() {
        let row = parse_year_row(0, &row_1990()).unwrap();
        assert_eq!(row.year, 1990);
        assert!(approx(row.total, 1.1011));
        assert!(approx(row.inflation_adjusted, 1.0861));
        assert_eq!(row.months.len(), 12);
        assert_eq!(row.months[3], None);
    }

    #[test]
    fn test_extract_annual() {
        let row = parse_year_row(0, &["1990", "+10.11", "+8.61"]).unwrap();
        let record = extract_annual(&row).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert!(approx(record.total, 1.1011));
        assert!(approx(record.inflation_adjusted, 1.0861));
    }

    #[test]
    fn test_extract_monthly_applies_inflation_estimate() {
        let row = parse_year_row(0, &row_1990()).unwrap();
        let records = extract_monthly(&row).unwrap();
        assert_eq!(records.len(), 12);

        let january = &records[0];
        assert_eq!(january.date, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert!(approx(january.total, 1.012));
        assert!(approx(january.inflation_adjusted, 1.012 - 0.00125));

        let february = &records[1];
        assert!(approx(february.total, 0.995));
        assert!(approx(february.inflation_adjusted, 0.995 - 0.00125));
    }

    #[test]
    fn test_empty_month_keeps_calendar() {
        let row = parse_year_row(0, &row_1990()).unwrap();
        let records = extract_monthly(&row).unwrap();

        let april = &records[3];
        assert_eq!(april.date, NaiveDate::from_ymd_opt(1990, 4, 1).unwrap());
        assert_eq!(april.total, None);
        assert_eq!(april.inflation_adjusted, None);

        let may = &records[4];
        assert_eq!(may.date, NaiveDate::from_ymd_opt(1990, 5, 1).unwrap());
        assert!(approx(may.total, 1.003));
    }

    #[test]
    fn test_missing_annual_figure_leaves_adjusted_absent() {
        let rows = vec![vec![
            "2024", "+5.00", "", "+1.00", "-1.00", "", "", "", "", "", "", "", "", "", "",
        ]];
        let records = extract_records(&rows, Granularity::Monthly).unwrap();
        assert_eq!(records.len(), 12);
        assert!(approx(records[0].total, 1.01));
        assert_eq!(records[0].inflation_adjusted, None);
        assert!(approx(records[1].total, 0.99));
        assert_eq!(records[1].inflation_adjusted, None);
        assert!(records[2..].iter().all(|r| r.total.is_none() && r.inflation_adjusted.is_none()));
    }

    #[test]
    fn test_short_row_in_monthly_mode_is_structural_error() {
        let rows = vec![row_1990(), vec!["1991", "-3.00", "-5.40"]];
        match extract_records(&rows, Granularity::Monthly).unwrap_err() {
            PortfolioError::Structural(message) => assert!(message.contains("row 1")),
            other => panic!("unexpected error: {:?}", other),
        }

        // One monthly cell short of the minimum
        let twelve_cells = vec![row_1990()[..MIN_MONTHLY_CELLS - 1].to_vec()];
        assert!(matches!(
            extract_records(&twelve_cells, Granularity::Monthly),
            Err(PortfolioError::Structural(_))
        ));

        // The same rows are fine as annual figures
        assert_eq!(extract_records(&rows, Granularity::Annual).unwrap().len(), 2);
    }

    #[test]
    fn test_truncated_row_at_minimum_emits_present_months() {
        let rows = vec![row_1990()[..MIN_MONTHLY_CELLS].to_vec()];
        let records = extract_records(&rows, Granularity::Monthly).unwrap();
        assert_eq!(records.len(), MIN_MONTHLY_CELLS - FIRST_MONTH_COLUMN);
        assert_eq!(records.last().unwrap().date, NaiveDate::from_ymd_opt(1990, 10, 1).unwrap());
    }

    #[test]
    fn test_year_must_use_ascii_digits() {
        let rows = vec![vec!["١٩٩٠", "+10.11", "+8.61"]];
        match extract_records(&rows, Granularity::Annual).unwrap_err() {
            PortfolioError::Structural(message) => assert!(message.contains("4-digit year")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let mut cells = row_1990();
        cells.push("+99.0");
        let row = parse_year_row(0, &cells).unwrap();
        assert_eq!(row.months.len(), 12);
    }

    #[test]
    fn test_parse_error_has_context() {
        let rows = vec![
            vec!["1990", "+10.11", "+8.61"],
            vec!["1991", "+3.00", "abc"],
        ];
        match extract_records(&rows, Granularity::Annual).unwrap_err() {
            PortfolioError::Parse { row, column, cell, .. } => {
                assert_eq!(row, 1);
                assert_eq!(column, INFLATION_ADJUSTED_COLUMN);
                assert_eq!(cell, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_structural_errors() {
        let short = vec![vec!["1990", "+10.11"]];
        assert!(matches!(
            extract_records(&short, Granularity::Monthly),
            Err(PortfolioError::Structural(_))
        ));

        let no_year = vec![vec!["Total", "+10.11", "+8.61"]];
        assert!(matches!(
            extract_records(&no_year, Granularity::Annual),
            Err(PortfolioError::Structural(_))
        ));

        let short_year = vec![vec!["90", "+10.11", "+8.61"]];
        assert!(matches!(
            extract_records(&short_year, Granularity::Annual),
            Err(PortfolioError::Structural(_))
        ));
    }

    #[test]
    fn test_extract_records_dispatch() {
        let mut row_1991 = row_1990();
        row_1991[0] = "1991";
        let rows = vec![row_1990(), row_1991];

        let annual = extract_records(&rows, Granularity::Annual).unwrap();
        assert_eq!(annual.len(), 2);

        let monthly = extract_records(&rows, Granularity::Monthly).unwrap();
        assert_eq!(monthly.len(), 24);
        assert_eq!(monthly[12].date, NaiveDate::from_ymd_opt(1991, 1, 1).unwrap());
    }
}
