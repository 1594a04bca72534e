// src/models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PortfolioError;

/// Multiplicative return: 1.0 is unchanged, above is a gain, below a loss.
pub type ReturnFactor = f64;

/// Whether records represent calendar years or calendar months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Annual,
    Monthly,
}

impl FromStr for Granularity {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "year" | "yearly" | "annual" => Ok(Granularity::Annual),
            "m" | "month" | "monthly" => Ok(Granularity::Monthly),
            other => Err(PortfolioError::Configuration(format!(
                "unknown granularity '{}', expected 'y' (annual) or 'm' (monthly)",
                other
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Granularity::Annual => write!(f, "annual"),
            Granularity::Monthly => write!(f, "monthly"),
        }
    }
}

/// One row of the yearReturns table with its percentage cells parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRow {
    pub year: i32,
    pub total: Option<ReturnFactor>,
    pub inflation_adjusted: Option<ReturnFactor>,
    /// January first; a truncated row carries fewer than 12 entries.
    pub months: Vec<Option<ReturnFactor>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    pub date: NaiveDate,
    pub total: Option<ReturnFactor>,
    pub inflation_adjusted: Option<ReturnFactor>,
}

/// A lagged return: the values realized in the period before `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub return_inflation_adjusted: Option<ReturnFactor>,
    pub return_total: Option<ReturnFactor>,
}

pub type ResultSeries = Vec<SeriesPoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("y".parse::<Granularity>().unwrap(), Granularity::Annual);
        assert_eq!("Annual".parse::<Granularity>().unwrap(), Granularity::Annual);
        assert_eq!("m".parse::<Granularity>().unwrap(), Granularity::Monthly);
        assert_eq!(" monthly ".parse::<Granularity>().unwrap(), Granularity::Monthly);
        assert_eq!(Granularity::default(), Granularity::Annual);
    }

    #[test]
    fn test_unknown_granularity_is_configuration_error() {
        let err = "q".parse::<Granularity>().unwrap_err();
        assert!(matches!(err, PortfolioError::Configuration(_)));
        assert!("".parse::<Granularity>().is_err());
    }
}
