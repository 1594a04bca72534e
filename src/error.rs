// src/error.rs
use thiserror::Error;

/// Failure of a single percentage token, before row/column context is known.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid percentage '{token}'")]
pub struct PercentError {
    pub token: String,
}

/// Errors raised while turning a returns table into a series.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// A percentage cell could not be read as a number
    #[error("Parse error at row {row}, column {column}: invalid percentage '{cell}'")]
    Parse {
        row: usize,
        column: usize,
        cell: String,
        #[source]
        source: PercentError,
    },

    /// The table is missing, or a row lacks required cells
    #[error("Structural error: {0}")]
    Structural(String),

    /// Unknown granularity or bad environment settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The allocation page could not be retrieved
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The allocation page answered with a non-success status
    #[error("Upstream returned HTTP {0}")]
    Http(reqwest::StatusCode),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for PortfolioError {
    fn from(err: csv::Error) -> Self {
        PortfolioError::Export(err.to_string())
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(err: std::io::Error) -> Self {
        PortfolioError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(err: serde_json::Error) -> Self {
        PortfolioError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
