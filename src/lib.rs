// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use error::{PortfolioError, Result};
pub use models::{Granularity, PeriodRecord, ResultSeries, SeriesPoint, YearRow};
pub use services::portfolio::{
    fetch_portfolio_results, get_portfolio_results, parse_portfolio_document, parse_rows,
};
