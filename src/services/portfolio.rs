// src/services/portfolio.rs
use log::{error, info};
use reqwest::Client;

use crate::config::AppConfig;
use crate::error::{PortfolioError, Result};
use crate::models::{Granularity, ResultSeries};

use super::extract::extract_records;
use super::series::build_series;
use super::table::{extract_table_rows, RETURNS_TABLE_ID};

pub fn portfolio_url(base_url: &str, portfolio_name: &str) -> String {
    format!("{}/{}/", base_url.trim_end_matches('/'), portfolio_name)
}

/// Turn rows of text cells into the lagged return series.
pub fn parse_rows<S: AsRef<str>>(rows: &[Vec<S>], granularity: Granularity) -> Result<ResultSeries> {
    let records = extract_records(rows, granularity)?;
    Ok(build_series(records))
}

/// Parse an allocation page that has already been downloaded.
pub fn parse_portfolio_document(html: &str, granularity: Granularity) -> Result<ResultSeries> {
    let rows = extract_table_rows(html, RETURNS_TABLE_ID)?;
    parse_rows(&rows, granularity)
}

pub fn build_client(config: &AppConfig) -> Result<Client> {
    Ok(Client::builder().user_agent(&config.user_agent).build()?)
}

/// Fetch a portfolio's allocation page and return its return series.
pub async fn fetch_portfolio_results(
    client: &Client,
    config: &AppConfig,
    portfolio_name: &str,
    granularity: Granularity,
) -> Result<ResultSeries> {
    if portfolio_name.trim().is_empty() || portfolio_name.contains('/') {
        return Err(PortfolioError::Configuration(format!(
            "invalid portfolio name '{}'",
            portfolio_name
        )));
    }

    let url = portfolio_url(&config.base_url, portfolio_name);
    info!("Fetching {} returns for '{}' from {}", granularity, portfolio_name, url);

    let response = client.get(&url).send().await?;
    let status = response.status();
    if !status.is_success() {
        error!("Request to {} failed with status {}", url, status);
        return Err(PortfolioError::Http(status));
    }
    let html = response.text().await?;

    let series = parse_portfolio_document(&html, granularity)?;
    info!("Built series of {} points for '{}'", series.len(), portfolio_name);
    Ok(series)
}

/// Fetch using settings from the environment.
pub async fn get_portfolio_results(
    portfolio_name: &str,
    granularity: Option<Granularity>,
) -> Result<ResultSeries> {
    let config = AppConfig::from_env()?;
    let client = build_client(&config)?;
    fetch_portfolio_results(&client, &config, portfolio_name, granularity.unwrap_or_default()).await
}
