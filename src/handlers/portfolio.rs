// src/handlers/portfolio.rs
use log::{error, info};
use reqwest::Client;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::config::AppConfig;
use crate::models::Granularity;
use crate::services::portfolio::fetch_portfolio_results;
use super::error::ApiError;

pub async fn get_portfolio_returns(
    name: String,
    granularity: String,
    config: Arc<AppConfig>,
    client: Client,
) -> Result<Json, Rejection> {
    info!("Handling request for portfolio '{}' ({})", name, granularity);

    let granularity: Granularity = granularity.parse().map_err(|e| {
        error!("Rejecting request for '{}': {}", name, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let series = fetch_portfolio_results(&client, &config, &name, granularity)
        .await
        .map_err(|e| {
            error!("Failed to build series for '{}': {}", name, e);
            warp::reject::custom(ApiError::from(e))
        })?;

    Ok(warp::reply::json(&series))
}
