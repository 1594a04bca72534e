// src/routes.rs
use log::info;
use reqwest::Client;
use std::convert::Infallible;
use std::sync::Arc;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::config::AppConfig;
use crate::handlers::error::ApiError;
use crate::handlers::portfolio::get_portfolio_returns;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found";
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.as_str();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed";
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error";
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(
    config: Arc<AppConfig>,
    client: Client,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let config_filter = warp::any().map(move || config.clone());
    let client_filter = warp::any().map(move || client.clone());

    let portfolio_route = warp::path!("api" / "v1" / "portfolio" / String / String)
        .and(warp::get())
        .and(config_filter.clone())
        .and(client_filter.clone())
        .and_then(get_portfolio_returns);

    // Annual unless asked otherwise
    let portfolio_annual_route = warp::path!("api" / "v1" / "portfolio" / String)
        .and(warp::get())
        .map(|name: String| (name, "y".to_string()))
        .untuple_one()
        .and(config_filter.clone())
        .and(client_filter.clone())
        .and_then(get_portfolio_returns);

    info!("All routes configured successfully.");

    portfolio_route
        .or(portfolio_annual_route)
        .recover(handle_rejection)
}
