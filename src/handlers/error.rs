// src/handlers/error.rs
use std::fmt;
use warp::http::StatusCode;
use warp::reject::Reject;

use crate::error::PortfolioError;

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }
}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        let status = match &err {
            PortfolioError::Configuration(_) => StatusCode::BAD_REQUEST,
            PortfolioError::Http(code) if *code == reqwest::StatusCode::NOT_FOUND => {
                StatusCode::NOT_FOUND
            }
            PortfolioError::Parse { .. }
            | PortfolioError::Structural(_)
            | PortfolioError::Fetch(_)
            | PortfolioError::Http(_) => StatusCode::BAD_GATEWAY,
            PortfolioError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::with_status(status, err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}
