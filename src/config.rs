// src/config.rs
use log::{info, warn};
use std::env;

use crate::error::{PortfolioError, Result};

pub const DEFAULT_BASE_URL: &str = "http://www.lazyportfolioetf.com/allocation";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub base_url: String,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Read settings from the environment. Call `dotenv().ok()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port_str) => port_str.trim().parse::<u16>().map_err(|_| {
                PortfolioError::Configuration(format!("PORT must be a number, got '{}'", port_str))
            })?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let base_url = lookup("LAZY_PORTFOLIO_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.is_empty() {
            return Err(PortfolioError::Configuration(
                "LAZY_PORTFOLIO_BASE_URL is empty".to_string(),
            ));
        }

        let user_agent =
            lookup("LAZY_PORTFOLIO_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        info!("Using base URL {} on port {}", base_url, port);
        Ok(AppConfig {
            port,
            base_url,
            user_agent,
        })
    }
}
