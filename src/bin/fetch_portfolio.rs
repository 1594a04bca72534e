// src/bin/fetch_portfolio.rs
use anyhow::{bail, Context};
use dotenv::dotenv;
use log::info;
use std::env;
use std::io;

use lazy_portfolio_returns::config::AppConfig;
use lazy_portfolio_returns::models::Granularity;
use lazy_portfolio_returns::services::export::{to_json, write_csv};
use lazy_portfolio_returns::services::portfolio::{build_client, fetch_portfolio_results};

const USAGE: &str = "usage: fetch_portfolio <portfolio-name> [y|m] [--json]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut json = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let (name, granularity) = match positional.as_slice() {
        [name] => (name.clone(), Granularity::default()),
        [name, granularity] => (name.clone(), granularity.parse::<Granularity>()?),
        _ => bail!(USAGE),
    };

    let config = AppConfig::from_env()?;
    let client = build_client(&config)?;
    let series = fetch_portfolio_results(&client, &config, &name, granularity)
        .await
        .with_context(|| format!("failed to fetch returns for '{}'", name))?;
    info!("Fetched {} {} points for '{}'", series.len(), granularity, name);

    if json {
        println!("{}", to_json(&series)?);
    } else {
        write_csv(&series, io::stdout().lock())?;
    }
    Ok(())
}
