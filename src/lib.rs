pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Mimer, Product};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Inclusive date range to fetch from Mimer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub enum AppCommand {
    Prices {
        period: Period,
        /// All products when `None`.
        product: Option<Product>,
        capacity_kw: Option<u32>,
        json: bool,
    },
    Rates {
        period: Period,
        json: bool,
    },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("svkmimer starting...");
    let config = load_config(config_path)?;
    let provider = providers::MimerProvider::new(&config.providers.mimer)?;

    match command {
        AppCommand::Prices {
            period,
            product,
            capacity_kw,
            json,
        } => {
            let capacity_kw = capacity_kw.unwrap_or(config.capacity_kw);
            let mut mimer = Mimer::new(provider, capacity_kw);
            cli::fetch_with_progress(&mut mimer, period.from, period.to).await?;

            let products = match product {
                Some(p) => vec![p],
                None => Product::ALL.to_vec(),
            };
            cli::prices::run(&mimer, &products, json)
        }
        AppCommand::Rates { period, json } => {
            let mut mimer = Mimer::new(provider, config.capacity_kw);
            cli::fetch_with_progress(&mut mimer, period.from, period.to).await?;
            cli::rates::run(&mimer, json)
        }
    }
}
