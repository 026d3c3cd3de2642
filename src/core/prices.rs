//! FCR price normalization and EUR/MW to SEK conversion

use crate::core::error::{MimerError, Result};
use crate::core::rates::{ExchangeRateMap, parse_decimal};
use crate::core::table::RawTable;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, warn};

pub const DATE_COLUMN: &str = "Datum";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Converted prices in SEK for the configured capacity, keyed by interval start.
pub type PriceMap = BTreeMap<NaiveDateTime, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Product {
    N,
    DUp,
    DDown,
    /// D-up and D-down combined.
    D,
}

impl Product {
    pub const ALL: [Product; 4] = [Product::N, Product::DUp, Product::DDown, Product::D];

    /// Column holding this product's EUR/MW price. `D` is derived and has none.
    pub fn column(&self) -> Option<&'static str> {
        match self {
            Product::N => Some("FCR-N Pris (EUR/MW)"),
            Product::DUp => Some("FCR-D upp Pris (EUR/MW)"),
            Product::DDown => Some("FCR-D ned Pris (EUR/MW)"),
            Product::D => None,
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Product::N => "FCR-N",
                Product::DUp => "FCR-D up",
                Product::DDown => "FCR-D down",
                Product::D => "FCR-D",
            }
        )
    }
}

impl FromStr for Product {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "fcr-n" => Ok(Product::N),
            "d-up" | "fcr-d-up" => Ok(Product::DUp),
            "d-down" | "fcr-d-down" => Ok(Product::DDown),
            "d" | "fcr-d" => Ok(Product::D),
            _ => Err(anyhow::anyhow!("Invalid product: {}", s)),
        }
    }
}

/// Converts one price column of the Mimer price table to SEK.
///
/// Each price is taken as EUR/MW, scaled to kW, multiplied by `capacity_kw`
/// and converted with the exchange rate of the same day. The last row of the
/// table is Mimer's summary row and is always dropped.
///
/// Returns an empty map when either the price table or `rates` is empty.
pub fn normalize_prices(
    table: &RawTable,
    column: &str,
    rates: &ExchangeRateMap,
    capacity_kw: u32,
) -> Result<PriceMap> {
    let mut prices = PriceMap::new();
    if table.is_empty() || rates.is_empty() {
        if !table.is_empty() {
            warn!(column, "No exchange rates available, skipping price conversion");
        }
        return Ok(prices);
    }

    let date_col = table.column_index(DATE_COLUMN)?;
    let price_col = table.column_index(column)?;
    let interval_rows = table.len() - 1;

    for row in table.rows().take(interval_rows) {
        let datum = row.cell(date_col, DATE_COLUMN)?;
        let timestamp = NaiveDateTime::parse_from_str(datum, DATE_FORMAT).map_err(|_| {
            MimerError::MalformedRow {
                row: row.index(),
                column: DATE_COLUMN.to_string(),
                value: datum.to_string(),
            }
        })?;

        let value = row.cell(price_col, column)?;
        let eur_per_mw = parse_decimal(value).ok_or_else(|| MimerError::MalformedRow {
            row: row.index(),
            column: column.to_string(),
            value: value.to_string(),
        })?;

        let date = timestamp.date();
        let rate = rates
            .get(&date)
            .ok_or(MimerError::MissingExchangeRate(date))?;

        let eur = eur_per_mw / 1000.0 * f64::from(capacity_kw);
        prices.insert(timestamp, eur * rate);
    }

    debug!(column, intervals = prices.len(), "Normalized prices");
    Ok(prices)
}

/// Key-wise sum of two price maps. A key present on one side only is kept as is.
pub fn combine_prices(mut left: PriceMap, right: PriceMap) -> PriceMap {
    for (timestamp, price) in right {
        *left.entry(timestamp).or_insert(0.0) += price;
    }
    left
}

pub fn sum_prices(prices: &PriceMap) -> f64 {
    prices.values().sum()
}
