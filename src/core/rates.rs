//! EUR to SEK exchange rates from the Mimer exchange table

use crate::core::error::{MimerError, Result};
use crate::core::table::RawTable;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::debug;

pub const PERIOD_COLUMN: &str = "Period";
pub const RATE_COLUMN: &str = "Värde";
pub const PERIOD_FORMAT: &str = "%Y-%m-%d %H:%M";

/// SEK per EUR, keyed by calendar day.
pub type ExchangeRateMap = BTreeMap<NaiveDate, f64>;

/// Parses a decimal-comma number such as `"11,20"`. Only finite values are
/// accepted.
pub(crate) fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

pub fn normalize_exchange_rates(table: &RawTable) -> Result<ExchangeRateMap> {
    let mut rates = ExchangeRateMap::new();
    if table.is_empty() {
        return Ok(rates);
    }

    let period_col = table.column_index(PERIOD_COLUMN)?;
    let rate_col = table.column_index(RATE_COLUMN)?;

    for row in table.rows() {
        let period = row.cell(period_col, PERIOD_COLUMN)?;
        let date = NaiveDateTime::parse_from_str(period, PERIOD_FORMAT)
            .map(|dt| dt.date())
            .map_err(|_| MimerError::MalformedRow {
                row: row.index(),
                column: PERIOD_COLUMN.to_string(),
                value: period.to_string(),
            })?;

        let value = row.cell(rate_col, RATE_COLUMN)?;
        let rate = parse_decimal(value).ok_or_else(|| MimerError::MalformedRow {
            row: row.index(),
            column: RATE_COLUMN.to_string(),
            value: value.to_string(),
        })?;

        if let Some(previous) = rates.insert(date, rate) {
            debug!(%date, previous, rate, "Duplicate exchange rate date, keeping the later row");
        }
    }

    debug!(days = rates.len(), "Normalized exchange rates");
    Ok(rates)
}
