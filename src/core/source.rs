//! Market data source abstractions

use crate::core::table::RawTable;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_exchange_rates(&self, from: NaiveDate, to: NaiveDate) -> Result<RawTable>;

    /// The returned table ends with the provider's summary row.
    async fn fetch_prices(&self, from: NaiveDate, to: NaiveDate) -> Result<RawTable>;
}
