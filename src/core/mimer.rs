//! A fetch-then-read session over one market data source.

use crate::core::error::Result;
use crate::core::prices::{PriceMap, Product, combine_prices, normalize_prices, sum_prices};
use crate::core::rates::{ExchangeRateMap, normalize_exchange_rates};
use crate::core::source::MarketDataSource;
use crate::core::store::RawTableStore;
use crate::core::table::RawTable;
use chrono::NaiveDate;
use tracing::{debug, error, info};

/// Outcome of the most recent [`Mimer::fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Unfetched,
    Complete,
    /// One of the two tables could not be fetched and was left empty.
    Partial,
    Failed,
}

pub struct Mimer<S: MarketDataSource> {
    source: S,
    capacity_kw: u32,
    store: RawTableStore,
    status: FetchStatus,
}

impl<S: MarketDataSource> Mimer<S> {
    pub fn new(source: S, capacity_kw: u32) -> Self {
        Self {
            source,
            capacity_kw,
            store: RawTableStore::new(),
            status: FetchStatus::Unfetched,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity_kw
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn store(&self) -> &RawTableStore {
        &self.store
    }

    /// Fetches exchange rates and prices for `from..=to` and replaces both
    /// held tables once both requests have finished.
    ///
    /// A failed request is logged and leaves its table empty; the returned
    /// status says which side, if any, was lost.
    pub async fn fetch(&mut self, from: NaiveDate, to: NaiveDate) -> anyhow::Result<FetchStatus> {
        if from > to {
            anyhow::bail!("Invalid period: {from} is after {to}");
        }
        info!(%from, %to, "Fetching exchange rates and prices");

        let (exchange, prices) = futures::join!(
            self.source.fetch_exchange_rates(from, to),
            self.source.fetch_prices(from, to)
        );

        let exchange_ok = exchange.is_ok();
        let prices_ok = prices.is_ok();
        self.store
            .set_exchange_table(Self::table_or_empty(exchange, "exchange rates"));
        self.store
            .set_price_table(Self::table_or_empty(prices, "prices"));

        self.status = match (exchange_ok, prices_ok) {
            (true, true) => FetchStatus::Complete,
            (false, false) => FetchStatus::Failed,
            _ => FetchStatus::Partial,
        };
        debug!(status = ?self.status, "Fetch finished");
        Ok(self.status)
    }

    fn table_or_empty(result: anyhow::Result<RawTable>, what: &str) -> RawTable {
        match result {
            Ok(table) => {
                debug!(rows = table.len(), "Fetched {}", what);
                table
            }
            Err(e) => {
                error!(error = %e, "Could not fetch {}", what);
                RawTable::default()
            }
        }
    }

    pub fn exchange_rates(&self) -> Result<ExchangeRateMap> {
        normalize_exchange_rates(self.store.exchange_table())
    }

    pub fn product_prices(&self, product: Product) -> Result<PriceMap> {
        match product.column() {
            Some(column) => {
                let rates = self.exchange_rates()?;
                normalize_prices(self.store.price_table(), column, &rates, self.capacity_kw)
            }
            None => {
                let up = self.product_prices(Product::DUp)?;
                let down = self.product_prices(Product::DDown)?;
                Ok(combine_prices(up, down))
            }
        }
    }

    pub fn sum(&self, prices: &PriceMap) -> f64 {
        sum_prices(prices)
    }
}
