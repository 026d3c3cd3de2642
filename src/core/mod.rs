//! Mimer table normalization and price conversion

pub mod config;
pub mod error;
pub mod log;
pub mod mimer;
pub mod prices;
pub mod rates;
pub mod source;
pub mod store;
pub mod table;

// Re-export main types for cleaner imports
pub use error::{MimerError, Result};
pub use mimer::{FetchStatus, Mimer};
pub use prices::{PriceMap, Product};
pub use rates::ExchangeRateMap;
pub use source::MarketDataSource;
pub use table::RawTable;
