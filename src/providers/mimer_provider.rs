use crate::core::config::MimerProviderConfig;
use crate::core::{MarketDataSource, RawTable};
use crate::providers::util::{encode_period_date, with_retry};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use std::time::Duration;
use tracing::{debug, instrument};

const EXCHANGE_PATH: &str = "/ExchangeRate/DownloadText";
const PRICE_PATH: &str = "/PrimaryRegulation/DownloadText";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.47 Safari/537.36";

/// Downloads the semicolon-separated exchange rate and FCR price files from
/// Svenska kraftnät's Mimer.
pub struct MimerProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl MimerProvider {
    pub fn new(config: &MimerProviderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(MimerProvider {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    fn period_query(from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "periodFrom={}&periodTo={}",
            encode_period_date(from),
            encode_period_date(to)
        )
    }

    async fn download_table(&self, url: &str, what: &str) -> Result<RawTable> {
        debug!("Requesting {} from {}", what, url);

        let response = with_retry(
            || async { self.client.get(url).send().await },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .with_context(|| format!("Failed to send request for {what}"))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("Mimer returned {} for {}", status, what));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for {what}"))?;

        let table = RawTable::from_csv(&text)
            .with_context(|| format!("Failed to parse Mimer response for {what}"))?;
        debug!(rows = table.len(), "Fetched {}", what);
        Ok(table)
    }
}

#[async_trait]
impl MarketDataSource for MimerProvider {
    #[instrument(name = "MimerExchangeFetch", skip_all, fields(%from, %to))]
    async fn fetch_exchange_rates(&self, from: NaiveDate, to: NaiveDate) -> Result<RawTable> {
        let url = format!(
            "{}{}?{}",
            self.base_url,
            EXCHANGE_PATH,
            Self::period_query(from, to)
        );
        self.download_table(&url, "exchange rates").await
    }

    #[instrument(name = "MimerPriceFetch", skip_all, fields(%from, %to))]
    async fn fetch_prices(&self, from: NaiveDate, to: NaiveDate) -> Result<RawTable> {
        let url = format!(
            "{}{}?{}&auctionTypeId=1&productTypeId=0",
            self.base_url,
            PRICE_PATH,
            Self::period_query(from, to)
        );
        self.download_table(&url, "prices").await
    }
}
