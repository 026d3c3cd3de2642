use anyhow::Error;
use chrono::NaiveDate;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retries an async operation with configurable attempts and delays
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// Either the successful result or the error after all attempts
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await.map_err(anyhow::Error::from) {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, retries, err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Formats a date the way Mimer's download endpoints expect it in a query
/// string: `MM/DD/YYYY 00:00:00`, percent-encoded.
pub fn encode_period_date(date: NaiveDate) -> String {
    format!("{}%2000%3A00%3A00", date.format("%m%%2F%d%%2F%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_encode_period_date() {
        let date = NaiveDate::from_ymd_opt(2023, 8, 1).unwrap();
        assert_eq!(encode_period_date(date), "08%2F01%2F2023%2000%3A00%3A00");
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_after_retries() {
        let calls = AtomicUsize::new(0);
        // Nothing listens on port 9 on a test host; every attempt fails to connect.
        let result = with_retry(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                reqwest::get("http://127.0.0.1:9/").await
            },
            2,
            1,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
