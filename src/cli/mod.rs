pub mod prices;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::{FetchStatus, MarketDataSource, Mimer};
use anyhow::Result;
use chrono::NaiveDate;

/// Fetches both tables behind a spinner and warns when data is missing.
pub async fn fetch_with_progress<S: MarketDataSource>(
    mimer: &mut Mimer<S>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<FetchStatus> {
    let pb = ui::new_spinner("Fetching data from Mimer...");
    let status = mimer.fetch(from, to).await;
    pb.finish_and_clear();

    let status = status?;
    match status {
        FetchStatus::Complete | FetchStatus::Unfetched => {}
        FetchStatus::Partial => eprintln!(
            "{}",
            ui::style_text(
                "Some data could not be fetched from Mimer, results may be empty.",
                ui::StyleType::Warning
            )
        ),
        FetchStatus::Failed => eprintln!(
            "{}",
            ui::style_text(
                "Could not fetch any data from Mimer.",
                ui::StyleType::Warning
            )
        ),
    }
    Ok(status)
}
