use super::ui;
use crate::core::{ExchangeRateMap, MarketDataSource, Mimer};
use anyhow::{Context, Result};
use comfy_table::Cell;
use serde_json::{Map, Value, json};

pub fn display_rates_table(rates: &ExchangeRateMap) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("SEK/EUR")]);

    for (date, rate) in rates {
        table.add_row(vec![Cell::new(date.to_string()), ui::number_cell(*rate, 4)]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Exchange rates", ui::StyleType::Title),
        table
    )
}

pub fn rates_to_json(rates: &ExchangeRateMap) -> Value {
    let entries: Map<String, Value> = rates
        .iter()
        .map(|(date, rate)| (date.to_string(), json!(rate)))
        .collect();
    Value::Object(entries)
}

pub fn run<S: MarketDataSource>(mimer: &Mimer<S>, as_json: bool) -> Result<()> {
    let rates = mimer
        .exchange_rates()
        .context("Failed to read exchange rates")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rates_to_json(&rates))?);
    } else {
        println!("{}", display_rates_table(&rates));
    }
    Ok(())
}
