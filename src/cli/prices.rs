use super::ui;
use crate::core::prices::DATE_FORMAT;
use crate::core::{MarketDataSource, Mimer, PriceMap, Product};
use anyhow::{Context, Result};
use comfy_table::Cell;
use serde_json::{Map, Value, json};

pub const LOCAL_CURRENCY: &str = "SEK";

/// Renders one product's converted prices followed by their total.
pub fn display_price_table(product: Product, prices: &PriceMap, total: f64) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("{product} Price ({LOCAL_CURRENCY})")),
    ]);

    for (timestamp, price) in prices {
        table.add_row(vec![
            Cell::new(timestamp.format(DATE_FORMAT).to_string()),
            ui::number_cell(*price, 4),
        ]);
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Total", ui::StyleType::TotalLabel)),
        ui::total_cell(total, 4),
    ]);

    format!(
        "{}\n\n{}",
        ui::style_text(&product.to_string(), ui::StyleType::Title),
        table
    )
}

pub fn prices_to_json(prices: &PriceMap, total: f64) -> Value {
    let entries: Map<String, Value> = prices
        .iter()
        .map(|(timestamp, price)| (timestamp.format(DATE_FORMAT).to_string(), json!(price)))
        .collect();
    json!({ "prices": entries, "total": total })
}

/// Prints prices for `products` from an already fetched session.
pub fn run<S: MarketDataSource>(mimer: &Mimer<S>, products: &[Product], as_json: bool) -> Result<()> {
    let mut output = Map::new();

    for (i, product) in products.iter().enumerate() {
        let prices = mimer
            .product_prices(*product)
            .with_context(|| format!("Failed to convert {product} prices"))?;
        let total = mimer.sum(&prices);

        if as_json {
            output.insert(product.to_string(), prices_to_json(&prices, total));
        } else {
            if i > 0 {
                println!();
            }
            println!("{}", display_price_table(*product, &prices, total));
        }
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&Value::Object(output))?);
    }
    Ok(())
}
