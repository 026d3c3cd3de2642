use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use svkmimer::core::config::MimerProviderConfig;
use svkmimer::core::{FetchStatus, MimerError, Mimer, Product};
use svkmimer::providers::MimerProvider;
use tracing::info;

const EXCHANGE_BODY: &str = "Period;Värde\n2023-08-31 00:00;11,20\n2023-09-01 00:00;11,50\n";
const PRICE_BODY: &str = "Datum;FCR-N Pris (EUR/MW);FCR-D upp Pris (EUR/MW);FCR-D ned Pris (EUR/MW)\n\
    2023-08-31 00:00:00;200,00;5,00;1,00\n\
    2023-08-31 01:00:00;10,00;2,00;0,50\n\
    2023-09-01 00:00:00;20,00;1,00;0,00\n\
    Total;230,00;8,00;1,50\n";

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mimer_mock_server(
        exchange: (u16, &str),
        prices: (u16, &str),
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ExchangeRate/DownloadText"))
            .respond_with(ResponseTemplate::new(exchange.0).set_body_string(exchange.1))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/PrimaryRegulation/DownloadText"))
            .respond_with(ResponseTemplate::new(prices.0).set_body_string(prices.1))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
capacity_kw: 8
providers:
  mimer:
    base_url: {base_url}
    retries: 0
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn provider(base_url: &str) -> MimerProvider {
    let config = MimerProviderConfig {
        base_url: base_url.to_string(),
        retries: 0,
        ..MimerProviderConfig::default()
    };
    MimerProvider::new(&config).expect("Failed to build provider")
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn period() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2023, 8, 31).unwrap(),
        NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
    )
}

#[test_log::test(tokio::test)]
async fn test_session_against_mock_mimer() {
    let mock_server =
        test_utils::create_mimer_mock_server((200, EXCHANGE_BODY), (200, PRICE_BODY)).await;
    let mut mimer = Mimer::new(provider(&mock_server.uri()), 8);

    let (from, to) = period();
    let status = mimer.fetch(from, to).await.unwrap();
    assert_eq!(status, FetchStatus::Complete);

    let rates = mimer.exchange_rates().unwrap();
    info!(?rates, "Normalized exchange rates");
    assert_eq!(rates.len(), 2);

    let n = mimer.product_prices(Product::N).unwrap();
    assert_eq!(n.len(), 3);
    assert!((n[&ts("2023-08-31 00:00:00")] - 17.92).abs() < 1e-9);
    assert!((n[&ts("2023-09-01 00:00:00")] - 0.02 * 8.0 * 11.5).abs() < 1e-9);

    let d = mimer.product_prices(Product::D).unwrap();
    let up = mimer.product_prices(Product::DUp).unwrap();
    let down = mimer.product_prices(Product::DDown).unwrap();
    assert_eq!(d.len(), 3);
    assert!((mimer.sum(&d) - (mimer.sum(&up) + mimer.sum(&down))).abs() < 1e-9);
}

#[test_log::test(tokio::test)]
async fn test_upstream_failure_yields_empty_prices() {
    let mock_server =
        test_utils::create_mimer_mock_server((200, EXCHANGE_BODY), (503, "Unavailable")).await;
    let mut mimer = Mimer::new(provider(&mock_server.uri()), 8);

    let (from, to) = period();
    let status = mimer.fetch(from, to).await.unwrap();

    assert_eq!(status, FetchStatus::Partial);
    assert_eq!(mimer.exchange_rates().unwrap().len(), 2);
    for product in Product::ALL {
        let prices = mimer.product_prices(product).unwrap();
        assert!(prices.is_empty());
        assert_eq!(mimer.sum(&prices), 0.0);
    }
}

#[test_log::test(tokio::test)]
async fn test_missing_rate_is_reported() {
    let exchange = "Period;Värde\n2023-08-31 00:00;11,20\n";
    let mock_server =
        test_utils::create_mimer_mock_server((200, exchange), (200, PRICE_BODY)).await;
    let mut mimer = Mimer::new(provider(&mock_server.uri()), 8);

    let (from, to) = period();
    mimer.fetch(from, to).await.unwrap();

    let err = mimer.product_prices(Product::N).unwrap_err();
    assert!(matches!(err, MimerError::MissingExchangeRate(date) if date == to));
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server =
        test_utils::create_mimer_mock_server((200, EXCHANGE_BODY), (200, PRICE_BODY)).await;
    let config_file = test_utils::write_config(&mock_server.uri());
    let config_path = config_file.path().to_str().unwrap();
    assert!(fs::metadata(config_path).is_ok());

    let (from, to) = period();
    let period = svkmimer::Period { from, to };

    let result = svkmimer::run_command(
        svkmimer::AppCommand::Prices {
            period,
            product: None,
            capacity_kw: None,
            json: false,
        },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Prices command failed with: {:?}", result.err());

    let result = svkmimer::run_command(
        svkmimer::AppCommand::Rates { period, json: true },
        Some(config_path),
    )
    .await;
    assert!(result.is_ok(), "Rates command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_app_flow_reports_conversion_errors() {
    let exchange = "Period;Värde\n2023-08-31 00:00;11,20\n";
    let mock_server =
        test_utils::create_mimer_mock_server((200, exchange), (200, PRICE_BODY)).await;
    let config_file = test_utils::write_config(&mock_server.uri());

    let (from, to) = period();
    let result = svkmimer::run_command(
        svkmimer::AppCommand::Prices {
            period: svkmimer::Period { from, to },
            product: Some(Product::N),
            capacity_kw: Some(1),
            json: true,
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to convert FCR-N prices"));
}
