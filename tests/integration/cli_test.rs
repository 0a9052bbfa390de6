//! Integration tests for CLI rendering

use crate::support::StubExchanger;
use chrono::Utc;
use exmo_indicator::cli::{
    print_currencies, render_indicators, CandlesArgs, IndicatorParams, OrderBookArgs, TickerArgs,
    TradesArgs,
};
use exmo_indicator::exchange::{ExmoClient, ExmoConfig};
use exmo_indicator::indicator::Indicator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn params() -> IndicatorParams {
    let now = Utc::now();
    IndicatorParams {
        pair: "BTC_USD".to_string(),
        resolution: 30,
        period: 5,
        from: now - chrono::Duration::days(2),
        to: now,
    }
}

async fn client_serving(endpoint: &str, body: &str) -> (MockServer, ExmoClient) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    let client = ExmoClient::with_config(ExmoConfig::new(server.uri())).unwrap();
    (server, client)
}

#[tokio::test]
async fn test_render_indicators_output() {
    let stub = StubExchanger::with_prices(vec![100.0, 101.0, 102.0, 103.0, 104.0]);
    let indicator = Indicator::new(stub);
    let mut out = Vec::new();

    render_indicators(&indicator, &params(), &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "SMA: [102.0]");
    assert!(lines[1].starts_with("EMA: [100.0, "));
    assert_eq!(lines[1].matches(", ").count(), 4);
    assert_eq!(indicator.exchange().calls().len(), 2);
}

#[tokio::test]
async fn test_render_indicators_error() {
    let indicator = Indicator::new(StubExchanger::failing(502));
    let mut out = Vec::new();

    let err = render_indicators(&indicator, &params(), &mut out)
        .await
        .unwrap_err();

    assert!(out.is_empty());
    assert!(err.to_string().contains("SMA"));
    assert_eq!(err.root_cause().to_string(), "server returned status 502");
}

#[tokio::test]
async fn test_ticker_command() {
    let (_server, client) = client_serving(
        "/ticker",
        r#"{"BTC_USD":{"buy_price":"50000","sell_price":"50100"},"ETH_USD":{"buy_price":"3000","sell_price":"3001.5"}}"#,
    )
    .await;

    let mut out = Vec::new();
    TickerArgs { pair: None }
        .execute(&client, &mut out)
        .await
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "BTC_USD: buy=50000 sell=50100 spread=100\nETH_USD: buy=3000 sell=3001.5 spread=1.5\n"
    );

    let mut out = Vec::new();
    TickerArgs {
        pair: Some("ETH_USD".to_string()),
    }
    .execute(&client, &mut out)
    .await
    .unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("ETH_USD:"));

    let err = TickerArgs {
        pair: Some("XRP_USD".to_string()),
    }
    .execute(&client, &mut Vec::new())
    .await
    .unwrap_err();
    assert!(err.to_string().contains("XRP_USD"));
}

#[tokio::test]
async fn test_order_book_command() {
    let (_server, client) = client_serving(
        "/order_book",
        r#"{"BTC_USD":{"ask":[["50000","1"],["50010","2"]],"bid":[["49000","3"]]}}"#,
    )
    .await;

    let mut out = Vec::new();
    OrderBookArgs {
        limit: 2,
        pairs: vec!["BTC_USD".to_string()],
    }
    .execute(&client, &mut out)
    .await
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "BTC_USD: best ask 50000 x 1 (2 levels), best bid 49000 x 3 (1 levels)\n"
    );
}

#[tokio::test]
async fn test_order_book_command_empty_response() {
    let (_server, client) = client_serving("/order_book", "{}").await;

    let err = OrderBookArgs {
        limit: 2,
        pairs: vec!["BTC_USD".to_string()],
    }
    .execute(&client, &mut Vec::new())
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "empty order book response");
}

#[tokio::test]
async fn test_trades_command() {
    let (_server, client) = client_serving(
        "/trades",
        r#"{"BTC_USD":[{"trade_id":9,"type":"sell","price":"50000","quantity":"0.5"},{"trade_id":10,"price":"50001"}]}"#,
    )
    .await;

    let mut out = Vec::new();
    TradesArgs {
        pairs: vec!["BTC_USD".to_string()],
    }
    .execute(&client, &mut out)
    .await
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "BTC_USD: 2 trades\n  #9 sell 50000 qty=0.5\n  #10 ? 50001 qty=-\n"
    );
}

#[tokio::test]
async fn test_currencies_command() {
    let (_server, client) = client_serving("/currency", r#"["USD","BTC","EUR"]"#).await;

    let mut out = Vec::new();
    print_currencies(&client, &mut out).await.unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "BTC\nEUR\nUSD\n");
}

#[tokio::test]
async fn test_candles_command() {
    let (_server, client) = client_serving(
        "/candles_history",
        r#"{"candles":[[1640995200000,50000,51000,49000,50500,10]]}"#,
    )
    .await;
    let args = CandlesArgs {
        pair: "BTC_USD".to_string(),
        resolution: 30,
        lookback_days: 2,
    };

    let mut out = Vec::new();
    args.execute(&client, &mut out).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "2022-01-01T00:00:00+00:00 o=50000 h=51000 l=49000 c=50500 v=10\n"
    );
}

#[tokio::test]
async fn test_candles_command_rejects_bad_lookback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let client = ExmoClient::with_config(ExmoConfig::new(server.uri())).unwrap();

    for lookback_days in [-1, 100_000_000] {
        let args = CandlesArgs {
            pair: "BTC_USD".to_string(),
            resolution: 30,
            lookback_days,
        };
        let mut out = Vec::new();
        assert!(args.execute(&client, &mut out).await.is_err());
        assert!(out.is_empty());
    }
}
