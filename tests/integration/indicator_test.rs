//! Integration tests for the indicator engine

use crate::support::{CloseCall, StubExchanger};
use chrono::{Duration, Utc};
use exmo_indicator::exchange::{ExchangeError, ExmoClient, ExmoConfig};
use exmo_indicator::indicator::{calculate_ema, Indicator, MovingAverages};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Case {
    name: &'static str,
    prices: Vec<f64>,
    period: usize,
    sma_len: usize,
    ema_len: usize,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "enough data",
            prices: vec![100.0, 101.0, 102.0, 103.0, 104.0, 105.0],
            period: 5,
            sma_len: 2,
            ema_len: 6,
        },
        Case {
            name: "exact period data",
            prices: vec![100.0, 101.0, 102.0, 103.0, 104.0],
            period: 5,
            sma_len: 1,
            ema_len: 5,
        },
        Case {
            name: "not enough data",
            prices: vec![100.0, 101.0, 102.0],
            period: 5,
            sma_len: 0,
            ema_len: 0,
        },
        Case {
            name: "empty data",
            prices: vec![],
            period: 5,
            sma_len: 0,
            ema_len: 0,
        },
        Case {
            name: "zero period",
            prices: vec![100.0, 101.0, 102.0],
            period: 0,
            sma_len: 0,
            ema_len: 0,
        },
    ]
}

#[tokio::test]
async fn test_sma_lengths() {
    let to = Utc::now();
    let from = to - Duration::days(2);

    for case in cases() {
        let indicator = Indicator::new(StubExchanger::with_prices(case.prices));
        let result = indicator
            .sma("BTC_USD", 30, case.period, from, to)
            .await
            .unwrap();
        assert_eq!(result.len(), case.sma_len, "{}", case.name);
    }
}

#[tokio::test]
async fn test_ema_lengths() {
    let to = Utc::now();
    let from = to - Duration::days(2);

    for case in cases() {
        let indicator = Indicator::new(StubExchanger::with_prices(case.prices));
        let result = indicator
            .ema("BTC_USD", 30, case.period, from, to)
            .await
            .unwrap();
        assert_eq!(result.len(), case.ema_len, "{}", case.name);
    }
}

#[tokio::test]
async fn test_arguments_forwarded_to_exchange() {
    let to = Utc::now();
    let from = to - Duration::days(2);
    let stub = Arc::new(StubExchanger::with_prices(vec![1.0, 2.0, 3.0]));
    let indicator = Indicator::new(Arc::clone(&stub));

    indicator.sma("ETH_USD", 15, 2, from, to).await.unwrap();
    indicator.ema("ETH_USD", 15, 2, from, to).await.unwrap();

    let expected = CloseCall {
        pair: "ETH_USD".to_string(),
        resolution: 15,
        from,
        to,
    };
    assert_eq!(stub.calls(), vec![expected.clone(), expected]);
}

#[tokio::test]
async fn test_exchange_error_surfaces_unchanged() {
    let now = Utc::now();
    let indicator = Indicator::new(StubExchanger::failing(503))
        .with_sma(|_, _| panic!("calculator must not run on error"));

    let err = indicator.sma("BTC_USD", 30, 5, now, now).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Status(503)));

    let err = indicator.ema("BTC_USD", 30, 5, now, now).await.unwrap_err();
    assert!(matches!(err, ExchangeError::Status(503)));
}

#[tokio::test]
async fn test_custom_calculators_receive_prices_and_period() {
    let now = Utc::now();
    let indicator = Indicator::new(StubExchanger::with_prices(vec![3.0, 4.0]))
        .with_sma(|data, period| data.iter().map(|v| v * period as f64).collect())
        .with_ema(|_, _| vec![2.0]);

    assert_eq!(
        indicator.sma("BTC_USD", 30, 10, now, now).await.unwrap(),
        vec![30.0, 40.0]
    );
    assert_eq!(
        indicator.ema("BTC_USD", 30, 10, now, now).await.unwrap(),
        vec![2.0]
    );
}

#[tokio::test]
async fn test_indicator_over_http_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/candles_history"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"candles":[[1,0,0,0,1,0],[2,0,0,0,2,0],[3,0,0,0,3,0],[4,0,0,0,4,0]]}"#,
        ))
        .mount(&server)
        .await;

    let client = ExmoClient::with_config(ExmoConfig::new(server.uri())).unwrap();
    let indicator = Indicator::new(client);
    let now = Utc::now();

    let sma = indicator.sma("BTC_USD", 30, 2, now, now).await.unwrap();
    assert_eq!(sma, vec![1.5, 2.5, 3.5]);

    let ema = indicator.ema("BTC_USD", 30, 2, now, now).await.unwrap();
    assert_eq!(ema, calculate_ema(&[1.0, 2.0, 3.0, 4.0], 2));
}

#[tokio::test]
async fn test_indicator_over_failing_http_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ExmoClient::with_config(ExmoConfig::new(server.uri())).unwrap();
    let now = Utc::now();

    let err = Indicator::new(client)
        .sma("BTC_USD", 30, 2, now, now)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("non-200 status"));
}
