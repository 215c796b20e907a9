//! Wire-level tests for the Alpaca client.

use equitrix::config::BrokerageConfig;
use equitrix::error::TradeError;
use equitrix::models::{OrderRequest, OrderSide};
use equitrix::services::{AlpacaBrokerage, Brokerage};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> AlpacaBrokerage {
    AlpacaBrokerage::new(
        reqwest::Client::new(),
        &BrokerageConfig {
            base_url: server.uri(),
            key_id: "test-key".to_string(),
            secret_key: "test-secret".to_string(),
        },
    )
}

#[tokio::test]
async fn account_numbers_arrive_as_strings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/account"))
        .and(header("APCA-API-KEY-ID", "test-key"))
        .and(header("APCA-API-SECRET-KEY", "test-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "portfolio_value": "10250.75",
            "non_marginable_buying_power": "1000",
        })))
        .mount(&server)
        .await;

    let account = client(&server).get_account().await.expect("account");
    assert_eq!(account.portfolio_value, 10_250.75);
    assert_eq!(account.non_marginable_buying_power, 1_000.0);
}

#[tokio::test]
async fn create_order_round_trips_the_submitted_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ord-7",
            "symbol": "AAPL",
            "qty": "18",
            "side": "buy",
            "status": "accepted",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = OrderRequest::market("AAPL", 18.0, OrderSide::Buy);
    let order = client(&server).create_order(&request).await.expect("order");
    assert_eq!(order.id, "ord-7");
    assert_eq!(order.qty, 18.0);
    assert_eq!(order.side, OrderSide::Buy);
}

#[tokio::test]
async fn cancel_order_hits_the_order_resource() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/orders/ord-7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).cancel_order("ord-7").await.expect("cancel");
}

#[tokio::test]
async fn failed_calls_are_upstream_fetch_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/positions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).get_positions().await.unwrap_err();
    assert!(matches!(err, TradeError::UpstreamFetch { .. }));
}
