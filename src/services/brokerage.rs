//! Brokerage interface and the Alpaca REST implementation.
//!
//! Alpaca serializes numeric fields as JSON strings; the client parses them
//! into `f64` at the edge so the rest of the service works with numbers.

use crate::config::BrokerageConfig;
use crate::error::{TradeError, TradeResult};
use crate::models::account::{Account, Order, OrderRequest, OrderSide, Position};
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait Brokerage: Send + Sync {
    async fn get_account(&self) -> TradeResult<Account>;
    async fn get_positions(&self) -> TradeResult<Vec<Position>>;
    async fn get_orders(&self) -> TradeResult<Vec<Order>>;
    async fn create_order(&self, request: &OrderRequest) -> TradeResult<Order>;
    async fn cancel_order(&self, id: &str) -> TradeResult<()>;
}

pub struct AlpacaBrokerage {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    secret_key: String,
}

impl AlpacaBrokerage {
    pub fn new(http: reqwest::Client, config: &BrokerageConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header("APCA-API-KEY-ID", &self.key_id)
            .header("APCA-API-SECRET-KEY", &self.secret_key)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> TradeResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| TradeError::upstream("alpaca", e))?;

        if !response.status().is_success() {
            return Err(TradeError::upstream(
                "alpaca",
                format!("status {}", response.status()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| TradeError::upstream("alpaca", e))
    }
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    portfolio_value: String,
    non_marginable_buying_power: String,
}

#[derive(Debug, Deserialize)]
struct PositionResponse {
    symbol: String,
    qty: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    symbol: String,
    qty: String,
    side: OrderSide,
    status: String,
}

fn parse_decimal(field: &'static str, raw: &str) -> TradeResult<f64> {
    raw.parse()
        .map_err(|_| TradeError::upstream("alpaca", format!("unparseable {field} {raw:?}")))
}

impl TryFrom<OrderResponse> for Order {
    type Error = TradeError;

    fn try_from(response: OrderResponse) -> TradeResult<Self> {
        Ok(Order {
            qty: parse_decimal("order qty", &response.qty)?,
            id: response.id,
            symbol: response.symbol,
            side: response.side,
            status: response.status,
        })
    }
}

#[async_trait]
impl Brokerage for AlpacaBrokerage {
    async fn get_account(&self) -> TradeResult<Account> {
        let response: AccountResponse = self
            .send(self.request(reqwest::Method::GET, "/v2/account"))
            .await?;

        Ok(Account {
            portfolio_value: parse_decimal("portfolio_value", &response.portfolio_value)?,
            non_marginable_buying_power: parse_decimal(
                "non_marginable_buying_power",
                &response.non_marginable_buying_power,
            )?,
        })
    }

    async fn get_positions(&self) -> TradeResult<Vec<Position>> {
        let response: Vec<PositionResponse> = self
            .send(self.request(reqwest::Method::GET, "/v2/positions"))
            .await?;

        response
            .into_iter()
            .map(|p| {
                Ok(Position {
                    qty: parse_decimal("position qty", &p.qty)?,
                    symbol: p.symbol,
                })
            })
            .collect()
    }

    async fn get_orders(&self) -> TradeResult<Vec<Order>> {
        let response: Vec<OrderResponse> = self
            .send(self.request(reqwest::Method::GET, "/v2/orders"))
            .await?;

        response.into_iter().map(Order::try_from).collect()
    }

    async fn create_order(&self, request: &OrderRequest) -> TradeResult<Order> {
        let response: OrderResponse = self
            .send(self.request(reqwest::Method::POST, "/v2/orders").json(request))
            .await?;

        response.try_into()
    }

    async fn cancel_order(&self, id: &str) -> TradeResult<()> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/v2/orders/{id}"))
            .send()
            .await
            .map_err(|e| TradeError::upstream("alpaca", e))?;

        if !response.status().is_success() {
            return Err(TradeError::upstream(
                "alpaca",
                format!("cancel status {}", response.status()),
            ));
        }

        Ok(())
    }
}
