//! Brokerage-side state: account, positions, open orders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub portfolio_value: f64,
    pub non_marginable_buying_power: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub qty: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub qty: f64,
    pub side: OrderSide,
    pub status: String,
}

/// Market day order submitted to the brokerage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub qty: f64,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: String,
    pub time_in_force: String,
}

impl OrderRequest {
    pub fn market(symbol: &str, qty: f64, side: OrderSide) -> Self {
        Self {
            symbol: symbol.to_string(),
            qty,
            side,
            order_type: "market".to_string(),
            time_in_force: "day".to_string(),
        }
    }
}

/// Everything the gate predicates need, fetched fresh each cycle. The
/// brokerage is authoritative; this is never cached across requests.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub account: Account,
    pub positions: Vec<Position>,
    pub orders: Vec<Order>,
}
