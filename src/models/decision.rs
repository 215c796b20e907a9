//! Per-request decision record, returned as the `/doWork` response body.

use crate::models::account::{Account, AccountState, Order, Position};
use crate::models::snapshot::StockSnapshot;
use serde::Serialize;

/// Accumulates everything one orchestrator cycle saw and did. Exists only
/// for the duration of a single request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_info: Option<Account>,
    pub position_info: Vec<Position>,
    pub order_info: Vec<Order>,
    /// Snapshots compiled during the buy scan.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stock_data: Vec<StockSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_to_buy: Option<StockSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_to_sell_data: Option<StockSnapshot>,
    pub sold_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bought_qty: Option<f64>,
    /// Symbols skipped because their indicator inputs were incomplete.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_symbols: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_error: Option<String>,
}

impl Decision {
    /// Overwrite the brokerage-side view with freshly fetched state.
    pub fn record_state(&mut self, state: &AccountState) {
        self.account_info = Some(state.account.clone());
        self.position_info = state.positions.clone();
        self.order_info = state.orders.clone();
    }
}
