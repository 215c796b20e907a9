//! Per-symbol indicator summary compiled once per request cycle.

use serde::{Deserialize, Serialize};

/// Immutable once compiled; discarded at the end of the request.
///
/// `days_since_last_crossover` is `None` when the supplied history contains
/// no 50/200 crossover at all, which makes the symbol ineligible to buy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub symbol: String,
    #[serde(rename = "latestSMA50")]
    pub latest_sma50: f64,
    #[serde(rename = "latestSMA200")]
    pub latest_sma200: f64,
    #[serde(rename = "latestRSI")]
    pub latest_rsi: f64,
    pub latest_stock_price: f64,
    pub last_crossover_above: bool,
    pub days_since_last_crossover: Option<i64>,
    #[serde(rename = "stockPriceOver200SMAByLessThan7Percent")]
    pub price_over_200sma_by_less_than_7pct: bool,
    pub can_buy_stock: bool,
}
