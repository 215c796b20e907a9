//! 50/200-day SMA crossover detection.
//!
//! The scan walks the dates present in both SMA series in ascending order,
//! tracking a running "50 above 200" flag and recording an event each time
//! the relation flips. The retained latest SMA values come from the newest
//! shared date. A history with no crossover produces a snapshot that is
//! simply ineligible to buy rather than an error.

use crate::error::{TradeError, TradeResult};
use crate::models::indicators::{RsiSeries, SmaSeries};
use crate::models::snapshot::StockSnapshot;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverDirection {
    /// 50-day SMA crossed above the 200-day SMA (golden cross).
    Above,
    /// 50-day SMA crossed below the 200-day SMA (death cross).
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverEvent {
    pub date: NaiveDate,
    pub direction: CrossoverDirection,
}

/// Upper bound for "price modestly above its 200-day SMA".
pub const SMA200_PREMIUM_CAP: f64 = 1.07;

/// Compile one symbol's indicator snapshot for the current cycle.
///
/// `today` is the evaluation date used for the days-since-crossover
/// distance. The `can_buy_stock` flag is left `false` here; eligibility is
/// derived afterwards by the classifier.
pub fn compile_snapshot(
    symbol: &str,
    sma50: &SmaSeries,
    sma200: &SmaSeries,
    rsi: &RsiSeries,
    latest_price: f64,
    today: NaiveDate,
) -> TradeResult<StockSnapshot> {
    let mut is_50_above_200 = false;
    let mut last_crossover: Option<CrossoverEvent> = None;
    let mut latest_values: Option<(f64, f64)> = None;

    for (&date, &fifty) in &sma50.values {
        let Some(&two_hundred) = sma200.values.get(&date) else {
            continue;
        };

        latest_values = Some((fifty, two_hundred));

        if fifty > two_hundred && !is_50_above_200 {
            is_50_above_200 = true;
            last_crossover = Some(CrossoverEvent {
                date,
                direction: CrossoverDirection::Above,
            });
        } else if fifty < two_hundred && is_50_above_200 {
            is_50_above_200 = false;
            last_crossover = Some(CrossoverEvent {
                date,
                direction: CrossoverDirection::Below,
            });
        }
    }

    let (latest_sma50, latest_sma200) = latest_values
        .ok_or_else(|| TradeError::insufficient(symbol, "no shared SMA50/SMA200 dates"))?;

    let latest_rsi = rsi
        .latest()
        .ok_or_else(|| TradeError::insufficient(symbol, "RSI missing at last-refreshed date"))?;

    let days_since_last_crossover = last_crossover
        .map(|event| (today - event.date).num_days().abs());

    let price_over_200sma_by_less_than_7pct =
        latest_price > latest_sma200 && latest_price < latest_sma200 * SMA200_PREMIUM_CAP;

    Ok(StockSnapshot {
        symbol: symbol.to_string(),
        latest_sma50,
        latest_sma200,
        latest_rsi,
        latest_stock_price: latest_price,
        last_crossover_above: matches!(
            last_crossover,
            Some(CrossoverEvent {
                direction: CrossoverDirection::Above,
                ..
            })
        ),
        days_since_last_crossover,
        price_over_200sma_by_less_than_7pct,
        can_buy_stock: false,
    })
}
