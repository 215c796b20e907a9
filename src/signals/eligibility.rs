//! Threshold rules deciding whether a symbol is buyable or a held position
//! should be unwound.

use crate::models::account::AccountState;
use crate::models::snapshot::StockSnapshot;

/// Weekly RSI must be below this for a buy.
pub const BUY_RSI_CEILING: f64 = 50.0;
/// Weekly RSI must exceed this for the overextension sell leg.
pub const SELL_RSI_FLOOR: f64 = 60.0;
/// Sell when price drops below this fraction of the 200-day SMA.
pub const SELL_PRICE_FLOOR_RATIO: f64 = 0.95;
/// Overextension sell leg requires price above this multiple of the SMA.
pub const SELL_PRICE_CEILING_RATIO: f64 = 1.15;

/// A symbol is buyable iff the most recent crossover was upward, the price
/// sits above its 200-day SMA by less than 7%, and weekly RSI is under 50.
/// All three conjuncts are mandatory; a history with no crossover fails the
/// first one.
pub fn can_buy_stock(snapshot: &StockSnapshot) -> bool {
    snapshot.last_crossover_above
        && snapshot.price_over_200sma_by_less_than_7pct
        && snapshot.latest_rsi < BUY_RSI_CEILING
}

/// Sell when the price has fallen materially below the 200-day SMA, or has
/// run more than 15% above it while weekly RSI is elevated. Both conditions
/// of the second leg are required.
pub fn should_sell_stock(snapshot: &StockSnapshot) -> bool {
    let dropped_below_sma =
        snapshot.latest_stock_price < SELL_PRICE_FLOOR_RATIO * snapshot.latest_sma200;
    let overextended =
        snapshot.latest_stock_price > SELL_PRICE_CEILING_RATIO * snapshot.latest_sma200
            && snapshot.latest_rsi > SELL_RSI_FLOOR;

    dropped_below_sma || overextended
}

/// No-position gate: buying requires an empty book (no positions, no open
/// orders) to prevent double entry.
pub fn able_to_buy(state: &AccountState) -> bool {
    state.positions.is_empty() && state.orders.is_empty()
}

/// Has-position gate: selling requires a held position and no order already
/// in flight.
pub fn able_to_sell(state: &AccountState) -> bool {
    !state.positions.is_empty() && state.orders.is_empty()
}
