//! Buy candidate selection among compiled snapshots.

use crate::models::snapshot::StockSnapshot;

/// Among buyable snapshots, pick the one with the lowest weekly RSI. Ties
/// resolve to the first-encountered snapshot. An empty field is `None`, not
/// an error.
pub fn select_buy_candidate(snapshots: &[StockSnapshot]) -> Option<&StockSnapshot> {
    snapshots
        .iter()
        .filter(|s| s.can_buy_stock)
        .fold(None, |best: Option<&StockSnapshot>, candidate| match best {
            Some(current) if current.latest_rsi <= candidate.latest_rsi => Some(current),
            _ => Some(candidate),
        })
}
