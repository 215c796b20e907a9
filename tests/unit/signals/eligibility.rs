use equitrix::models::{Account, AccountState, Order, OrderSide, Position, StockSnapshot};
use equitrix::signals::{able_to_buy, able_to_sell, can_buy_stock, should_sell_stock};

fn snapshot() -> StockSnapshot {
    StockSnapshot {
        symbol: "AAPL".to_string(),
        latest_sma50: 102.0,
        latest_sma200: 100.0,
        latest_rsi: 40.0,
        latest_stock_price: 103.0,
        last_crossover_above: true,
        days_since_last_crossover: Some(12),
        price_over_200sma_by_less_than_7pct: true,
        can_buy_stock: false,
    }
}

fn state(positions: Vec<Position>, orders: Vec<Order>) -> AccountState {
    AccountState {
        account: Account {
            portfolio_value: 10_000.0,
            non_marginable_buying_power: 1_000.0,
        },
        positions,
        orders,
    }
}

fn position(symbol: &str, qty: f64) -> Position {
    Position {
        symbol: symbol.to_string(),
        qty,
    }
}

fn open_order(symbol: &str) -> Order {
    Order {
        id: "ord-1".to_string(),
        symbol: symbol.to_string(),
        qty: 1.0,
        side: OrderSide::Buy,
        status: "new".to_string(),
    }
}

#[test]
fn all_three_conjuncts_make_a_buy() {
    // Price 3% above a 200-day SMA of 100, RSI 40, upward crossover.
    assert!(can_buy_stock(&snapshot()));
}

#[test]
fn downward_crossover_blocks_the_buy() {
    let mut s = snapshot();
    s.last_crossover_above = false;
    assert!(!can_buy_stock(&s));
}

#[test]
fn price_too_far_above_sma_blocks_the_buy() {
    let mut s = snapshot();
    s.price_over_200sma_by_less_than_7pct = false;
    assert!(!can_buy_stock(&s));
}

#[test]
fn elevated_rsi_blocks_the_buy() {
    let mut s = snapshot();
    s.latest_rsi = 50.0;
    assert!(!can_buy_stock(&s));
}

#[test]
fn sells_when_price_drops_below_95_percent_of_sma() {
    let mut s = snapshot();
    s.latest_stock_price = 94.9;
    assert!(should_sell_stock(&s));
}

#[test]
fn holds_when_price_sits_inside_the_band() {
    let mut s = snapshot();
    s.latest_stock_price = 103.0;
    s.latest_rsi = 40.0;
    assert!(!should_sell_stock(&s));
}

#[test]
fn sells_when_overextended_with_elevated_rsi() {
    let mut s = snapshot();
    s.latest_stock_price = 120.0;
    s.latest_rsi = 70.0;
    assert!(should_sell_stock(&s));
}

#[test]
fn overextension_alone_is_not_a_sell() {
    let mut s = snapshot();
    s.latest_stock_price = 120.0;
    s.latest_rsi = 50.0;
    assert!(!should_sell_stock(&s));
}

#[test]
fn elevated_rsi_inside_the_band_is_not_a_sell() {
    // Both legs of the overextension disjunct are required; RSI above 60
    // with the price only 10% over the SMA holds the position.
    let mut s = snapshot();
    s.latest_stock_price = 110.0;
    s.latest_rsi = 70.0;
    assert!(!should_sell_stock(&s));
}

#[test]
fn empty_book_allows_buying() {
    assert!(able_to_buy(&state(vec![], vec![])));
}

#[test]
fn existing_position_blocks_buying() {
    assert!(!able_to_buy(&state(vec![position("AAPL", 5.0)], vec![])));
}

#[test]
fn open_order_blocks_buying() {
    assert!(!able_to_buy(&state(vec![], vec![open_order("AAPL")])));
}

#[test]
fn position_with_clear_book_allows_selling() {
    assert!(able_to_sell(&state(vec![position("AAPL", 5.0)], vec![])));
}

#[test]
fn open_order_blocks_selling_even_with_a_position() {
    assert!(!able_to_sell(&state(
        vec![position("AAPL", 5.0)],
        vec![open_order("AAPL")]
    )));
}

#[test]
fn no_position_means_nothing_to_sell() {
    assert!(!able_to_sell(&state(vec![], vec![])));
}
