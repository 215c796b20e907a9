use equitrix::core::orchestrator::shares_to_buy;

#[test]
fn sizes_the_order_with_ninety_percent_of_buying_power() {
    // floor(0.9 * 1000 / 50) = 18
    assert_eq!(shares_to_buy(1_000.0, 50.0), 18.0);
}

#[test]
fn floors_fractional_shares() {
    // 0.9 * 1000 / 70 = 12.857...
    assert_eq!(shares_to_buy(1_000.0, 70.0), 12.0);
}

#[test]
fn expensive_stock_with_small_account_buys_nothing() {
    assert_eq!(shares_to_buy(100.0, 500.0), 0.0);
}

#[test]
fn non_positive_price_buys_nothing() {
    assert_eq!(shares_to_buy(1_000.0, 0.0), 0.0);
    assert_eq!(shares_to_buy(1_000.0, -1.0), 0.0);
}
