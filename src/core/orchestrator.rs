//! Trading orchestrator: one decision cycle per request.
//!
//! Sequence: fetch account/position/order state, branch into buy or sell
//! (mutually exclusive, buy first), place at most one market order, email.
//! If the sell branch sold, the buy branch gets one extra chance after a
//! short pause and a state re-fetch. Side effects are non-transactional: a
//! failed email never rolls back a placed order.

use crate::config::Config;
use crate::error::{TradeError, TradeResult};
use crate::indicators::compile_snapshot;
use crate::metrics::Metrics;
use crate::models::account::{AccountState, OrderRequest, OrderSide};
use crate::models::decision::Decision;
use crate::models::snapshot::StockSnapshot;
use crate::services::brokerage::Brokerage;
use crate::services::market_data::MarketData;
use crate::services::notify::Notifier;
use crate::services::throttle::ScanThrottle;
use crate::signals::{able_to_buy, able_to_sell, can_buy_stock, select_buy_candidate, should_sell_stock};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Fraction of non-marginable buying power committed to a buy.
pub const BUYING_POWER_FRACTION: f64 = 0.9;

/// Whole shares affordable with 90% of buying power at the given price.
pub fn shares_to_buy(non_marginable_buying_power: f64, price: f64) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    (BUYING_POWER_FRACTION * non_marginable_buying_power / price).floor()
}

pub struct Orchestrator {
    brokerage: Arc<dyn Brokerage>,
    market_data: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
    metrics: Arc<Metrics>,
    watchlist: Vec<String>,
    scan_calls_per_pause: u32,
    scan_pause: Duration,
    post_sell_pause: Duration,
}

impl Orchestrator {
    pub fn new(
        config: &Config,
        brokerage: Arc<dyn Brokerage>,
        market_data: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            brokerage,
            market_data,
            notifier,
            metrics,
            watchlist: config.watchlist.clone(),
            scan_calls_per_pause: config.scan_calls_per_pause,
            scan_pause: config.scan_pause,
            post_sell_pause: config.post_sell_pause,
        }
    }

    /// Run one full decision cycle and return the accumulated record.
    pub async fn run_cycle(&self) -> TradeResult<Decision> {
        let mut decision = Decision::default();

        let state = self.fetch_account_state().await?;
        decision.record_state(&state);

        if able_to_buy(&state) {
            self.look_for_and_maybe_buy(&mut decision, &state).await?;
        } else if able_to_sell(&state) {
            self.maybe_sell(&mut decision, &state).await?;
        }

        if decision.sold_stock {
            sleep(self.post_sell_pause).await;
            let state = self.fetch_account_state().await?;
            decision.record_state(&state);
            if able_to_buy(&state) {
                self.look_for_and_maybe_buy(&mut decision, &state).await?;
            }
        }

        Ok(decision)
    }

    async fn fetch_account_state(&self) -> TradeResult<AccountState> {
        let account = self.brokerage.get_account().await?;
        let positions = self.brokerage.get_positions().await?;
        let orders = self.brokerage.get_orders().await?;
        Ok(AccountState {
            account,
            positions,
            orders,
        })
    }

    /// Compile one symbol's snapshot from four provider calls, then derive
    /// its buy eligibility.
    async fn fetch_snapshot(&self, symbol: &str, today: NaiveDate) -> TradeResult<StockSnapshot> {
        let rsi = self.market_data.weekly_rsi(symbol).await?;
        let sma50 = self.market_data.daily_sma(symbol, 50).await?;
        let sma200 = self.market_data.daily_sma(symbol, 200).await?;
        let latest_price = self.market_data.latest_close(symbol).await?;

        let mut snapshot = compile_snapshot(symbol, &sma50, &sma200, &rsi, latest_price, today)?;
        snapshot.can_buy_stock = can_buy_stock(&snapshot);
        self.metrics.symbols_scanned_total.inc();
        Ok(snapshot)
    }

    async fn scan_watchlist(&self, decision: &mut Decision, today: NaiveDate) -> TradeResult<()> {
        let mut throttle = ScanThrottle::new(self.scan_calls_per_pause, self.scan_pause);
        for symbol in &self.watchlist {
            throttle.pace().await;
            match self.fetch_snapshot(symbol, today).await {
                Ok(snapshot) => decision.stock_data.push(snapshot),
                Err(TradeError::InsufficientData { symbol, reason }) => {
                    warn!(symbol = %symbol, reason = %reason, "skipping symbol with incomplete indicator data");
                    decision.skipped_symbols.push(symbol);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    async fn look_for_and_maybe_buy(
        &self,
        decision: &mut Decision,
        state: &AccountState,
    ) -> TradeResult<()> {
        let today = Utc::now().date_naive();
        self.scan_watchlist(decision, today).await?;

        decision.stock_to_buy = select_buy_candidate(&decision.stock_data).cloned();
        let Some(candidate) = decision.stock_to_buy.clone() else {
            info!("no buyable stock in the watchlist");
            return Ok(());
        };

        let qty = shares_to_buy(
            state.account.non_marginable_buying_power,
            candidate.latest_stock_price,
        );
        if qty < 1.0 {
            info!(
                symbol = %candidate.symbol,
                price = candidate.latest_stock_price,
                "buying power too small for a single share"
            );
            return Ok(());
        }

        let request = OrderRequest::market(&candidate.symbol, qty, OrderSide::Buy);
        self.brokerage.create_order(&request).await?;
        self.metrics.orders_placed_total.inc();
        decision.bought_qty = Some(qty);

        info!(
            symbol = %candidate.symbol,
            qty = qty,
            portfolio_value = state.account.portfolio_value,
            "buying {} shares of {}",
            qty,
            candidate.symbol
        );
        let message = format!(
            "Buying {} shares of {}! Portfolio value: {}",
            qty, candidate.symbol, state.account.portfolio_value
        );
        self.notify_order(decision, &message).await;

        decision.order_info = self.brokerage.get_orders().await?;
        Ok(())
    }

    async fn maybe_sell(&self, decision: &mut Decision, state: &AccountState) -> TradeResult<()> {
        // Single-position occupancy: only the first position is considered.
        let position = &state.positions[0];
        let today = Utc::now().date_naive();

        let snapshot = match self.fetch_snapshot(&position.symbol, today).await {
            Ok(snapshot) => snapshot,
            Err(TradeError::InsufficientData { symbol, reason }) => {
                warn!(symbol = %symbol, reason = %reason, "held position has incomplete indicator data, not selling");
                decision.skipped_symbols.push(symbol);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        decision.stock_to_sell_data = Some(snapshot.clone());

        if !should_sell_stock(&snapshot) {
            info!(symbol = %position.symbol, "shouldn't sell stock yet");
            return Ok(());
        }

        let request = OrderRequest::market(&position.symbol, position.qty, OrderSide::Sell);
        self.brokerage.create_order(&request).await?;
        self.metrics.orders_placed_total.inc();
        decision.sold_stock = true;

        info!(
            symbol = %position.symbol,
            qty = position.qty,
            portfolio_value = state.account.portfolio_value,
            "selling {} shares of {}",
            position.qty,
            position.symbol
        );
        let message = format!(
            "Selling {} shares of {}! Portfolio value: {}",
            position.qty, position.symbol, state.account.portfolio_value
        );
        self.notify_order(decision, &message).await;

        decision.order_info = self.brokerage.get_orders().await?;
        Ok(())
    }

    /// Best-effort email; failure is logged and recorded, never propagated.
    async fn notify_order(&self, decision: &mut Decision, message: &str) {
        if let Err(e) = self
            .notifier
            .send_order_email(message, message, "<b>Hello world?</b>")
            .await
        {
            warn!(error = %e, "order notification failed");
            decision.notification_error = Some(e.to_string());
        }
    }
}
