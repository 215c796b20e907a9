//! Equitrix: crossover-driven equities trading service.
//!
//! A single `GET /doWork` request runs one full decision cycle: fetch live
//! account state from the brokerage, compile RSI/SMA indicator snapshots for
//! the watchlist, apply the buy/sell threshold rules, place at most one
//! market order, and send a notification email. The brokerage is the system
//! of record; nothing is persisted locally between requests.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
