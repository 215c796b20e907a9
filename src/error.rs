//! Error taxonomy for the decision cycle.
//!
//! Only `UpstreamFetch` is fatal for a request. `InsufficientData` excludes
//! a single symbol from candidacy, and `Notification` is reported in the
//! decision record without blocking a placed order.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradeError {
    /// A brokerage or market-data call failed. Fatal for the current
    /// request; triggers the SMS alert path and a 500 response.
    #[error("upstream {service} call failed: {message}")]
    UpstreamFetch {
        service: &'static str,
        message: String,
    },

    /// A symbol's indicator inputs are incomplete or malformed. The symbol
    /// is dropped from candidacy; never fatal.
    #[error("insufficient indicator data for {symbol}: {reason}")]
    InsufficientData { symbol: String, reason: String },

    /// Email/SMS delivery failed. Best-effort side channel; never reverses
    /// a placed order.
    #[error("notification delivery failed: {0}")]
    Notification(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl TradeError {
    pub fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::UpstreamFetch {
            service,
            message: err.to_string(),
        }
    }

    pub fn insufficient(symbol: &str, reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

pub type TradeResult<T> = Result<T, TradeError>;
