//! Environment-backed configuration.
//!
//! Everything is read once at startup into a `Config` that gets passed into
//! the orchestrator; nothing in the decision path does ambient `env::var`
//! lookups.

use crate::error::{TradeError, TradeResult};
use std::env;
use std::time::Duration;

/// Watchlist used when `WATCHLIST` is not set.
pub const DEFAULT_WATCHLIST: [&str; 15] = [
    "AAPL", "TSLA", "AMZN", "NVDA", "META", "MSFT", "GOOG", "NFLX", "ORCL", "ATI", "WSC", "ARCO",
    "SAP", "WFRD", "MNST",
];

#[derive(Debug, Clone)]
pub struct BrokerageConfig {
    pub base_url: String,
    pub key_id: String,
    pub secret_key: String,
}

#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub base_url: String,
    pub domain: String,
    pub api_key: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub base_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub watchlist: Vec<String>,
    /// Market-data calls allowed before the throttle pauses.
    pub scan_calls_per_pause: u32,
    /// Pause between throttled batches (provider quota recovery).
    pub scan_pause: Duration,
    /// Pause between a sell and the follow-up buy re-check.
    pub post_sell_pause: Duration,
    pub brokerage: BrokerageConfig,
    pub market_data: MarketDataConfig,
    pub email: EmailConfig,
    pub sms: SmsConfig,
}

impl Config {
    pub fn from_env() -> TradeResult<Self> {
        let watchlist = match env::var("WATCHLIST") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            port: parse_or("PORT", 3040)?,
            watchlist,
            scan_calls_per_pause: parse_or("SCAN_CALLS_PER_PAUSE", 1)?,
            scan_pause: Duration::from_secs(parse_or("SCAN_PAUSE_SECONDS", 61)?),
            post_sell_pause: Duration::from_secs(parse_or("POST_SELL_PAUSE_SECONDS", 10)?),
            brokerage: BrokerageConfig {
                base_url: optional(
                    "ALPACA_BASE_URL",
                    "https://paper-api.alpaca.markets",
                ),
                key_id: required("ALPACA_KEY_ID")?,
                secret_key: required("ALPACA_SECRET_KEY")?,
            },
            market_data: MarketDataConfig {
                base_url: optional("ALPHA_VANTAGE_BASE_URL", "https://www.alphavantage.co"),
                api_key: required("ALPHA_VANTAGE_API_KEY")?,
            },
            email: EmailConfig {
                base_url: optional("MAILGUN_BASE_URL", "https://api.mailgun.net"),
                domain: required("MAILGUN_DOMAIN")?,
                api_key: required("MAILGUN_API_KEY")?,
                from: required("FROM_EMAIL")?,
                to: required("TO_EMAIL")?,
            },
            sms: SmsConfig {
                base_url: optional("TWILIO_BASE_URL", "https://api.twilio.com"),
                account_sid: required("TWILIO_ACCOUNT_SID")?,
                auth_token: required("TWILIO_AUTH_TOKEN")?,
                from: required("TWILIO_FROM_NUMBER")?,
                to: required("MY_NUMBER")?,
            },
        })
    }
}

/// Deployment environment name, defaulting to sandbox.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn required(name: &str) -> TradeResult<String> {
    env::var(name).map_err(|_| TradeError::Config(format!("missing environment variable {name}")))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> TradeResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| TradeError::Config(format!("invalid value for {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}
