//! Market data provider interface and the Alpha Vantage implementation.
//!
//! Transport and HTTP failures are `UpstreamFetch` (fatal for the request);
//! responses missing the indicator payload are `InsufficientData` so the
//! orchestrator can skip just that symbol.

use crate::config::MarketDataConfig;
use crate::error::{TradeError, TradeResult};
use crate::models::indicators::{RsiSeries, SmaSeries};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[async_trait]
pub trait MarketData: Send + Sync {
    /// Weekly RSI series (10-period, open prices) for a symbol.
    async fn weekly_rsi(&self, symbol: &str) -> TradeResult<RsiSeries>;

    /// Daily SMA series for a symbol over the given window.
    async fn daily_sma(&self, symbol: &str, period: u32) -> TradeResult<SmaSeries>;

    /// Most recent daily close for a symbol.
    async fn latest_close(&self, symbol: &str) -> TradeResult<f64>;
}

pub struct AlphaVantageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(http: reqwest::Client, config: &MarketDataConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> TradeResult<T> {
        let url = format!("{}/query", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| TradeError::upstream("alpha-vantage", e))?;

        if !response.status().is_success() {
            return Err(TradeError::upstream(
                "alpha-vantage",
                format!("status {}", response.status()),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| TradeError::upstream("alpha-vantage", e))
    }
}

#[derive(Debug, Deserialize)]
struct SmaResponse {
    #[serde(rename = "Technical Analysis: SMA")]
    technical_analysis: Option<BTreeMap<String, SmaPoint>>,
}

#[derive(Debug, Deserialize)]
struct SmaPoint {
    #[serde(rename = "SMA")]
    sma: String,
}

#[derive(Debug, Deserialize)]
struct RsiResponse {
    #[serde(rename = "Meta Data")]
    meta: Option<RsiMeta>,
    #[serde(rename = "Technical Analysis: RSI")]
    technical_analysis: Option<BTreeMap<String, RsiPoint>>,
}

#[derive(Debug, Deserialize)]
struct RsiMeta {
    #[serde(rename = "3: Last Refreshed")]
    last_refreshed: String,
}

#[derive(Debug, Deserialize)]
struct RsiPoint {
    #[serde(rename = "RSI")]
    rsi: String,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// Alpha Vantage timestamps are either `YYYY-MM-DD` or a datetime whose
/// first ten characters are the date.
fn parse_date(symbol: &str, raw: &str) -> TradeResult<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| TradeError::insufficient(symbol, format!("unparseable date {raw:?}")))
}

fn parse_value(symbol: &str, field: &str, raw: &str) -> TradeResult<f64> {
    raw.parse()
        .map_err(|_| TradeError::insufficient(symbol, format!("unparseable {field} {raw:?}")))
}

#[async_trait]
impl MarketData for AlphaVantageClient {
    async fn weekly_rsi(&self, symbol: &str) -> TradeResult<RsiSeries> {
        let response: RsiResponse = self
            .query(&[
                ("function", "RSI"),
                ("symbol", symbol),
                ("interval", "weekly"),
                ("time_period", "10"),
                ("series_type", "open"),
            ])
            .await?;

        let meta = response
            .meta
            .ok_or_else(|| TradeError::insufficient(symbol, "RSI metadata missing"))?;
        let points = response
            .technical_analysis
            .ok_or_else(|| TradeError::insufficient(symbol, "RSI series missing"))?;

        let last_refreshed = parse_date(symbol, &meta.last_refreshed)?;
        let mut values = BTreeMap::new();
        for (date, point) in points {
            values.insert(
                parse_date(symbol, &date)?,
                parse_value(symbol, "RSI", &point.rsi)?,
            );
        }

        Ok(RsiSeries {
            last_refreshed,
            values,
        })
    }

    async fn daily_sma(&self, symbol: &str, period: u32) -> TradeResult<SmaSeries> {
        let period = period.to_string();
        let response: SmaResponse = self
            .query(&[
                ("function", "SMA"),
                ("symbol", symbol),
                ("interval", "daily"),
                ("time_period", period.as_str()),
                ("series_type", "open"),
            ])
            .await?;

        let points = response
            .technical_analysis
            .ok_or_else(|| TradeError::insufficient(symbol, "SMA series missing"))?;

        let mut values = BTreeMap::new();
        for (date, point) in points {
            values.insert(
                parse_date(symbol, &date)?,
                parse_value(symbol, "SMA", &point.sma)?,
            );
        }

        Ok(SmaSeries::new(values))
    }

    async fn latest_close(&self, symbol: &str) -> TradeResult<f64> {
        let response: DailyResponse = self
            .query(&[("function", "TIME_SERIES_DAILY"), ("symbol", symbol)])
            .await?;

        let series = response
            .series
            .ok_or_else(|| TradeError::insufficient(symbol, "daily time series missing"))?;

        // Keys sort lexicographically, which for YYYY-MM-DD is chronological.
        let (_, bar) = series
            .iter()
            .next_back()
            .ok_or_else(|| TradeError::insufficient(symbol, "daily time series empty"))?;

        parse_value(symbol, "close", &bar.close)
    }
}
