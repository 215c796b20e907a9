//! Prometheus metrics for the HTTP surface and the decision cycle.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    pub registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub symbols_scanned_total: IntCounter,
    pub orders_placed_total: IntCounter,
    pub cycle_failures_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let symbols_scanned_total = IntCounter::new(
            "symbols_scanned_total",
            "Watchlist symbols compiled into indicator snapshots",
        )?;
        let orders_placed_total =
            IntCounter::new("orders_placed_total", "Market orders submitted to the brokerage")?;
        let cycle_failures_total =
            IntCounter::new("cycle_failures_total", "Decision cycles that ended in failure")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(symbols_scanned_total.clone()))?;
        registry.register(Box::new(orders_placed_total.clone()))?;
        registry.register(Box::new(cycle_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            symbols_scanned_total,
            orders_placed_total,
            cycle_failures_total,
        })
    }

    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
