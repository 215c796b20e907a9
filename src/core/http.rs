//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::core::orchestrator::Orchestrator;
use crate::metrics::Metrics;
use crate::models::decision::Decision;
use crate::services::brokerage::{AlpacaBrokerage, Brokerage};
use crate::services::market_data::{AlphaVantageClient, MarketData};
use crate::services::notify::{Notifier, RestNotifier};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Arc<Metrics>,
    pub health: Arc<RwLock<HealthStatus>>,
    pub start_time: Arc<Instant>,
    /// Serializes decision cycles so overlapping invocations cannot place
    /// duplicate orders.
    pub cycle_lock: Arc<Mutex<()>>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "equitrix-trading-bot"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Run one decision cycle. Any fatal error produces the fixed 500 body and
/// one SMS alert attempt.
async fn do_work(
    State(state): State<AppState>,
) -> Result<Json<Decision>, (StatusCode, Json<Value>)> {
    let _guard = state.cycle_lock.lock().await;

    match state.orchestrator.run_cycle().await {
        Ok(decision) => Ok(Json(decision)),
        Err(e) => {
            error!(error = %e, "decision cycle failed");
            state.metrics.cycle_failures_total.inc();

            if let Err(sms_err) = state
                .notifier
                .send_failure_sms("Something went wrong with the stock trading bot.")
                .await
            {
                error!(error = %sms_err, "failure alert dispatch failed");
            }

            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal Server Error"})),
            ))
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/doWork", get(do_work))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Wire the real HTTP collaborators together into an `AppState`.
pub fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let http = reqwest::Client::new();
    let metrics = Arc::new(Metrics::new()?);

    let brokerage: Arc<dyn Brokerage> =
        Arc::new(AlpacaBrokerage::new(http.clone(), &config.brokerage));
    let market_data: Arc<dyn MarketData> =
        Arc::new(AlphaVantageClient::new(http.clone(), &config.market_data));
    let notifier: Arc<dyn Notifier> = Arc::new(RestNotifier::new(
        http,
        config.email.clone(),
        config.sms.clone(),
    ));

    let orchestrator = Arc::new(Orchestrator::new(
        config,
        brokerage,
        market_data,
        notifier.clone(),
        metrics.clone(),
    ));

    Ok(AppState {
        orchestrator,
        notifier,
        metrics,
        health: Arc::new(RwLock::new(HealthStatus::default())),
        start_time: Arc::new(Instant::now()),
        cycle_lock: Arc::new(Mutex::new(())),
    })
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.port;
    let state = build_state(&config)?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
