//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::dashboard::{Dashboard, IndexKey};
use crate::error::{AnalysisError, DashboardError};
use crate::metrics::Metrics;
use crate::models::MarketDirection;

pub const SERVICE_NAME: &str = "disha-dashboard";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub dashboard: Arc<Dashboard>,
}

/// Error body returned by the dashboard endpoints.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(e: DashboardError) -> Self {
        let status = match &e {
            DashboardError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::Analysis(AnalysisError::InsufficientData { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            DashboardError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

fn parse_index(raw: &str) -> Result<IndexKey, ApiError> {
    raw.parse().map_err(|message| ApiError {
        status: StatusCode::NOT_FOUND,
        message,
    })
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
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

/// List every index with its load status
async fn list_indices(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "range": state.dashboard.range(),
        "message": state.dashboard.fetch_message(),
        "indices": state.dashboard.summaries(),
    }))
}

/// Candles and SMA overlays for one index
async fn get_chart(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = parse_index(&index)?;
    let chart = state.dashboard.chart(key)?;
    Ok(Json(json!(chart)))
}

async fn get_table(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let key = parse_index(&index)?;
    let candles = state.dashboard.table(key)?;
    Ok(Json(json!(candles)))
}

async fn get_direction(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> Result<Json<MarketDirection>, ApiError> {
    let key = parse_index(&index)?;
    Ok(Json(state.dashboard.direction(key)?))
}

/// Market direction section: every loaded index
async fn market_direction(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.dashboard.market_directions()))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/indices", get(list_indices))
        .route("/api/indices/{index}/chart", get(get_chart))
        .route("/api/indices/{index}/table", get(get_table))
        .route("/api/indices/{index}/direction", get(get_direction))
        .route("/api/market-direction", get(market_direction))
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

pub async fn start_server(
    port: u16,
    dashboard: Arc<Dashboard>,
    metrics: Arc<Metrics>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        dashboard,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
