use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct PoolStats {
    /// Connections currently open.
    #[schema(example = 2)]
    pub total: u32,
    /// Open connections sitting idle in the pool.
    #[schema(example = 1)]
    pub idle: u32,
    /// Connections checked out by in-flight requests.
    #[schema(example = 1)]
    pub in_use: u32,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DbHealth {
    /// Round-trip latency of a trivial query, in milliseconds.
    #[schema(example = 0.742)]
    pub latency_ms: f64,
    pub pool: PoolStats,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
    pub db: DbHealth,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    operation_id = "health",
    summary = "Database latency and pool occupancy probe",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable"),
    ),
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    if let Err(e) = state.db.ping().await {
        tracing::error!("Health probe failed: {}", e);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "error" })),
        )
            .into_response();
    }
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    let pool = state.db.get_postgres_connection_pool();
    let total = pool.size();
    let idle = pool.num_idle() as u32;

    Json(HealthResponse {
        status: "ok",
        db: DbHealth {
            // Three decimals is plenty for a monitoring dashboard.
            latency_ms: (latency_ms * 1000.0).round() / 1000.0,
            pool: PoolStats {
                total,
                idle,
                in_use: total.saturating_sub(idle),
            },
        },
    })
    .into_response()
}
