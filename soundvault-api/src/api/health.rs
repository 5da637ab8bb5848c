//! Health check endpoints
//!
//! `/health` is pure liveness; the `/api/health/*` family also probes the
//! database.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::AppState;

const MODULE: &str = "soundvault-api";

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    pub timestamp: String,
}

/// Database probe result
#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub closed: bool,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealth {
    #[serde(flatten)]
    pub service: HealthResponse,
    pub database: DatabaseHealth,
    pub pool: PoolStats,
}

fn liveness(state: &AppState) -> HealthResponse {
    let uptime = Utc::now().signed_duration_since(state.startup_time);

    HealthResponse {
        status: "ok".to_string(),
        module: MODULE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
        timestamp: Utc::now().to_rfc3339(),
    }
}

async fn probe_database(state: &AppState) -> DatabaseHealth {
    let timestamp = Utc::now().to_rfc3339();

    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => DatabaseHealth {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            error: None,
            timestamp,
        },
        Err(e) => {
            warn!("Database health check failed: {}", e);
            DatabaseHealth {
                status: "unhealthy".to_string(),
                database: "disconnected".to_string(),
                error: Some(e.to_string()),
                timestamp,
            }
        }
    }
}

/// GET /health and GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(liveness(&state))
}

/// GET /api/health/db
///
/// 503 when the store cannot answer `SELECT 1`.
pub async fn database_health(State(state): State<AppState>) -> (StatusCode, Json<DatabaseHealth>) {
    let health = probe_database(&state).await;
    let status = if health.error.is_none() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

/// GET /api/health/detailed
pub async fn detailed_health(State(state): State<AppState>) -> Json<DetailedHealth> {
    let database = probe_database(&state).await;
    let mut service = liveness(&state);
    if database.error.is_some() {
        service.status = "degraded".to_string();
    }

    Json(DetailedHealth {
        service,
        database,
        pool: PoolStats {
            size: state.db.size(),
            idle: state.db.num_idle(),
            closed: state.db.is_closed(),
        },
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
        .route("/api/health/db", get(database_health))
        .route("/api/health/detailed", get(detailed_health))
}
