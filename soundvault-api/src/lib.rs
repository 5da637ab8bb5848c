//! soundvault-api library - music catalog REST service
//!
//! CRUD, search and pagination over artists, labels, publishers, recordings
//! and releases, plus health and analytics endpoints.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    Router,
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pagination;
pub mod query;
pub mod resources;
pub mod store;

use api::Envelope;
use resources::{Artists, Labels, Publishers, Recordings, Releases};

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Answer failed listings with an empty page instead of an error
    pub degraded_reads: bool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, degraded_reads: bool) -> Self {
        Self {
            db,
            degraded_reads,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// CORS is added separately by [`cors_layer`] since it depends on
/// configuration.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .merge(api::resource_routes::<Artists>())
        .merge(api::resource_routes::<Labels>())
        .merge(api::resource_routes::<Publishers>())
        .merge(api::resource_routes::<Recordings>())
        .merge(api::resource_routes::<Releases>())
        .merge(api::health_routes())
        .merge(api::analytics_routes())
        .merge(api::auth_routes())
        .merge(api::royalty_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy admitting the dashboard origin with credentials
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = origin
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", origin, e))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

async fn method_not_allowed(method: Method, uri: Uri) -> (StatusCode, Envelope<()>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Envelope::error(format!("Method not allowed - {} {}", method, uri.path())),
    )
}

async fn not_found(uri: Uri) -> (StatusCode, Envelope<()>) {
    (
        StatusCode::NOT_FOUND,
        Envelope::error(format!("Not found - {}", uri.path())),
    )
}
