//! Catalog analytics

use axum::{extract::State, routing::get, Router};
use serde::Serialize;
use sqlx::FromRow;

use super::envelope::Envelope;
use crate::error::ApiResult;
use crate::AppState;

/// Catalog-wide totals for the dashboard
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DashboardSummary {
    pub artists: i64,
    pub publishers: i64,
    pub labels: i64,
    pub recordings: i64,
    pub releases: i64,
    pub total_revenue: f64,
    pub total_streams: i64,
}

/// GET /api/analytics/dashboard
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Envelope<DashboardSummary>> {
    let summary = sqlx::query_as::<_, DashboardSummary>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM artists WHERE is_active = 1) AS artists,
            (SELECT COUNT(*) FROM publishers WHERE is_active = 1) AS publishers,
            (SELECT COUNT(*) FROM labels WHERE status = 'active') AS labels,
            (SELECT COUNT(*) FROM recordings) AS recordings,
            (SELECT COUNT(*) FROM releases) AS releases,
            (SELECT CAST(COALESCE(SUM(revenue), 0) AS REAL) FROM royalties) AS total_revenue,
            (SELECT COALESCE(SUM(streams), 0) FROM royalties) AS total_streams
        "#,
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Envelope::ok(summary))
}

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analytics", get(super::placeholders::analytics_overview))
        .route("/api/analytics/dashboard", get(dashboard))
}
