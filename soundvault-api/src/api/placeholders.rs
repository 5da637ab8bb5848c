//! Endpoints the dashboard calls that have no backing implementation yet
//!
//! Each answers with a static success envelope.

use axum::{
    extract::Path,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use super::envelope::Envelope;
use crate::AppState;

fn coming_soon(data: Value, feature: &str) -> Envelope<Value> {
    Envelope::ok(data).with_message(format!("{} coming soon", feature))
}

/// POST /api/auth/login
pub async fn login() -> Envelope<Value> {
    coming_soon(json!({}), "Authentication")
}

/// POST /api/auth/register
pub async fn register() -> Envelope<Value> {
    coming_soon(json!({}), "Registration")
}

/// GET /api/auth/me
pub async fn current_user() -> Envelope<Value> {
    coming_soon(json!({}), "User profile")
}

/// GET /api/analytics
pub async fn analytics_overview() -> Envelope<Value> {
    coming_soon(json!({}), "Detailed analytics")
}

/// GET /api/royalties
pub async fn list_royalties() -> Envelope<Value> {
    coming_soon(json!([]), "Royalty tracking")
}

/// GET /api/royalties/:id
pub async fn get_royalty(Path(_id): Path<String>) -> Envelope<Value> {
    coming_soon(json!({}), "Royalty details")
}

/// POST /api/royalties
pub async fn create_royalty() -> Envelope<Value> {
    coming_soon(json!({}), "Royalty creation")
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(current_user))
}

pub fn royalty_routes() -> Router<AppState> {
    Router::new()
        .route("/api/royalties", get(list_royalties).post(create_royalty))
        .route("/api/royalties/:id", get(get_royalty))
}
