//! Generic CRUD controller
//!
//! `resource_routes::<R>()` mounts list/get/create/update/delete for one
//! [`Resource`] under `/api/<table>`.

use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, warn};

use super::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::pagination::PageRequest;
use crate::resources::Resource;
use crate::{store, AppState};

/// GET /api/<table>
///
/// Query: `page`, `limit`, `search` and the resource's own filters.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Envelope<Vec<R::Record>>> {
    let page = PageRequest::from_params(
        params.get("page").map(String::as_str),
        params.get("limit").map(String::as_str),
    )?;

    match store::list::<R>(&state.db, &params, page).await {
        Ok((rows, total)) => Ok(Envelope::page(rows, page.metadata(total))),
        Err(err) if state.degraded_reads => {
            warn!(
                "Listing {} failed, answering with an empty page: {}",
                R::SPEC.table,
                err
            );
            Ok(Envelope::page(Vec::new(), page.metadata(0)))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /api/<table>/:id
pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Envelope<R::Record>> {
    let Path(id) = path?;
    let record = store::fetch::<R, _>(&state.db, &id, true)
        .await?
        .ok_or(ApiError::NotFound(R::SPEC.entity))?;

    Ok(Envelope::ok(record))
}

/// POST /api/<table>
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<(StatusCode, Envelope<R::Record>)> {
    let Json(input) = payload?;
    R::validate(&input)?;

    let record = store::create::<R>(&state.db, &input).await?;
    info!("Created {} record", R::SPEC.entity);

    Ok((
        StatusCode::CREATED,
        Envelope::ok(record).with_message(format!("{} created successfully", R::SPEC.entity)),
    ))
}

/// PUT /api/<table>/:id
///
/// Replaces every editable field.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<R::Input>, JsonRejection>,
) -> ApiResult<Envelope<R::Record>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    R::validate(&input)?;

    let record = store::update::<R>(&state.db, &id, &input)
        .await?
        .ok_or(ApiError::NotFound(R::SPEC.entity))?;

    Ok(Envelope::ok(record).with_message(format!("{} updated successfully", R::SPEC.entity)))
}

/// DELETE /api/<table>/:id
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Envelope<()>> {
    let Path(id) = path?;
    if !store::delete::<R>(&state.db, &id).await? {
        return Err(ApiError::NotFound(R::SPEC.entity));
    }

    info!("Deleted {} {}", R::SPEC.entity, id);
    Ok(Envelope::message(R::SPEC.deleted_message()))
}

/// Build the five CRUD routes for one resource
pub fn resource_routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/api/{}", R::SPEC.table);
    let item = format!("{}/:id", collection);

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, get(get_one::<R>).put(update::<R>).delete(delete::<R>))
}
