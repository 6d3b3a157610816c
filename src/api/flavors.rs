//! Flavor CRUD endpoints.
//!
//! Handlers only map HTTP to [`FlavorService`] calls; identifiers are parsed
//! and bodies checked here, everything else lives in the service.
//!
//! [`FlavorService`]: crate::services::FlavorService

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::observability::record_flavor_id;
use super::validation::{parse_flavor_id, require_name};
use super::{ApiError, AppState, CreateFlavorRequest, UpdateFlavorRequest};
use crate::models::{Flavor, FlavorChanges, NewFlavor};

/// `GET /api/flavors`
pub async fn list_flavors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Flavor>>, ApiError> {
    let flavors = state.flavor_service().list().await?;
    Ok(Json(flavors))
}

/// `GET /api/flavors/{id}`
///
/// # Errors
/// 400 for a malformed id, 404 when no row matches.
pub async fn get_flavor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Flavor>, ApiError> {
    let id = parse_flavor_id(&id)?;
    record_flavor_id(id);
    let flavor = state.flavor_service().get(id).await?;
    Ok(Json(flavor))
}

/// `POST /api/flavors`
///
/// `is_favorite` defaults to `false` when absent or null.
pub async fn create_flavor(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateFlavorRequest>, JsonRejection>,
) -> Result<Json<Flavor>, ApiError> {
    let Json(payload) = payload?;
    let name = require_name(payload.name)?;

    let flavor = state
        .flavor_service()
        .create(NewFlavor::new(name, payload.is_favorite.unwrap_or(false)))
        .await?;
    record_flavor_id(flavor.id);

    metrics::counter!("flavors_created_total").increment(1);
    info!(flavor_id = %flavor.id, name = %flavor.name, "Flavor created");

    Ok(Json(flavor))
}

/// `PUT /api/flavors/{id}`
///
/// Replaces both fields; an absent `is_favorite` is written as `false`.
pub async fn update_flavor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFlavorRequest>, JsonRejection>,
) -> Result<Json<Flavor>, ApiError> {
    let id = parse_flavor_id(&id)?;
    record_flavor_id(id);
    let Json(payload) = payload?;
    let name = require_name(payload.name)?;

    let flavor = state
        .flavor_service()
        .update(
            id,
            FlavorChanges::new(name, payload.is_favorite.unwrap_or(false)),
        )
        .await?;

    info!(flavor_id = %flavor.id, "Flavor updated");
    Ok(Json(flavor))
}

/// `DELETE /api/flavors/{id}`
///
/// Always 204 on success, whether or not a row existed.
pub async fn delete_flavor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_flavor_id(&id)?;
    record_flavor_id(id);

    if state.flavor_service().delete(id).await? {
        metrics::counter!("flavors_deleted_total").increment(1);
        info!(flavor_id = %id, "Flavor deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}
