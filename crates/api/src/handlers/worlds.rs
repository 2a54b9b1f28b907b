//! Handlers for worlds and the world dashboard summary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use worldweaver_core::types::EntityId;
use worldweaver_db::models::world::{CreateWorld, UpdateWorld};
use worldweaver_db::repositories::WorldRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/worlds
///
/// The caller's worlds, most recently updated first.
pub async fn list_worlds(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let worlds = WorldRepo::list_for_owner(&auth.conn(&state), auth.user_id).await?;

    Ok(Json(DataResponse { data: worlds }))
}

/// POST /api/v1/worlds
pub async fn create_world(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateWorld>,
) -> AppResult<impl IntoResponse> {
    input.title = input.title.trim().to_string();
    input.validate()?;

    let world = WorldRepo::create(&auth.conn(&state), auth.user_id, &input).await?;

    tracing::info!(world_id = %world.id, user_id = %auth.user_id, "World created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: world })))
}

/// GET /api/v1/worlds/{id}
pub async fn get_world(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let world = WorldRepo::find(&auth.conn(&state), world_id)
        .await?
        .ok_or_else(|| AppError::not_found("World", world_id))?;

    Ok(Json(DataResponse { data: world }))
}

/// PUT /api/v1/worlds/{id}
pub async fn update_world(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Json(input): Json<UpdateWorld>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let world = WorldRepo::update(&auth.conn(&state), world_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("World", world_id))?;

    tracing::info!(world_id = %world_id, user_id = %auth.user_id, "World updated");

    Ok(Json(DataResponse { data: world }))
}

/// DELETE /api/v1/worlds/{id}
///
/// Folders, card types and cards go with the world.
pub async fn delete_world(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorldRepo::delete(&auth.conn(&state), world_id).await?;

    if !deleted {
        return Err(AppError::not_found("World", world_id));
    }

    tracing::info!(world_id = %world_id, user_id = %auth.user_id, "World deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/worlds/{id}/summary
///
/// Dashboard counts computed by the `get_world_summary` procedure.
pub async fn world_summary(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let conn = auth.conn(&state);
    if WorldRepo::find(&conn, world_id).await?.is_none() {
        return Err(AppError::not_found("World", world_id));
    }

    let summary = WorldRepo::summary(&conn, world_id).await?;

    Ok(Json(DataResponse { data: summary }))
}
