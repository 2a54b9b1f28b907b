//! Handlers for a user's saved searches in a world.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use worldweaver_core::types::EntityId;
use worldweaver_db::models::saved_search::{CreateSavedSearch, UpdateSavedSearch};
use worldweaver_db::repositories::SavedSearchRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/worlds/{id}/saved-searches
pub async fn list_saved_searches(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let searches = SavedSearchRepo::list(&auth.conn(&state), world_id).await?;

    Ok(Json(DataResponse { data: searches }))
}

/// POST /api/v1/worlds/{id}/saved-searches
pub async fn create_saved_search(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Json(input): Json<CreateSavedSearch>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let search = SavedSearchRepo::create(&auth.conn(&state), auth.user_id, world_id, &input).await?;

    tracing::info!(
        saved_search_id = %search.id,
        world_id = %world_id,
        user_id = %auth.user_id,
        "Saved search created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: search })))
}

/// PUT /api/v1/saved-searches/{id}
pub async fn update_saved_search(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(search_id): Path<EntityId>,
    Json(input): Json<UpdateSavedSearch>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let search = SavedSearchRepo::update(&auth.conn(&state), search_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("SavedSearch", search_id))?;

    tracing::info!(saved_search_id = %search_id, user_id = %auth.user_id, "Saved search updated");

    Ok(Json(DataResponse { data: search }))
}

/// DELETE /api/v1/saved-searches/{id}
pub async fn delete_saved_search(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(search_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SavedSearchRepo::delete(&auth.conn(&state), search_id).await?;

    if !deleted {
        return Err(AppError::not_found("SavedSearch", search_id));
    }

    tracing::info!(saved_search_id = %search_id, user_id = %auth.user_id, "Saved search deleted");

    Ok(StatusCode::NO_CONTENT)
}
