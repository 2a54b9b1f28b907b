//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;
use worldweaver_db::models::profile::UpdateProfile;
use worldweaver_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let conn = auth.conn(&state);
    let profile = ProfileRepo::find(&conn, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile", auth.user_id))?;

    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let conn = auth.conn(&state);
    let profile = ProfileRepo::update(&conn, auth.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Profile", auth.user_id))?;

    tracing::info!(user_id = %auth.user_id, "Profile updated");

    Ok(Json(DataResponse { data: profile }))
}
