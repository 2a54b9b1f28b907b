//! Handlers for a world's folder tree.
//!
//! The tree is rebuilt from the flat folder list on every read. Re-parenting
//! is checked against the current list before anything is written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use validator::Validate;
use worldweaver_core::error::CoreError;
use worldweaver_core::folder_tree::{
    build_tree, parent_options, validate_folder_color, would_create_cycle, TreeNode,
};
use worldweaver_core::types::EntityId;
use worldweaver_db::models::folder::{CreateFolder, Folder, FolderView, ParentOption, UpdateFolder};
use worldweaver_db::repositories::FolderRepo;
use worldweaver_db::ServiceConn;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{FolderViewQuery, ParentOptionsQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Either shape of the folder listing.
#[derive(Serialize)]
#[serde(untagged)]
enum FolderListing {
    Tree(Vec<TreeNode<Folder>>),
    Flat(Vec<Folder>),
}

/// Reject a parent that is not one of the world's `folders`.
fn ensure_parent_in_world(folders: &[Folder], parent_id: EntityId) -> AppResult<()> {
    if folders.iter().any(|f| f.id == parent_id) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(
            "Parent folder does not exist in this world".into(),
        )))
    }
}

async fn find_folder(conn: &ServiceConn<'_>, folder_id: EntityId) -> AppResult<Folder> {
    FolderRepo::find(conn, folder_id)
        .await?
        .ok_or_else(|| AppError::not_found("Folder", folder_id))
}

/// GET /api/v1/worlds/{id}/folders
///
/// `?view=tree` (default) nests children under their parents; `?view=flat`
/// returns the list ordered by position.
pub async fn list_folders(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Query(params): Query<FolderViewQuery>,
) -> AppResult<impl IntoResponse> {
    let folders = FolderRepo::list(&auth.conn(&state), world_id).await?;

    let data = match params.view {
        FolderView::Tree => FolderListing::Tree(build_tree(&folders)),
        FolderView::Flat => FolderListing::Flat(folders),
    };

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/worlds/{id}/folders/parent-options
///
/// Folders that may become the parent of `?editing`: every folder except
/// the edited one and its descendants.
pub async fn list_parent_options(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Query(params): Query<ParentOptionsQuery>,
) -> AppResult<impl IntoResponse> {
    let folders = FolderRepo::list(&auth.conn(&state), world_id).await?;

    let options: Vec<ParentOption> = parent_options(&folders, params.editing)
        .into_iter()
        .map(ParentOption::from)
        .collect();

    Ok(Json(DataResponse { data: options }))
}

/// POST /api/v1/worlds/{id}/folders
pub async fn create_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Json(mut input): Json<CreateFolder>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.validate()?;
    validate_folder_color(&input.color)?;

    let conn = auth.conn(&state);
    if let Some(parent_id) = input.parent_id {
        let folders = FolderRepo::list(&conn, world_id).await?;
        ensure_parent_in_world(&folders, parent_id)?;
    }

    let folder = FolderRepo::create(&conn, world_id, &input).await?;

    tracing::info!(
        folder_id = %folder.id,
        world_id = %world_id,
        user_id = %auth.user_id,
        "Folder created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: folder })))
}

/// PUT /api/v1/folders/{id}
///
/// `parent_id: null` moves the folder to the top level. Moving a folder
/// under itself or one of its descendants is rejected.
pub async fn update_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(folder_id): Path<EntityId>,
    Json(mut input): Json<UpdateFolder>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_mut() {
        *name = name.trim().to_string();
    }
    input.validate()?;
    if let Some(color) = input.color.as_deref() {
        validate_folder_color(color)?;
    }

    let conn = auth.conn(&state);
    let current = find_folder(&conn, folder_id).await?;

    if let Some(Some(new_parent)) = input.parent_id {
        let folders = FolderRepo::list(&conn, current.world_id).await?;
        if would_create_cycle(&folders, folder_id, Some(new_parent)) {
            return Err(AppError::Core(CoreError::Validation(
                "A folder cannot be moved into itself or one of its subfolders".into(),
            )));
        }
        ensure_parent_in_world(&folders, new_parent)?;
    }

    let folder = FolderRepo::update(&conn, folder_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Folder", folder_id))?;

    tracing::info!(folder_id = %folder_id, user_id = %auth.user_id, "Folder updated");

    Ok(Json(DataResponse { data: folder }))
}

/// DELETE /api/v1/folders/{id}
///
/// The hosted service's foreign keys decide what happens to the folder's
/// cards and subfolders.
pub async fn delete_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(folder_id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let deleted = FolderRepo::delete(&auth.conn(&state), folder_id).await?;

    if !deleted {
        return Err(AppError::not_found("Folder", folder_id));
    }

    tracing::info!(folder_id = %folder_id, user_id = %auth.user_id, "Folder deleted");

    Ok(StatusCode::NO_CONTENT)
}
