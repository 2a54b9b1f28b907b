//! Route definitions for folders.
//!
//! Two routers are provided:
//! - `world_router()` for world-scoped routes merged under `/worlds`
//! - `router()` for folder routes mounted at `/folders`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::folders;
use crate::state::AppState;

/// World-scoped folder routes, merged under `/worlds`.
///
/// ```text
/// GET    /{id}/folders                   -> list_folders
/// POST   /{id}/folders                   -> create_folder
/// GET    /{id}/folders/parent-options    -> list_parent_options
/// ```
pub fn world_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route(
            "/{id}/folders/parent-options",
            get(folders::list_parent_options),
        )
}

/// Folder routes mounted at `/folders`.
///
/// ```text
/// PUT    /{id}              -> update_folder
/// DELETE /{id}              -> delete_folder
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(folders::update_folder).delete(folders::delete_folder),
    )
}
