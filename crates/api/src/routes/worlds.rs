//! Route definitions for worlds.

use axum::routing::get;
use axum::Router;

use crate::handlers::worlds;
use crate::state::AppState;

/// World routes mounted at `/worlds`. World-scoped resources are merged in
/// by [`super::api_routes`].
///
/// ```text
/// GET    /                  -> list_worlds
/// POST   /                  -> create_world
/// GET    /{id}              -> get_world
/// PUT    /{id}              -> update_world
/// DELETE /{id}              -> delete_world
/// GET    /{id}/summary      -> world_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(worlds::list_worlds).post(worlds::create_world))
        .route(
            "/{id}",
            get(worlds::get_world)
                .put(worlds::update_world)
                .delete(worlds::delete_world),
        )
        .route("/{id}/summary", get(worlds::world_summary))
}
