//! Route definitions for saved searches.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::saved_searches;
use crate::state::AppState;

/// World-scoped saved search routes, merged under `/worlds`.
///
/// ```text
/// GET    /{id}/saved-searches    -> list_saved_searches
/// POST   /{id}/saved-searches    -> create_saved_search
/// ```
pub fn world_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/saved-searches",
        get(saved_searches::list_saved_searches).post(saved_searches::create_saved_search),
    )
}

/// Saved search routes mounted at `/saved-searches`.
///
/// ```text
/// PUT    /{id}              -> update_saved_search
/// DELETE /{id}              -> delete_saved_search
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        put(saved_searches::update_saved_search).delete(saved_searches::delete_saved_search),
    )
}
