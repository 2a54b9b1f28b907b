//! Route definitions for full-text search.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// World-scoped search, merged under `/worlds`.
///
/// ```text
/// GET    /{id}/search       -> search_cards
/// ```
pub fn world_router() -> Router<AppState> {
    Router::new().route("/{id}/search", get(search::search_cards))
}
