//! Route definitions for cards.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// World-scoped card routes, merged under `/worlds`.
///
/// ```text
/// GET    /{id}/cards        -> list_cards
/// POST   /{id}/cards        -> create_card
/// ```
pub fn world_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/cards",
        get(cards::list_cards).post(cards::create_card),
    )
}

/// Card routes mounted at `/cards`.
///
/// ```text
/// GET    /{id}              -> get_card
/// PUT    /{id}              -> update_card
/// DELETE /{id}              -> delete_card
/// GET    /{id}/form         -> get_card_form
/// PUT    /{id}/fields       -> update_card_fields
/// POST   /bulk-move         -> bulk_move
/// POST   /bulk-delete       -> bulk_delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/{id}/form", get(cards::get_card_form))
        .route("/{id}/fields", put(cards::update_card_fields))
        .route("/bulk-move", post(cards::bulk_move))
        .route("/bulk-delete", post(cards::bulk_delete))
}
