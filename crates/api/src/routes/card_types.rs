//! Route definitions for card types, the template catalog and the field
//! kind menu.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::card_types;
use crate::state::AppState;

/// World-scoped card type routes, merged under `/worlds`.
///
/// ```text
/// GET    /{id}/card-types                  -> list_card_types
/// POST   /{id}/card-types                  -> create_card_type
/// POST   /{id}/card-types/from-template    -> create_from_template
/// ```
pub fn world_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/card-types",
            get(card_types::list_card_types).post(card_types::create_card_type),
        )
        .route(
            "/{id}/card-types/from-template",
            post(card_types::create_from_template),
        )
}

/// Card type routes mounted at `/card-types`.
///
/// ```text
/// GET    /{id}              -> get_card_type
/// PUT    /{id}              -> update_card_type
/// DELETE /{id}              -> delete_card_type
/// GET    /{id}/defaults     -> card_type_defaults
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(card_types::get_card_type)
                .put(card_types::update_card_type)
                .delete(card_types::delete_card_type),
        )
        .route("/{id}/defaults", get(card_types::card_type_defaults))
}

/// Template catalog mounted at `/card-type-templates`.
///
/// ```text
/// GET    /                  -> list_templates
/// ```
pub fn template_router() -> Router<AppState> {
    Router::new().route("/", get(card_types::list_templates))
}

/// Field kind menu mounted at `/field-kinds`.
///
/// ```text
/// GET    /                  -> list_field_kinds
/// ```
pub fn field_kind_router() -> Router<AppState> {
    Router::new().route("/", get(card_types::list_field_kinds))
}
