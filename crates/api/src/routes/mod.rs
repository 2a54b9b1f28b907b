pub mod card_types;
pub mod cards;
pub mod folders;
pub mod health;
pub mod profile;
pub mod saved_searches;
pub mod search;
pub mod worlds;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /profile                                         get, update
///
/// /worlds                                          list, create
/// /worlds/{id}                                     get, update, delete
/// /worlds/{id}/summary                             dashboard counts
/// /worlds/{id}/folders                             list (?view=tree|flat), create
/// /worlds/{id}/folders/parent-options              parent selector (?editing=)
/// /worlds/{id}/card-types                          list, create
/// /worlds/{id}/card-types/from-template            copy a template (POST)
/// /worlds/{id}/cards                               list (paged), create
/// /worlds/{id}/search                              full-text search (?q=&limit=)
/// /worlds/{id}/saved-searches                      list, create
///
/// /folders/{id}                                    update, delete
///
/// /card-types/{id}                                 get, update, delete
/// /card-types/{id}/defaults                        initial field values
/// /card-type-templates                             catalog by category
/// /field-kinds                                     editor kind menu
///
/// /cards/{id}                                      get, update, delete
/// /cards/{id}/form                                 field controls
/// /cards/{id}/fields                               write field values (PUT)
/// /cards/bulk-move                                 move many (POST)
/// /cards/bulk-delete                               delete many (POST)
///
/// /saved-searches/{id}                             update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    let world_scoped = worlds::router()
        .merge(folders::world_router())
        .merge(card_types::world_router())
        .merge(cards::world_router())
        .merge(search::world_router())
        .merge(saved_searches::world_router());

    Router::new()
        .nest("/profile", profile::router())
        .nest("/worlds", world_scoped)
        .nest("/folders", folders::router())
        .nest("/card-types", card_types::router())
        .nest("/card-type-templates", card_types::template_router())
        .nest("/field-kinds", card_types::field_kind_router())
        .nest("/cards", cards::router())
        .nest("/saved-searches", saved_searches::router())
}
