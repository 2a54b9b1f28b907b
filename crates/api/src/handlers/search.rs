//! Full-text card search.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use worldweaver_core::types::EntityId;
use worldweaver_db::models::search::SearchHit;
use worldweaver_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::SearchQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/worlds/{id}/search
///
/// Ranked matches for `?q=`, at most `?limit=` (default 10, max 50). A blank
/// query returns no hits without calling the service.
pub async fn search_cards(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(world_id): Path<EntityId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.trim();
    if query.is_empty() {
        return Ok(Json(DataResponse {
            data: Vec::<SearchHit>::new(),
        }));
    }

    let hits = SearchRepo::search_cards(&auth.conn(&state), world_id, query, params.limit()).await?;

    tracing::debug!(world_id = %world_id, hits = hits.len(), "Card search");

    Ok(Json(DataResponse { data: hits }))
}
