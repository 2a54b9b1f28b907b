//! Full-text card search through the `search_cards` procedure.

use worldweaver_core::types::EntityId;

use crate::client::{ServiceConn, ServiceError};
use crate::models::search::{SearchCardsArgs, SearchHit};

pub struct SearchRepo;

impl SearchRepo {
    /// Ranked cards of one world matching `query`.
    pub async fn search_cards(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchHit>, ServiceError> {
        let args = SearchCardsArgs {
            world_id,
            search_query: query,
            result_limit: limit,
        };
        conn.rpc("search_cards", &args).await
    }
}
