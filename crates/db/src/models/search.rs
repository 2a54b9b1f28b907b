//! Result shapes of the search and summary procedures.

use serde::{Deserialize, Serialize};
use worldweaver_core::types::{EntityId, Timestamp};

/// Arguments of the `search_cards` procedure.
#[derive(Debug, Clone, Serialize)]
pub struct SearchCardsArgs<'a> {
    pub world_id: EntityId,
    pub search_query: &'a str,
    pub result_limit: u32,
}

/// One hit from `search_cards`, best match first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: EntityId,
    pub world_id: EntityId,
    pub type_id: EntityId,
    #[serde(default)]
    pub folder_id: Option<EntityId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

/// Arguments of the `get_world_summary` procedure.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummaryArgs {
    pub world_id: EntityId,
}
