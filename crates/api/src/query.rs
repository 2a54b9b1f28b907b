//! Shared query parameter types for API handlers.

use serde::Deserialize;
use worldweaver_core::error::CoreError;
use worldweaver_core::search::{
    clamp_limit, parse_id_list, CardListParams, CardSort, SortOrder, DEFAULT_SEARCH_LIMIT,
    MAX_SEARCH_LIMIT,
};
use worldweaver_core::types::EntityId;
use worldweaver_db::models::folder::FolderView;

/// Card list parameters (`?q=&type_ids=a,b&folder_ids=&sort_by=&sort_order=&page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct CardListQuery {
    pub q: Option<String>,
    /// Comma-separated card type ids.
    pub type_ids: Option<String>,
    /// Comma-separated folder ids.
    pub folder_ids: Option<String>,
    pub sort_by: Option<CardSort>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CardListQuery {
    pub fn into_params(self) -> Result<CardListParams, CoreError> {
        let mut params = CardListParams::new(self.page, self.limit)?;
        params.query = self.q.filter(|q| !q.trim().is_empty());
        if let Some(raw) = self.type_ids.as_deref() {
            params.type_ids = parse_id_list(raw)?;
        }
        if let Some(raw) = self.folder_ids.as_deref() {
            params.folder_ids = parse_id_list(raw)?;
        }
        params.sort_by = self.sort_by.unwrap_or_default();
        params.sort_order = self.sort_order.unwrap_or_default();
        Ok(params)
    }
}

/// Full-text search parameters (`?q=&limit=`). The limit is clamped.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn limit(&self) -> u32 {
        clamp_limit(self.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT)
    }
}

/// `?view=tree|flat` on the folder listing.
#[derive(Debug, Default, Deserialize)]
pub struct FolderViewQuery {
    #[serde(default)]
    pub view: FolderView,
}

/// `?editing={folder_id}` on the parent selector.
#[derive(Debug, Default, Deserialize)]
pub struct ParentOptionsQuery {
    pub editing: Option<EntityId>,
}
