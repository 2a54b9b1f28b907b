//! Saved search model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;
use worldweaver_core::search::SearchFilters;
use worldweaver_core::types::{EntityId, Timestamp};

/// A row from the `saved_searches` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub id: EntityId,
    pub user_id: EntityId,
    pub world_id: EntityId,
    pub name: String,
    pub filters: SearchFilters,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSavedSearch {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    pub filters: SearchFilters,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSavedSearch {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
}
