//! Repository for the `saved_searches` table.

use serde::Serialize;
use worldweaver_core::search::{SearchFilters, SortOrder};
use worldweaver_core::types::EntityId;

use super::{Created, Stamped};
use crate::client::{ServiceConn, ServiceError};
use crate::models::saved_search::{CreateSavedSearch, SavedSearch, UpdateSavedSearch};

const TABLE: &str = "saved_searches";

#[derive(Serialize)]
struct NewSavedSearch<'a> {
    user_id: EntityId,
    world_id: EntityId,
    name: &'a str,
    filters: &'a SearchFilters,
}

pub struct SavedSearchRepo;

impl SavedSearchRepo {
    /// A world's saved searches, most recently updated first.
    pub async fn list(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
    ) -> Result<Vec<SavedSearch>, ServiceError> {
        conn.table(TABLE)
            .select("*")
            .eq("world_id", world_id)
            .order("updated_at", SortOrder::Desc)
            .fetch_all()
            .await
    }

    pub async fn create(
        conn: &ServiceConn<'_>,
        user_id: EntityId,
        world_id: EntityId,
        input: &CreateSavedSearch,
    ) -> Result<SavedSearch, ServiceError> {
        let row = NewSavedSearch {
            user_id,
            world_id,
            name: input.name.trim(),
            filters: &input.filters,
        };
        conn.table(TABLE).insert(&Created::now(&row)).await
    }

    pub async fn update(
        conn: &ServiceConn<'_>,
        id: EntityId,
        input: &UpdateSavedSearch,
    ) -> Result<Option<SavedSearch>, ServiceError> {
        conn.table(TABLE)
            .eq("id", id)
            .update(&Stamped::now(input))
            .await
    }

    pub async fn delete(conn: &ServiceConn<'_>, id: EntityId) -> Result<bool, ServiceError> {
        conn.table(TABLE).eq("id", id).delete().await
    }
}
