//! Repository for the `worlds` table and the world summary procedure.

use serde::Serialize;
use worldweaver_core::search::SortOrder;
use worldweaver_core::types::EntityId;

use super::{Created, Stamped};
use crate::client::{ServiceConn, ServiceError};
use crate::models::search::WorldSummaryArgs;
use crate::models::world::{CreateWorld, UpdateWorld, World};

const TABLE: &str = "worlds";

#[derive(Serialize)]
struct NewWorld<'a> {
    owner_id: EntityId,
    #[serde(flatten)]
    input: &'a CreateWorld,
}

pub struct WorldRepo;

impl WorldRepo {
    /// Worlds owned by `owner_id`, most recently updated first.
    pub async fn list_for_owner(
        conn: &ServiceConn<'_>,
        owner_id: EntityId,
    ) -> Result<Vec<World>, ServiceError> {
        conn.table(TABLE)
            .select("*")
            .eq("owner_id", owner_id)
            .order("updated_at", SortOrder::Desc)
            .fetch_all()
            .await
    }

    pub async fn find(conn: &ServiceConn<'_>, id: EntityId) -> Result<Option<World>, ServiceError> {
        conn.table(TABLE).select("*").eq("id", id).fetch_optional().await
    }

    pub async fn create(
        conn: &ServiceConn<'_>,
        owner_id: EntityId,
        input: &CreateWorld,
    ) -> Result<World, ServiceError> {
        let row = NewWorld { owner_id, input };
        conn.table(TABLE).insert(&Created::now(&row)).await
    }

    pub async fn update(
        conn: &ServiceConn<'_>,
        id: EntityId,
        input: &UpdateWorld,
    ) -> Result<Option<World>, ServiceError> {
        conn.table(TABLE)
            .eq("id", id)
            .update(&Stamped::now(input))
            .await
    }

    pub async fn delete(conn: &ServiceConn<'_>, id: EntityId) -> Result<bool, ServiceError> {
        conn.table(TABLE).eq("id", id).delete().await
    }

    /// Aggregate counts for a world's dashboard, as computed by the service.
    pub async fn summary(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
    ) -> Result<serde_json::Value, ServiceError> {
        conn.rpc("get_world_summary", &WorldSummaryArgs { world_id })
            .await
    }
}
