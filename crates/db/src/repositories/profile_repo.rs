//! Repository for the `profiles` table.

use worldweaver_core::types::EntityId;

use super::Stamped;
use crate::client::{ServiceConn, ServiceError};
use crate::models::profile::{Profile, UpdateProfile};

const TABLE: &str = "profiles";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find(conn: &ServiceConn<'_>, id: EntityId) -> Result<Option<Profile>, ServiceError> {
        conn.table(TABLE).select("*").eq("id", id).fetch_optional().await
    }

    pub async fn update(
        conn: &ServiceConn<'_>,
        id: EntityId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, ServiceError> {
        conn.table(TABLE)
            .eq("id", id)
            .update(&Stamped::now(input))
            .await
    }
}
