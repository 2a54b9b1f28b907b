//! Repository for the `folders` table.
//!
//! Cards in a deleted folder become uncategorized through the service's
//! `ON DELETE SET NULL` foreign key.

use futures::future::try_join_all;
use serde::Serialize;
use worldweaver_core::search::SortOrder;
use worldweaver_core::types::EntityId;

use super::{Created, Stamped};
use crate::client::{ServiceConn, ServiceError};
use crate::models::folder::{CreateFolder, Folder, UpdateFolder};

const TABLE: &str = "folders";

#[derive(Serialize)]
struct NewFolder<'a> {
    world_id: EntityId,
    #[serde(flatten)]
    input: &'a CreateFolder,
}

pub struct FolderRepo;

impl FolderRepo {
    /// All folders of a world in position order, with `card_count` filled in.
    ///
    /// Each folder is counted with its own exact-count request, so large
    /// folders are not cut short by the service's row cap.
    pub async fn list(conn: &ServiceConn<'_>, world_id: EntityId) -> Result<Vec<Folder>, ServiceError> {
        let mut folders: Vec<Folder> = conn
            .table(TABLE)
            .select("*")
            .eq("world_id", world_id)
            .order("position", SortOrder::Asc)
            .fetch_all()
            .await?;

        let counts = try_join_all(
            folders
                .iter()
                .map(|folder| Self::card_count(conn, folder.id)),
        )
        .await?;
        for (folder, count) in folders.iter_mut().zip(counts) {
            folder.card_count = count;
        }

        Ok(folders)
    }

    /// Number of cards filed directly in `folder_id`.
    pub async fn card_count(conn: &ServiceConn<'_>, folder_id: EntityId) -> Result<u64, ServiceError> {
        conn.table("cards").eq("folder_id", folder_id).count().await
    }

    pub async fn find(conn: &ServiceConn<'_>, id: EntityId) -> Result<Option<Folder>, ServiceError> {
        conn.table(TABLE).select("*").eq("id", id).fetch_optional().await
    }

    pub async fn create(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
        input: &CreateFolder,
    ) -> Result<Folder, ServiceError> {
        let row = NewFolder { world_id, input };
        conn.table(TABLE).insert(&Created::now(&row)).await
    }

    pub async fn update(
        conn: &ServiceConn<'_>,
        id: EntityId,
        input: &UpdateFolder,
    ) -> Result<Option<Folder>, ServiceError> {
        conn.table(TABLE)
            .eq("id", id)
            .update(&Stamped::now(input))
            .await
    }

    pub async fn delete(conn: &ServiceConn<'_>, id: EntityId) -> Result<bool, ServiceError> {
        conn.table(TABLE).eq("id", id).delete().await
    }
}
