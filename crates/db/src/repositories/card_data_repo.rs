//! Repository for the `card_data` table.

use worldweaver_core::field_value::FieldValues;
use worldweaver_core::search::SortOrder;
use worldweaver_core::types::EntityId;

use crate::client::{ServiceConn, ServiceError};
use crate::models::card_data::{CardData, CardDataWrite};

const TABLE: &str = "card_data";

/// Conflict target for field value upserts.
const ON_CONFLICT: &str = "card_id,field_key";

pub struct CardDataRepo;

impl CardDataRepo {
    pub async fn list(conn: &ServiceConn<'_>, card_id: EntityId) -> Result<Vec<CardData>, ServiceError> {
        conn.table(TABLE)
            .select("*")
            .eq("card_id", card_id)
            .order("created_at", SortOrder::Asc)
            .fetch_all()
            .await
    }

    /// Write every value in one request, merging on `(card_id, field_key)`.
    pub async fn upsert(
        conn: &ServiceConn<'_>,
        card_id: EntityId,
        values: &FieldValues,
    ) -> Result<Vec<CardData>, ServiceError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let now = chrono::Utc::now();
        let rows: Vec<CardDataWrite> = values
            .iter()
            .map(|(key, value)| CardDataWrite {
                card_id,
                field_key: key.clone(),
                value: value.to_json(),
                updated_at: now,
            })
            .collect();
        conn.table(TABLE).upsert(&rows, ON_CONFLICT).await
    }

    /// Delete the stored values of `keys`, e.g. after a number was cleared.
    pub async fn delete_keys(
        conn: &ServiceConn<'_>,
        card_id: EntityId,
        keys: &[String],
    ) -> Result<bool, ServiceError> {
        if keys.is_empty() {
            return Ok(false);
        }
        conn.table(TABLE)
            .eq("card_id", card_id)
            .in_("field_key", keys)
            .delete()
            .await
    }
}
