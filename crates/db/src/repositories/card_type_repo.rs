//! Repository for the `card_types` and `card_type_templates` tables.

use serde::Serialize;
use worldweaver_core::schema_builder::CardTypeDraft;
use worldweaver_core::search::SortOrder;
use worldweaver_core::types::EntityId;

use super::{Created, Stamped};
use crate::client::{ServiceConn, ServiceError};
use crate::models::card_type::CardType;
use crate::models::template::CardTypeTemplate;

const TABLE: &str = "card_types";
const TEMPLATE_TABLE: &str = "card_type_templates";

#[derive(Serialize)]
struct NewCardType<'a> {
    world_id: EntityId,
    #[serde(flatten)]
    draft: &'a CardTypeDraft,
}

/// Full replacement body. `description: null` is written explicitly.
#[derive(Serialize)]
struct ReplaceCardType<'a> {
    name: &'a str,
    description: Option<&'a str>,
    icon: &'a str,
    color: &'a str,
    schema: &'a [worldweaver_core::field_schema::FieldSchema],
}

pub struct CardTypeRepo;

impl CardTypeRepo {
    // -----------------------------------------------------------------------
    // Card types
    // -----------------------------------------------------------------------

    /// A world's card types, by name.
    pub async fn list(conn: &ServiceConn<'_>, world_id: EntityId) -> Result<Vec<CardType>, ServiceError> {
        conn.table(TABLE)
            .select("*")
            .eq("world_id", world_id)
            .order("name", SortOrder::Asc)
            .fetch_all()
            .await
    }

    pub async fn find(conn: &ServiceConn<'_>, id: EntityId) -> Result<Option<CardType>, ServiceError> {
        conn.table(TABLE).select("*").eq("id", id).fetch_optional().await
    }

    /// Insert a card type from an already validated draft.
    pub async fn create(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
        draft: &CardTypeDraft,
    ) -> Result<CardType, ServiceError> {
        let row = NewCardType { world_id, draft };
        conn.table(TABLE).insert(&Created::now(&row)).await
    }

    /// Replace every editable member, schema included.
    pub async fn replace(
        conn: &ServiceConn<'_>,
        id: EntityId,
        draft: &CardTypeDraft,
    ) -> Result<Option<CardType>, ServiceError> {
        let body = ReplaceCardType {
            name: &draft.name,
            description: draft.description.as_deref(),
            icon: &draft.icon,
            color: &draft.color,
            schema: &draft.schema,
        };
        conn.table(TABLE)
            .eq("id", id)
            .update(&Stamped::now(&body))
            .await
    }

    /// Delete a card type. Fails with a foreign key error while cards use it.
    pub async fn delete(conn: &ServiceConn<'_>, id: EntityId) -> Result<bool, ServiceError> {
        conn.table(TABLE).eq("id", id).delete().await
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    /// The template catalog, by category then name.
    pub async fn list_templates(conn: &ServiceConn<'_>) -> Result<Vec<CardTypeTemplate>, ServiceError> {
        conn.table(TEMPLATE_TABLE)
            .select("*")
            .order("category", SortOrder::Asc)
            .order("name", SortOrder::Asc)
            .fetch_all()
            .await
    }

    pub async fn find_template(
        conn: &ServiceConn<'_>,
        id: EntityId,
    ) -> Result<Option<CardTypeTemplate>, ServiceError> {
        conn.table(TEMPLATE_TABLE)
            .select("*")
            .eq("id", id)
            .fetch_optional()
            .await
    }
}
