//! Repository for the `cards` table and the links read with card detail.

use serde::Serialize;
use worldweaver_core::search::{CardListParams, SortOrder};
use worldweaver_core::types::{EntityId, Timestamp};

use super::Stamped;
use crate::client::{ServiceConn, ServiceError};
use crate::models::card::{Card, CardListItem, CardPage, CreateCard, UpdateCard};
use crate::models::card_link::CardLinkView;

const TABLE: &str = "cards";
const LINK_TABLE: &str = "card_links";

/// Card columns plus the embedded type and folder summaries.
const CARD_LIST_SELECT: &str =
    "*,type:card_types(id,name,icon,color),folder:folders(id,name,color)";

/// Outgoing links with the target card's name and type.
const LINKS_FROM_SELECT: &str =
    "*,to_card:cards!to_card_id(id,name,type:card_types(id,name,icon,color))";

/// Incoming links with the source card's name and type.
const LINKS_TO_SELECT: &str =
    "*,from_card:cards!from_card_id(id,name,type:card_types(id,name,icon,color))";

#[derive(Serialize)]
struct NewCard<'a> {
    world_id: EntityId,
    type_id: EntityId,
    folder_id: Option<EntityId>,
    name: &'a str,
    slug: &'a str,
    summary: Option<&'a str>,
    cover_image_url: Option<&'a str>,
    position: i32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Serialize)]
struct CardPatch<'a> {
    #[serde(flatten)]
    input: &'a UpdateCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
}

#[derive(Serialize)]
struct FolderMove {
    folder_id: Option<EntityId>,
}

pub struct CardRepo;

impl CardRepo {
    /// One page of a world's cards, filtered and sorted per `params`.
    pub async fn list(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
        params: &CardListParams,
    ) -> Result<CardPage, ServiceError> {
        let range = params.range();

        let mut query = conn
            .table(TABLE)
            .select(CARD_LIST_SELECT)
            .eq("world_id", world_id);
        if !params.type_ids.is_empty() {
            query = query.in_("type_id", &params.type_ids);
        }
        if !params.folder_ids.is_empty() {
            query = query.in_("folder_id", &params.folder_ids);
        }
        if let Some(tsquery) = params.tsquery() {
            query = query.fts("name", &tsquery);
        }

        let (data, total) = query
            .order(params.sort_by.column(), params.sort_order)
            .offset(range.from)
            .limit(u64::from(params.limit))
            .fetch_counted()
            .await?;

        Ok(CardPage {
            data,
            total,
            page: params.page,
            limit: params.limit,
            has_more: range.has_more(total),
        })
    }

    pub async fn find(conn: &ServiceConn<'_>, id: EntityId) -> Result<Option<Card>, ServiceError> {
        conn.table(TABLE).select("*").eq("id", id).fetch_optional().await
    }

    /// One card with its type and folder summaries.
    pub async fn find_listed(
        conn: &ServiceConn<'_>,
        id: EntityId,
    ) -> Result<Option<CardListItem>, ServiceError> {
        conn.table(TABLE)
            .select(CARD_LIST_SELECT)
            .eq("id", id)
            .fetch_optional()
            .await
    }

    pub async fn create(
        conn: &ServiceConn<'_>,
        world_id: EntityId,
        input: &CreateCard,
        slug: &str,
    ) -> Result<Card, ServiceError> {
        let now = chrono::Utc::now();
        let row = NewCard {
            world_id,
            type_id: input.type_id,
            folder_id: input.folder_id,
            name: input.name.trim(),
            slug,
            summary: input.summary.as_deref(),
            cover_image_url: input.cover_image_url.as_deref(),
            position: input.position,
            created_at: now,
            updated_at: now,
        };
        conn.table(TABLE).insert(&row).await
    }

    /// Patch a card. Pass `slug` when the name changed.
    pub async fn update(
        conn: &ServiceConn<'_>,
        id: EntityId,
        input: &UpdateCard,
        slug: Option<&str>,
    ) -> Result<Option<CardListItem>, ServiceError> {
        let patch = CardPatch { input, slug };
        conn.table(TABLE)
            .select(CARD_LIST_SELECT)
            .eq("id", id)
            .update(&Stamped::now(&patch))
            .await
    }

    /// Move one card; `None` makes it uncategorized. With `world_id` set,
    /// only a card of that world is moved. Returns `false` if no card
    /// matched.
    pub async fn move_to_folder(
        conn: &ServiceConn<'_>,
        id: EntityId,
        folder_id: Option<EntityId>,
        world_id: Option<EntityId>,
    ) -> Result<bool, ServiceError> {
        let mut query = conn.table(TABLE).eq("id", id);
        if let Some(world_id) = world_id {
            query = query.eq("world_id", world_id);
        }
        let moved: Option<Card> = query
            .update(&Stamped::now(&FolderMove { folder_id }))
            .await?;
        Ok(moved.is_some())
    }

    pub async fn delete(conn: &ServiceConn<'_>, id: EntityId) -> Result<bool, ServiceError> {
        conn.table(TABLE).eq("id", id).delete().await
    }

    /// Outgoing and incoming links of a card, oldest first, each with the
    /// card at the other end.
    pub async fn links(
        conn: &ServiceConn<'_>,
        card_id: EntityId,
    ) -> Result<(Vec<CardLinkView>, Vec<CardLinkView>), ServiceError> {
        let from = conn
            .table(LINK_TABLE)
            .select(LINKS_FROM_SELECT)
            .eq("from_card_id", card_id)
            .order("created_at", SortOrder::Asc)
            .fetch_all();
        let to = conn
            .table(LINK_TABLE)
            .select(LINKS_TO_SELECT)
            .eq("to_card_id", card_id)
            .order("created_at", SortOrder::Asc)
            .fetch_all();
        Ok((from.await?, to.await?))
    }
}
